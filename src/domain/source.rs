// Source domain model - One external data feed with its refresh cadence
use std::time::Duration;

/// Describes one external data feed. Immutable once configured; the actual
/// retrieval logic lives in the `Fetcher` registered alongside it.
#[derive(Debug, Clone)]
pub struct Source {
    pub id: String,
    pub title: String,
    pub interval: Duration,
    /// Link opened when the widget is clicked before any fetch has
    /// succeeded (or when a success carries no resolved deep link).
    pub default_link: String,
}

impl Source {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        interval: Duration,
        default_link: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            interval,
            default_link: default_link.into(),
        }
    }
}
