// Widget state machine - Latest displayable snapshot for one widget
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::outcome::{FetchOutcome, WidgetPayload};
use crate::domain::source::Source;

/// Display phase of a widget. `Loading` only before the first outcome;
/// afterwards the phase always mirrors the variant of the last outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Loading,
    Ready,
    Failed,
}

/// Per-widget mutable state. Single writer (the widget's scheduler task);
/// readers only ever see fully-applied snapshots.
///
/// `last_success` is retained across subsequent failures so the
/// presentation layer can show the last-known-good value next to an error
/// indicator.
#[derive(Debug)]
pub struct WidgetState {
    phase: Phase,
    last_success: Option<FetchOutcome>,
    last_outcome: Option<FetchOutcome>,
    generation: u64,
}

impl WidgetState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            last_success: None,
            last_outcome: None,
            generation: 0,
        }
    }

    /// Apply one fetch outcome: bump the generation, move the phase to the
    /// outcome's variant, and remember the outcome (successes twice over).
    pub fn apply(&mut self, outcome: FetchOutcome) {
        self.generation += 1;
        self.phase = if outcome.is_success() {
            Phase::Ready
        } else {
            Phase::Failed
        };
        if outcome.is_success() {
            self.last_success = Some(outcome.clone());
        }
        self.last_outcome = Some(outcome);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_success(&self) -> Option<&FetchOutcome> {
        self.last_success.as_ref()
    }

    pub fn last_outcome(&self) -> Option<&FetchOutcome> {
        self.last_outcome.as_ref()
    }

    /// Deep link resolved by the most recent success, or the source default.
    pub fn link(&self, source: &Source) -> String {
        if let Some(FetchOutcome::Success { link: Some(link), .. }) = &self.last_success {
            return link.clone();
        }
        source.default_link.clone()
    }

    /// Build the plain-data view handed to the presentation layer.
    pub fn snapshot(&self, source: &Source) -> WidgetSnapshot {
        let payload = match &self.last_success {
            Some(FetchOutcome::Success { payload, .. }) => Some(payload.clone()),
            _ => None,
        };
        let error = match &self.last_outcome {
            Some(FetchOutcome::Failure { error, .. }) => Some(error.to_string()),
            _ => None,
        };
        WidgetSnapshot {
            source_id: source.id.clone(),
            title: source.title.clone(),
            phase: self.phase,
            generation: self.generation,
            payload,
            error,
            updated_at: self.last_outcome.as_ref().map(|o| o.fetched_at()),
        }
    }
}

impl Default for WidgetState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only copy of a widget's displayable state at some generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSnapshot {
    pub source_id: String,
    pub title: String,
    pub phase: Phase,
    pub generation: u64,
    /// Last-known-good payload, kept even while `phase` is `Failed`.
    pub payload: Option<WidgetPayload>,
    /// Human-readable reason, present only while `phase` is `Failed`.
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outcome::FetchError;
    use std::time::Duration;

    fn crypto_payload(price: f64) -> WidgetPayload {
        WidgetPayload::Crypto {
            bitcoin_usd: price,
            ethereum_usd: 2500.0,
        }
    }

    fn test_source() -> Source {
        Source::new(
            "crypto",
            "Crypto Prices",
            Duration::from_secs(60),
            "https://www.coingecko.com",
        )
    }

    #[test]
    fn test_initial_state_is_loading_with_no_outcomes() {
        let state = WidgetState::new();
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(state.generation(), 0);
        assert!(state.last_success().is_none());
        assert!(state.last_outcome().is_none());
    }

    #[test]
    fn test_phase_tracks_variant_of_last_outcome() {
        let mut state = WidgetState::new();

        state.apply(FetchOutcome::success(crypto_payload(42000.0)));
        assert_eq!(state.phase(), Phase::Ready);

        state.apply(FetchOutcome::failure(FetchError::Transport(
            "connection refused".to_string(),
        )));
        assert_eq!(state.phase(), Phase::Failed);

        state.apply(FetchOutcome::failure(FetchError::HttpStatus { status: 429 }));
        assert_eq!(state.phase(), Phase::Failed);

        state.apply(FetchOutcome::success(crypto_payload(43000.0)));
        assert_eq!(state.phase(), Phase::Ready);
    }

    #[test]
    fn test_generation_strictly_increases() {
        let mut state = WidgetState::new();
        let mut previous = state.generation();
        let outcomes = [
            FetchOutcome::success(crypto_payload(42000.0)),
            FetchOutcome::failure(FetchError::Transport("timeout".to_string())),
            FetchOutcome::success(crypto_payload(42100.0)),
        ];
        for outcome in outcomes {
            state.apply(outcome);
            assert!(state.generation() > previous);
            previous = state.generation();
        }
        assert_eq!(previous, 3);
    }

    #[test]
    fn test_last_success_set_immediately_after_apply() {
        let mut state = WidgetState::new();
        let outcome = FetchOutcome::success(crypto_payload(42000.0));
        state.apply(outcome.clone());
        assert_eq!(state.last_success(), Some(&outcome));
        assert_eq!(state.last_outcome(), Some(&outcome));
    }

    #[test]
    fn test_last_success_retained_across_failures() {
        let mut state = WidgetState::new();
        let success = FetchOutcome::success(crypto_payload(42000.0));
        state.apply(success.clone());
        state.apply(FetchOutcome::failure(FetchError::HttpStatus { status: 500 }));

        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(state.last_success(), Some(&success));

        let snapshot = state.snapshot(&test_source());
        assert_eq!(snapshot.phase, Phase::Failed);
        assert_eq!(snapshot.payload, Some(crypto_payload(42000.0)));
        assert_eq!(snapshot.error.as_deref(), Some("unexpected HTTP status 500"));
    }

    #[test]
    fn test_snapshot_error_cleared_after_recovery() {
        let mut state = WidgetState::new();
        state.apply(FetchOutcome::failure(FetchError::HttpStatus { status: 500 }));
        state.apply(FetchOutcome::success(crypto_payload(42000.0)));

        let snapshot = state.snapshot(&test_source());
        assert_eq!(snapshot.phase, Phase::Ready);
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.generation, 2);
    }

    #[test]
    fn test_snapshot_serializes_with_timestamp() {
        let mut state = WidgetState::new();
        state.apply(FetchOutcome::success(crypto_payload(42000.0)));

        let json = serde_json::to_value(state.snapshot(&test_source())).unwrap();
        assert_eq!(json["sourceId"], "crypto");
        assert_eq!(json["phase"], "ready");
        assert_eq!(json["generation"], 1);
        assert_eq!(json["payload"]["bitcoinUsd"], 42000.0);
        assert!(json["updatedAt"].is_string(), "timestamp serializes as RFC 3339");
    }

    #[test]
    fn test_link_falls_back_to_source_default() {
        let source = test_source();
        let mut state = WidgetState::new();
        assert_eq!(state.link(&source), "https://www.coingecko.com");

        // Crypto payloads resolve no deep link; the default keeps applying.
        state.apply(FetchOutcome::success(crypto_payload(42000.0)));
        assert_eq!(state.link(&source), "https://www.coingecko.com");
    }

    #[test]
    fn test_link_uses_resolved_deep_link_after_success() {
        let source = Source::new(
            "news",
            "News",
            Duration::from_secs(300),
            "https://news.google.com",
        );
        let mut state = WidgetState::new();
        state.apply(FetchOutcome::success(WidgetPayload::News {
            headline: "Headline".to_string(),
            article_url: "https://example.com/story".to_string(),
        }));
        assert_eq!(state.link(&source), "https://example.com/story");

        // Retained through a later failure.
        state.apply(FetchOutcome::failure(FetchError::Transport("down".to_string())));
        assert_eq!(state.link(&source), "https://example.com/story");
    }
}
