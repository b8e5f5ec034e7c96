// Fetch outcome domain model - Typed payloads and the failure taxonomy
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Why a fetch attempt failed. Everything except `Canceled` is surfaced to
/// the widget as a `Failure` outcome; `Canceled` suppresses the outcome
/// entirely and is never displayed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16 },
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("missing configuration key '{key}'")]
    ConfigMissing { key: String },
    #[error("fetch canceled")]
    Canceled,
}

/// One reading of a world clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockReading {
    pub city: String,
    pub time: String,
}

/// The parsed, displayable result of one successful fetch. One variant per
/// built-in widget; the orchestration core treats this as opaque.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WidgetPayload {
    #[serde(rename_all = "camelCase")]
    Weather {
        city: String,
        temperature: f64,
        unit_symbol: String,
        condition: String,
    },
    #[serde(rename_all = "camelCase")]
    Crypto { bitcoin_usd: f64, ethereum_usd: f64 },
    #[serde(rename_all = "camelCase")]
    News { headline: String, article_url: String },
    #[serde(rename_all = "camelCase")]
    Location {
        city: String,
        country: String,
        timezone: String,
        ip: String,
    },
    #[serde(rename_all = "camelCase")]
    WorldClock { readings: Vec<ClockReading> },
    #[serde(rename_all = "camelCase")]
    Currency {
        usd_to_eur: f64,
        usd_to_gbp: f64,
        usd_to_jpy: f64,
    },
}

impl WidgetPayload {
    /// Deep link resolved by this payload, if it carries one. Computed once
    /// per successful fetch; sources without a payload-derived link fall
    /// back to their configured default.
    pub fn deep_link(&self) -> Option<String> {
        match self {
            WidgetPayload::Weather { city, .. } => Some(format!(
                "https://www.google.com/search?q=weather+{}",
                urlencoding::encode(city)
            )),
            WidgetPayload::News { article_url, .. } => Some(article_url.clone()),
            _ => None,
        }
    }
}

/// The result of one fetch attempt. Produced once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success {
        payload: WidgetPayload,
        link: Option<String>,
        fetched_at: DateTime<Utc>,
    },
    Failure {
        error: FetchError,
        fetched_at: DateTime<Utc>,
    },
}

impl FetchOutcome {
    pub fn success(payload: WidgetPayload) -> Self {
        let link = payload.deep_link();
        FetchOutcome::Success {
            payload,
            link,
            fetched_at: Utc::now(),
        }
    }

    pub fn failure(error: FetchError) -> Self {
        FetchOutcome::Failure {
            error,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        match self {
            FetchOutcome::Success { fetched_at, .. } => *fetched_at,
            FetchOutcome::Failure { fetched_at, .. } => *fetched_at,
        }
    }
}
