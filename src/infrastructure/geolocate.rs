// IP geolocation lookup via ip-api.com, shared by weather and location
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::application::fetcher::cancelable;
use crate::domain::outcome::FetchError;
use crate::infrastructure::http::get_json;

const GEO_URL: &str = "http://ip-api.com/json/";

/// Device-approximate location resolved from the caller's public IP.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
    pub city: String,
    pub country: String,
    #[serde(rename = "countryCode")]
    pub country_code: String,
    pub timezone: String,
    /// ip-api reports the resolved IP under "query".
    #[serde(rename = "query")]
    pub ip: String,
}

/// Resolve the approximate location of this machine. On an ip-api failure
/// response the required fields are absent, which surfaces as
/// `MalformedPayload` from the decode step.
pub async fn lookup(
    client: &reqwest::Client,
    cancel: &CancellationToken,
) -> Result<GeoLocation, FetchError> {
    cancelable(cancel, get_json(client, GEO_URL)).await
}

/// Countries that report temperatures in Fahrenheit.
pub fn uses_imperial_units(country_code: &str) -> bool {
    matches!(country_code, "US" | "LR" | "MM")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_geolocation_response() {
        let location: GeoLocation = serde_json::from_value(json!({
            "status": "success",
            "lat": 40.71,
            "lon": -74.0,
            "city": "New York",
            "country": "United States",
            "countryCode": "US",
            "timezone": "America/New_York",
            "query": "203.0.113.7"
        }))
        .unwrap();
        assert_eq!(location.city, "New York");
        assert_eq!(location.country_code, "US");
        assert_eq!(location.ip, "203.0.113.7");
    }

    #[test]
    fn test_failure_response_is_missing_required_fields() {
        // ip-api reports failures as {"status":"fail","message":...} with
        // no coordinates; decoding must reject it.
        let result = serde_json::from_value::<GeoLocation>(json!({
            "status": "fail",
            "message": "private range"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_imperial_unit_countries() {
        assert!(uses_imperial_units("US"));
        assert!(uses_imperial_units("LR"));
        assert!(uses_imperial_units("MM"));
        assert!(!uses_imperial_units("DE"));
        assert!(!uses_imperial_units("GB"));
    }
}
