// Dashboard configuration - API keys, listen address, refresh intervals
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api_keys: ApiKeys,
    #[serde(default)]
    pub intervals: Intervals,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

/// Per-provider credentials. A missing key is not a startup error; the
/// widget that needs it reports `ConfigMissing` on its first fetch and
/// keeps retrying, so the rest of the dashboard stays live.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ApiKeys {
    pub open_weather_map: Option<String>,
    pub news_api: Option<String>,
}

/// Refresh cadence overrides, in seconds. Anything unset falls back to the
/// per-source default in the catalog.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Intervals {
    pub weather_secs: Option<u64>,
    pub crypto_secs: Option<u64>,
    pub news_secs: Option<u64>,
    pub location_secs: Option<u64>,
    pub world_clock_secs: Option<u64>,
    pub currency_secs: Option<u64>,
}

/// Load `config/dashboard.{toml,yaml,json}` if present, then apply
/// `DASHBOARD_*` environment overrides (e.g.
/// `DASHBOARD_API_KEYS__NEWS_API`). A missing file is fine: every field
/// has a default or is optional.
pub fn load_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config = DashboardConfig::default();
        assert_eq!(config.server.listen_addr, "0.0.0.0:8080");
        assert!(config.api_keys.open_weather_map.is_none());
        assert!(config.intervals.crypto_secs.is_none());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: DashboardConfig = serde_json::from_value(serde_json::json!({
            "api_keys": { "news_api": "abc123" },
            "intervals": { "crypto_secs": 120 }
        }))
        .unwrap();
        assert_eq!(config.api_keys.news_api.as_deref(), Some("abc123"));
        assert_eq!(config.intervals.crypto_secs, Some(120));
        assert!(config.intervals.weather_secs.is_none());
        assert_eq!(config.server.listen_addr, "0.0.0.0:8080");
    }
}
