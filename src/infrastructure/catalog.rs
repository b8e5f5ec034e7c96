// Widget catalog - The built-in sources and their fetchers
use std::sync::Arc;
use std::time::Duration;

use crate::application::fetcher::Fetcher;
use crate::domain::source::Source;
use crate::infrastructure::config::DashboardConfig;
use crate::infrastructure::crypto::CryptoFetcher;
use crate::infrastructure::currency::CurrencyFetcher;
use crate::infrastructure::location::LocationFetcher;
use crate::infrastructure::news::NewsFetcher;
use crate::infrastructure::weather::WeatherFetcher;
use crate::infrastructure::world_clock::WorldClockFetcher;

// Default cadences balance freshness against the rate limits of the free
// public APIs behind each widget.
const DEFAULT_WEATHER_SECS: u64 = 300;
const DEFAULT_CRYPTO_SECS: u64 = 60;
const DEFAULT_NEWS_SECS: u64 = 300;
const DEFAULT_LOCATION_SECS: u64 = 600;
const DEFAULT_WORLD_CLOCK_SECS: u64 = 30;
const DEFAULT_CURRENCY_SECS: u64 = 300;

fn interval(override_secs: Option<u64>, default_secs: u64) -> Duration {
    Duration::from_secs(override_secs.unwrap_or(default_secs))
}

/// Assemble the six built-in widgets. The shared HTTP client is passed in
/// explicitly so tests (and any alternative wiring) can substitute their
/// own transport.
pub fn builtin_widgets(
    client: &reqwest::Client,
    config: &DashboardConfig,
) -> Vec<(Source, Arc<dyn Fetcher>)> {
    let keys = &config.api_keys;
    let intervals = &config.intervals;

    vec![
        (
            Source::new(
                "weather",
                "Weather",
                interval(intervals.weather_secs, DEFAULT_WEATHER_SECS),
                "https://www.google.com/search?q=weather",
            ),
            Arc::new(WeatherFetcher::new(
                client.clone(),
                keys.open_weather_map.clone(),
            )) as Arc<dyn Fetcher>,
        ),
        (
            Source::new(
                "crypto",
                "Crypto Prices",
                interval(intervals.crypto_secs, DEFAULT_CRYPTO_SECS),
                "https://www.coingecko.com",
            ),
            Arc::new(CryptoFetcher::new(client.clone())),
        ),
        (
            Source::new(
                "news",
                "Latest News",
                interval(intervals.news_secs, DEFAULT_NEWS_SECS),
                "https://news.google.com",
            ),
            Arc::new(NewsFetcher::new(client.clone(), keys.news_api.clone())),
        ),
        (
            Source::new(
                "location",
                "Your Location",
                interval(intervals.location_secs, DEFAULT_LOCATION_SECS),
                "https://www.google.com/maps",
            ),
            Arc::new(LocationFetcher::new(client.clone())),
        ),
        (
            Source::new(
                "world_clock",
                "World Clocks",
                interval(intervals.world_clock_secs, DEFAULT_WORLD_CLOCK_SECS),
                "https://time.is",
            ),
            Arc::new(WorldClockFetcher::default()),
        ),
        (
            Source::new(
                "currency",
                "Exchange Rates",
                interval(intervals.currency_secs, DEFAULT_CURRENCY_SECS),
                "https://www.frankfurter.app",
            ),
            Arc::new(CurrencyFetcher::new(client.clone())),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::Intervals;

    #[test]
    fn test_catalog_lists_all_six_widgets() {
        let config = DashboardConfig::default();
        let widgets = builtin_widgets(&reqwest::Client::new(), &config);
        let ids: Vec<&str> = widgets.iter().map(|(s, _)| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["weather", "crypto", "news", "location", "world_clock", "currency"]
        );
    }

    #[test]
    fn test_interval_overrides_apply() {
        let config = DashboardConfig {
            intervals: Intervals {
                crypto_secs: Some(120),
                ..Intervals::default()
            },
            ..DashboardConfig::default()
        };
        let widgets = builtin_widgets(&reqwest::Client::new(), &config);
        let crypto = widgets.iter().find(|(s, _)| s.id == "crypto").unwrap();
        assert_eq!(crypto.0.interval, Duration::from_secs(120));

        let clock = widgets.iter().find(|(s, _)| s.id == "world_clock").unwrap();
        assert_eq!(clock.0.interval, Duration::from_secs(30));
    }
}
