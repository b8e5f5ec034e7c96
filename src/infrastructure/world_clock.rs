// World clock fetcher - Wall-clock time in a fixed set of cities
//
// The only built-in fetcher with no network call; it still runs on the
// shared scheduler so clocks refresh on the same cadence machinery as
// everything else.
use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use tokio_util::sync::CancellationToken;

use crate::application::fetcher::{Fetcher, FetchResult};
use crate::domain::outcome::{ClockReading, WidgetPayload};

pub struct WorldClockFetcher {
    cities: Vec<(String, Tz)>,
}

impl WorldClockFetcher {
    pub fn new(cities: Vec<(String, Tz)>) -> Self {
        Self { cities }
    }
}

impl Default for WorldClockFetcher {
    fn default() -> Self {
        Self::new(vec![
            ("New York".to_string(), chrono_tz::America::New_York),
            ("London".to_string(), chrono_tz::Europe::London),
            ("Tokyo".to_string(), chrono_tz::Asia::Tokyo),
        ])
    }
}

#[async_trait]
impl Fetcher for WorldClockFetcher {
    async fn fetch(&self, _cancel: &CancellationToken) -> FetchResult {
        let now = Utc::now();
        let readings = self
            .cities
            .iter()
            .map(|(city, tz)| ClockReading {
                city: city.clone(),
                // 12-hour format, e.g. "03:07 PM"
                time: now.with_timezone(tz).format("%I:%M %p").to_string(),
            })
            .collect();
        Ok(WidgetPayload::WorldClock { readings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_cities_in_order() {
        let fetcher = WorldClockFetcher::default();
        let payload = fetcher.fetch(&CancellationToken::new()).await.unwrap();
        let WidgetPayload::WorldClock { readings } = payload else {
            panic!("expected world clock payload");
        };
        let cities: Vec<&str> = readings.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["New York", "London", "Tokyo"]);
    }

    #[tokio::test]
    async fn test_readings_are_twelve_hour_format() {
        let fetcher = WorldClockFetcher::default();
        let payload = fetcher.fetch(&CancellationToken::new()).await.unwrap();
        let WidgetPayload::WorldClock { readings } = payload else {
            panic!("expected world clock payload");
        };
        for reading in readings {
            assert!(
                reading.time.ends_with("AM") || reading.time.ends_with("PM"),
                "unexpected time format: {}",
                reading.time
            );
            assert_eq!(reading.time.len(), "01:23 PM".len());
        }
    }
}
