// Weather fetcher - Geolocates the device, then queries OpenWeatherMap
use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::application::fetcher::{Fetcher, FetchResult, cancelable};
use crate::domain::outcome::{FetchError, WidgetPayload};
use crate::infrastructure::geolocate::{self, uses_imperial_units};
use crate::infrastructure::http::get_json;

const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const API_KEY_NAME: &str = "api_keys.open_weather_map";

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
    weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    main: String,
}

/// Current conditions for the device's approximate location. Composes two
/// lookups: IP geolocation first (choosing °C vs °F from the country),
/// then the OpenWeatherMap call; a failure in either short-circuits.
pub struct WeatherFetcher {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl WeatherFetcher {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl Fetcher for WeatherFetcher {
    async fn fetch(&self, cancel: &CancellationToken) -> FetchResult {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| FetchError::ConfigMissing {
                key: API_KEY_NAME.to_string(),
            })?;

        let location = geolocate::lookup(&self.client, cancel).await?;
        let (units, unit_symbol) = if uses_imperial_units(&location.country_code) {
            ("imperial", "°F")
        } else {
            ("metric", "°C")
        };

        let url = format!(
            "{WEATHER_URL}?lat={}&lon={}&appid={api_key}&units={units}",
            location.lat, location.lon
        );
        let response: WeatherResponse = cancelable(cancel, get_json(&self.client, &url)).await?;

        let condition = response.weather.first().ok_or_else(|| {
            FetchError::MalformedPayload("weather conditions list is empty".to_string())
        })?;

        Ok(WidgetPayload::Weather {
            city: location.city,
            temperature: response.main.temp,
            unit_symbol: unit_symbol.to_string(),
            condition: condition.main.clone(),
        })
    }
}
