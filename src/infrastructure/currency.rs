// Currency fetcher - USD exchange rates from the Frankfurter API
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

use crate::application::fetcher::{Fetcher, FetchResult, cancelable};
use crate::domain::outcome::{FetchError, WidgetPayload};
use crate::infrastructure::http::get_json;

const RATES_URL: &str = "https://api.frankfurter.app/latest?from=USD&to=EUR,GBP,JPY";

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

impl RatesResponse {
    fn rate(&self, code: &str) -> Result<f64, FetchError> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| FetchError::MalformedPayload(format!("missing {code} rate")))
    }
}

pub struct CurrencyFetcher {
    client: reqwest::Client,
}

impl CurrencyFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for CurrencyFetcher {
    async fn fetch(&self, cancel: &CancellationToken) -> FetchResult {
        let response: RatesResponse = cancelable(cancel, get_json(&self.client, RATES_URL)).await?;
        Ok(WidgetPayload::Currency {
            usd_to_eur: response.rate("EUR")?,
            usd_to_gbp: response.rate("GBP")?,
            usd_to_jpy: response.rate("JPY")?,
        })
    }
}
