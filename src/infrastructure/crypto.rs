// Crypto prices fetcher - BTC and ETH spot prices from CoinGecko
use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::application::fetcher::{Fetcher, FetchResult, cancelable};
use crate::domain::outcome::WidgetPayload;
use crate::infrastructure::http::get_json;

const PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin,ethereum&vs_currencies=usd";

#[derive(Debug, Deserialize)]
struct PriceResponse {
    bitcoin: UsdQuote,
    ethereum: UsdQuote,
}

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: f64,
}

pub struct CryptoFetcher {
    client: reqwest::Client,
}

impl CryptoFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for CryptoFetcher {
    async fn fetch(&self, cancel: &CancellationToken) -> FetchResult {
        let prices: PriceResponse = cancelable(cancel, get_json(&self.client, PRICE_URL)).await?;
        Ok(WidgetPayload::Crypto {
            bitcoin_usd: prices.bitcoin.usd,
            ethereum_usd: prices.ethereum.usd,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_price_response() {
        let prices: PriceResponse = serde_json::from_value(json!({
            "bitcoin": { "usd": 42000.0 },
            "ethereum": { "usd": 2500.5 }
        }))
        .unwrap();
        assert_eq!(prices.bitcoin.usd, 42000.0);
        assert_eq!(prices.ethereum.usd, 2500.5);
    }

    #[test]
    fn test_missing_price_field_rejected() {
        // A quote object without the numeric field must fail the decode,
        // not silently produce a zero.
        let result = serde_json::from_value::<PriceResponse>(json!({
            "bitcoin": {},
            "ethereum": { "usd": 2500.5 }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_coin_rejected() {
        let result = serde_json::from_value::<PriceResponse>(json!({
            "bitcoin": { "usd": 42000.0 }
        }));
        assert!(result.is_err());
    }
}
