// Location fetcher - City, country, timezone and IP from geolocation
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::application::fetcher::{Fetcher, FetchResult};
use crate::domain::outcome::WidgetPayload;
use crate::infrastructure::geolocate;

pub struct LocationFetcher {
    client: reqwest::Client,
}

impl LocationFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for LocationFetcher {
    async fn fetch(&self, cancel: &CancellationToken) -> FetchResult {
        let location = geolocate::lookup(&self.client, cancel).await?;
        Ok(WidgetPayload::Location {
            city: location.city,
            country: location.country,
            timezone: location.timezone,
            ip: location.ip,
        })
    }
}
