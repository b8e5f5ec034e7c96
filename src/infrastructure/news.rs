// News fetcher - Top U.S. headline from NewsAPI
use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::application::fetcher::{Fetcher, FetchResult, cancelable};
use crate::domain::outcome::{FetchError, WidgetPayload};
use crate::infrastructure::http::get_json;

const HEADLINES_URL: &str = "https://newsapi.org/v2/top-headlines?country=us";
pub const API_KEY_NAME: &str = "api_keys.news_api";

#[derive(Debug, Deserialize)]
struct NewsResponse {
    status: String,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: String,
    url: String,
}

pub struct NewsFetcher {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl NewsFetcher {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }
}

fn top_headline(response: NewsResponse) -> Result<WidgetPayload, FetchError> {
    if response.status != "ok" {
        return Err(FetchError::MalformedPayload(format!(
            "news response status '{}'",
            response.status
        )));
    }
    let article = response
        .articles
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::MalformedPayload("no articles in response".to_string()))?;
    Ok(WidgetPayload::News {
        headline: article.title,
        article_url: article.url,
    })
}

#[async_trait]
impl Fetcher for NewsFetcher {
    async fn fetch(&self, cancel: &CancellationToken) -> FetchResult {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| FetchError::ConfigMissing {
                key: API_KEY_NAME.to_string(),
            })?;

        let url = format!("{HEADLINES_URL}&apiKey={api_key}");
        let response: NewsResponse = cancelable(cancel, get_json(&self.client, &url)).await?;
        top_headline(response)
    }
}
