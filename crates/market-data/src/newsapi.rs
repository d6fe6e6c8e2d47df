use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use signal_core::{MarketDataError, NewsArticle, NewsProvider};
use std::time::Duration;

use crate::rate_limiter::RateLimiter;
use crate::request_error;

const BASE_URL: &str = "https://newsapi.org/v2/everything";

/// NewsAPI "everything" search client, newest articles first.
#[derive(Clone)]
pub struct NewsApiClient {
    api_key: String,
    client: reqwest::Client,
    rate_limiter: RateLimiter,
}

impl NewsApiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: crate::http_client(),
            // Developer tier: 100 requests per day; 50/12h keeps us under it
            rate_limiter: RateLimiter::new(50, Duration::from_secs(12 * 60 * 60)),
        }
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn articles(
        &self,
        keyword: &str,
        page_size: u32,
        since: Option<NaiveDate>,
    ) -> Result<Vec<NewsArticle>, MarketDataError> {
        self.rate_limiter.acquire().await;

        let page_size = page_size.to_string();
        let from = since.map(|date| date.format("%Y-%m-%d").to_string());
        let mut query = vec![
            ("q", keyword),
            ("sortBy", "publishedAt"),
            ("pageSize", page_size.as_str()),
            ("language", "en"),
            ("apiKey", self.api_key.as_str()),
        ];
        if let Some(ref from) = from {
            query.push(("from", from.as_str()));
        }

        let response = self
            .client
            .get(BASE_URL)
            .query(&query)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(MarketDataError::Provider(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let body: EverythingResponse = response
            .json()
            .await
            .map_err(|e| MarketDataError::Parse(e.to_string()))?;

        Ok(articles_from_response(body))
    }
}

/// Articles without a title carry no signal for the sentiment pass; skip them.
fn articles_from_response(body: EverythingResponse) -> Vec<NewsArticle> {
    body.articles
        .into_iter()
        .filter_map(|raw| {
            Some(NewsArticle {
                title: raw.title?,
                description: raw.description,
                published_at: raw.published_at.unwrap_or_else(Utc::now),
                url: raw.url.unwrap_or_default(),
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    published_at: Option<DateTime<Utc>>,
    url: Option<String>,
}
