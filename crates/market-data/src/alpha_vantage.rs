use async_trait::async_trait;
use serde::Deserialize;
use signal_core::{MarketDataError, StockQuote, StockQuoteProvider};
use std::time::Duration;

use crate::rate_limiter::RateLimiter;
use crate::request_error;

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Alpha Vantage GLOBAL_QUOTE client.
///
/// The free tier allows 5 requests per minute; set ALPHA_VANTAGE_RATE_LIMIT
/// for paid plans.
#[derive(Clone)]
pub struct AlphaVantageClient {
    api_key: String,
    client: reqwest::Client,
    rate_limiter: RateLimiter,
}

impl AlphaVantageClient {
    pub fn new(api_key: String) -> Self {
        let rate_limit: usize = std::env::var("ALPHA_VANTAGE_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        Self {
            api_key,
            client: crate::http_client(),
            rate_limiter: RateLimiter::new(rate_limit, Duration::from_secs(60)),
        }
    }
}

#[async_trait]
impl StockQuoteProvider for AlphaVantageClient {
    async fn stock_quote(&self, symbol: &str) -> Result<Option<StockQuote>, MarketDataError> {
        self.rate_limiter.acquire().await;

        let response = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", &self.api_key),
            ])
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

        let body: GlobalQuoteResponse = response
            .json()
            .await
            .map_err(|e| MarketDataError::Parse(e.to_string()))?;

        quote_from_response(symbol, body)
    }
}

/// Alpha Vantage returns an empty "Global Quote" object for unknown symbols;
/// that maps to `Ok(None)`, not an error.
fn quote_from_response(
    symbol: &str,
    body: GlobalQuoteResponse,
) -> Result<Option<StockQuote>, MarketDataError> {
    let Some(raw) = body.global_quote else {
        return Ok(None);
    };
    let Some(price) = raw.price else {
        tracing::debug!("no quote data for {}", symbol);
        return Ok(None);
    };

    Ok(Some(StockQuote {
        symbol: symbol.to_string(),
        price: parse_num(&price, "05. price")?,
        change_percent: parse_num(
            raw.change_percent
                .as_deref()
                .unwrap_or("0%")
                .trim_end_matches('%'),
            "10. change percent",
        )?,
        volume: parse_num(raw.volume.as_deref().unwrap_or("0"), "06. volume")? as i64,
        high: parse_num(raw.high.as_deref().unwrap_or("0"), "03. high")?,
        low: parse_num(raw.low.as_deref().unwrap_or("0"), "04. low")?,
    }))
}

fn parse_num(value: &str, field: &str) -> Result<f64, MarketDataError> {
    value
        .trim()
        .parse()
        .map_err(|_| MarketDataError::Parse(format!("bad {field}: {value:?}")))
}

#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuoteRaw>,
}

/// Field names are Alpha Vantage's literal numbered keys
#[derive(Debug, Default, Deserialize)]
struct GlobalQuoteRaw {
    #[serde(rename = "03. high")]
    high: Option<String>,
    #[serde(rename = "04. low")]
    low: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "06. volume")]
    volume: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}
