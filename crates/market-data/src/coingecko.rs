use async_trait::async_trait;
use serde::Deserialize;
use signal_core::{CryptoQuote, CryptoQuoteProvider, MarketDataError};
use std::collections::HashMap;
use std::time::Duration;

use crate::rate_limiter::RateLimiter;
use crate::request_error;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko simple-price client. No API key; the public tier allows
/// roughly 30 calls per minute.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self {
            client: crate::http_client(),
            rate_limiter: RateLimiter::new(30, Duration::from_secs(60)),
        }
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CryptoQuoteProvider for CoinGeckoClient {
    async fn crypto_quote(&self, id: &str) -> Result<Option<CryptoQuote>, MarketDataError> {
        self.rate_limiter.acquire().await;

        let response = self
            .client
            .get(format!("{BASE_URL}/simple/price"))
            .query(&[
                ("ids", id),
                ("vs_currencies", "usd"),
                ("include_24hr_change", "true"),
                ("include_market_cap", "true"),
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

        let mut body: HashMap<String, PriceEntry> = response
            .json()
            .await
            .map_err(|e| MarketDataError::Parse(e.to_string()))?;

        Ok(quote_from_entry(id, body.remove(id)))
    }
}

/// Unknown ids simply don't appear in the response map; that's NotFound.
fn quote_from_entry(id: &str, entry: Option<PriceEntry>) -> Option<CryptoQuote> {
    let entry = entry?;
    let price = entry.usd?;

    Some(CryptoQuote {
        id: id.to_string(),
        price,
        change_percent_24h: entry.usd_24h_change.unwrap_or(0.0),
        market_cap_usd: entry.usd_market_cap.unwrap_or(0.0),
    })
}

#[derive(Debug, Deserialize)]
struct PriceEntry {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
    usd_market_cap: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_entry() {
        let mut body: HashMap<String, PriceEntry> = serde_json::from_str(
            r#"{
                "bitcoin": {
                    "usd": 97123.5,
                    "usd_24h_change": -1.83,
                    "usd_market_cap": 1912345678901.0
                }
            }"#,
        )
        .unwrap();

        let quote = quote_from_entry("bitcoin", body.remove("bitcoin")).unwrap();
        assert_eq!(quote.id, "bitcoin");
        assert_eq!(quote.price, 97123.5);
        assert_eq!(quote.change_percent_24h, -1.83);
        assert_eq!(quote.market_cap_usd, 1_912_345_678_901.0);
    }

    #[test]
    fn unknown_id_is_not_found() {
        assert!(quote_from_entry("dogelon", None).is_none());
    }

    #[test]
    fn missing_optional_fields_default_to_zero() {
        let mut body: HashMap<String, PriceEntry> =
            serde_json::from_str(r#"{"solana": {"usd": 142.0}}"#).unwrap();

        let quote = quote_from_entry("solana", body.remove("solana")).unwrap();
        assert_eq!(quote.change_percent_24h, 0.0);
        assert_eq!(quote.market_cap_usd, 0.0);
    }
}
