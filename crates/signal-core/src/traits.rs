use crate::{CryptoQuote, MarketDataError, NewsArticle, StockQuote};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Stock quote source. `Ok(None)` means the symbol is valid but has no data.
#[async_trait]
pub trait StockQuoteProvider: Send + Sync {
    async fn stock_quote(&self, symbol: &str) -> Result<Option<StockQuote>, MarketDataError>;
}

/// Crypto quote source, keyed by provider asset id (e.g. "bitcoin").
#[async_trait]
pub trait CryptoQuoteProvider: Send + Sync {
    async fn crypto_quote(&self, id: &str) -> Result<Option<CryptoQuote>, MarketDataError>;
}

/// News article source
#[async_trait]
pub trait NewsProvider: Send + Sync {
    async fn articles(
        &self,
        keyword: &str,
        page_size: u32,
        since: Option<NaiveDate>,
    ) -> Result<Vec<NewsArticle>, MarketDataError>;
}
