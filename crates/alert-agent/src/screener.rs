use chrono::Utc;
use market_data::RateLimiter;
use sentiment_analysis::SentimentAggregator;
use signal_core::{
    CryptoQuoteProvider, KeywordSentiment, NewsProvider, Signal, StockQuoteProvider, Watchlist,
};
use signal_scoring::{rank_signals, score_crypto, score_stock, RiskModel};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;

/// Opportunities view: strength must beat this to show up
const SCREEN_MIN_STRENGTH: u8 = 60;
const SCREEN_TOP_N: usize = 5;
/// Only the head of the stock list is screened, to stay inside free-tier quotas
const SCREEN_STOCK_LIMIT: usize = 5;

const SENTIMENT_KEYWORD_LIMIT: usize = 3;
const SENTIMENT_PAGE_SIZE: u32 = 10;

/// On-demand market views for the chat/command surface.
///
/// Pure read paths: nothing here alerts or mutates scheduler state.
pub struct Screener {
    watchlist: Watchlist,
    stocks: Arc<dyn StockQuoteProvider>,
    cryptos: Arc<dyn CryptoQuoteProvider>,
    news: Arc<dyn NewsProvider>,
    risk: Arc<dyn RiskModel>,
    aggregator: SentimentAggregator,
    pacer: RateLimiter,
}

impl Screener {
    pub fn new(
        config: &Config,
        stocks: Arc<dyn StockQuoteProvider>,
        cryptos: Arc<dyn CryptoQuoteProvider>,
        news: Arc<dyn NewsProvider>,
        risk: Arc<dyn RiskModel>,
    ) -> Self {
        Self {
            watchlist: config.watchlist.clone(),
            stocks,
            cryptos,
            news,
            risk,
            aggregator: SentimentAggregator::new(),
            pacer: RateLimiter::min_gap(Duration::from_millis(config.inter_fetch_delay_ms)),
        }
    }

    /// Best current opportunities: the first five stock entries plus every
    /// tracked crypto, scored, filtered to strength > 60, strongest first,
    /// top five. Per-symbol failures are logged and skipped.
    pub async fn best_opportunities(&self) -> Vec<Signal> {
        let mut signals = Vec::new();

        for symbol in self.watchlist.stocks.iter().take(SCREEN_STOCK_LIMIT) {
            self.pacer.acquire().await;
            match self.stocks.stock_quote(symbol).await {
                Ok(Some(quote)) => signals.push(score_stock(&quote, self.risk.as_ref())),
                Ok(None) => tracing::info!("no quote data for {}", symbol),
                Err(e) => tracing::warn!("quote fetch failed for {}: {}", symbol, e),
            }
        }

        for id in &self.watchlist.cryptos {
            self.pacer.acquire().await;
            match self.cryptos.crypto_quote(id).await {
                Ok(Some(quote)) => signals.push(score_crypto(&quote, self.risk.as_ref())),
                Ok(None) => tracing::info!("no quote data for {}", id),
                Err(e) => tracing::warn!("crypto fetch failed for {}: {}", id, e),
            }
        }

        rank_signals(signals, SCREEN_MIN_STRENGTH, SCREEN_TOP_N)
    }

    /// Per-keyword sentiment over the last 24 hours of news for the first
    /// three keywords. A failed keyword is skipped; partial results stand.
    pub async fn sentiment_overview(&self) -> Vec<KeywordSentiment> {
        let since = (Utc::now() - chrono::Duration::hours(24)).date_naive();
        let mut results = Vec::new();

        for keyword in self
            .watchlist
            .news_keywords
            .iter()
            .take(SENTIMENT_KEYWORD_LIMIT)
        {
            self.pacer.acquire().await;
            match self
                .news
                .articles(keyword, SENTIMENT_PAGE_SIZE, Some(since))
                .await
            {
                Ok(articles) => {
                    let sentiment = self.aggregator.analyze(&articles);
                    results.push(KeywordSentiment {
                        keyword: keyword.clone(),
                        sentiment,
                        article_count: articles.len(),
                    });
                }
                Err(e) => tracing::warn!("news fetch failed for {:?}: {}", keyword, e),
            }
        }

        results
    }
}
