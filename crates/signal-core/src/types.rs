use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Asset class of a watchlist entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetClass {
    Stock,
    Crypto,
}

/// A single tracked symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub symbol: String,
    pub asset_class: AssetClass,
}

/// The full set of tracked symbols and news keywords.
///
/// Built once at startup from configuration and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Watchlist {
    pub stocks: Vec<String>,
    pub cryptos: Vec<String>,
    pub news_keywords: Vec<String>,
}

impl Watchlist {
    pub fn entries(&self) -> Vec<WatchlistEntry> {
        self.stocks
            .iter()
            .map(|s| WatchlistEntry {
                symbol: s.clone(),
                asset_class: AssetClass::Stock,
            })
            .chain(self.cryptos.iter().map(|c| WatchlistEntry {
                symbol: c.clone(),
                asset_class: AssetClass::Crypto,
            }))
            .collect()
    }
}

/// Daily stock quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub price: f64,
    pub change_percent: f64,
    pub volume: i64,
    pub high: f64,
    pub low: f64,
}

/// Crypto spot quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoQuote {
    pub id: String,
    pub price: f64,
    pub change_percent_24h: f64,
    pub market_cap_usd: f64,
}

/// Recommended action for a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Buy,
    Sell,
    Hold,
}

impl TradeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
            TradeAction::Hold => "HOLD",
        }
    }
}

/// A scored Buy/Sell/Hold recommendation derived from one quote.
///
/// `strength` is clamped to 0..=100; `risk` is intentionally unclamped and
/// may exceed 100 for very volatile quotes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub action: TradeAction,
    pub strength: u8,
    pub price: f64,
    pub target: f64,
    pub risk: u32,
}

/// News article as returned by a news provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: Option<String>,
    pub published_at: DateTime<Utc>,
    pub url: String,
}

/// Categorical sentiment bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Bullish,
    SlightlyPositive,
    Neutral,
    SlightlyNegative,
    Bearish,
}

impl SentimentLabel {
    /// Bucket a normalized sentiment score into a label
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s > 2.0 => SentimentLabel::Bullish,
            s if s > 0.5 => SentimentLabel::SlightlyPositive,
            s if s < -2.0 => SentimentLabel::Bearish,
            s if s < -0.5 => SentimentLabel::SlightlyNegative,
            _ => SentimentLabel::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Bullish => "Bullish",
            SentimentLabel::SlightlyPositive => "Slightly Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::SlightlyNegative => "Slightly Negative",
            SentimentLabel::Bearish => "Bearish",
        }
    }
}

/// Aggregated sentiment over a set of articles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Word-polarity score normalized per token, scaled by 100
    pub score: f64,
    pub label: SentimentLabel,
}

/// Per-keyword sentiment with the article count it was computed from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSentiment {
    pub keyword: String,
    pub sentiment: SentimentResult,
    pub article_count: usize,
}

/// A high-strength signal crossing the alert threshold.
///
/// Carries no deduplication key: the same signal firing across consecutive
/// scan cycles produces a fresh event each time unless the scheduler's
/// suppression window is enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    pub signal: Signal,
    pub triggered_at: DateTime<Utc>,
}

/// Payload for the once-daily informational brief
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BriefSummary {
    pub date: NaiveDate,
    pub tracked_stocks: usize,
    pub tracked_cryptos: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watchlist_entries_keep_order_and_class() {
        let watchlist = Watchlist {
            stocks: vec!["TSLA".to_string(), "NVDA".to_string()],
            cryptos: vec!["bitcoin".to_string()],
            news_keywords: vec!["supply chain".to_string()],
        };

        let entries = watchlist.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].symbol, "TSLA");
        assert_eq!(entries[0].asset_class, AssetClass::Stock);
        assert_eq!(entries[2].symbol, "bitcoin");
        assert_eq!(entries[2].asset_class, AssetClass::Crypto);
    }

    #[test]
    fn actions_render_upper_case() {
        assert_eq!(TradeAction::Buy.as_str(), "BUY");
        assert_eq!(TradeAction::Sell.as_str(), "SELL");
        assert_eq!(TradeAction::Hold.as_str(), "HOLD");
    }
}
