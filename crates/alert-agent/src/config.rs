use anyhow::{Context, Result};
use chrono::NaiveTime;
use signal_core::Watchlist;
use std::env;

const DEFAULT_STOCKS: &str = "TSLA,NVDA,AMD,AAPL,MSFT,WMT,F,GM";
const DEFAULT_CRYPTOS: &str = "bitcoin,ethereum,solana";
const DEFAULT_NEWS_KEYWORDS: &str = "supply chain,semiconductor,shipping,trade war,inflation";

/// Runtime configuration, loaded once at startup from the environment.
///
/// Missing required keys are fatal here; nothing is re-read per cycle.
#[derive(Debug, Clone)]
pub struct Config {
    pub watchlist: Watchlist,

    /// Scan job cadence in seconds
    pub scan_interval_secs: u64,
    /// How many stock entries (from the head of the watchlist) a scan covers
    pub scan_watchlist_size: usize,
    /// Alerts fire for strength strictly above this
    pub alert_threshold: u8,
    /// Minimum spacing between successive provider calls in one cycle
    pub inter_fetch_delay_ms: u64,
    /// 0 disables suppression: identical alerts may repeat every cycle
    pub alert_suppression_minutes: u64,

    /// Local wall-clock time of the weekday brief
    pub brief_time: NaiveTime,
    pub brief_timezone: chrono_tz::Tz,

    pub alpha_vantage_key: String,
    pub news_api_key: String,
    pub discord_webhook_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            watchlist: Watchlist {
                stocks: csv(env::var("WATCHLIST_STOCKS").unwrap_or_else(|_| DEFAULT_STOCKS.to_string())),
                cryptos: csv(env::var("WATCHLIST_CRYPTOS").unwrap_or_else(|_| DEFAULT_CRYPTOS.to_string())),
                news_keywords: csv(
                    env::var("WATCHLIST_NEWS_KEYWORDS")
                        .unwrap_or_else(|_| DEFAULT_NEWS_KEYWORDS.to_string()),
                ),
            },

            scan_interval_secs: env::var("SCAN_INTERVAL")
                .unwrap_or_else(|_| "1800".to_string())
                .parse()
                .context("SCAN_INTERVAL must be seconds")?,
            scan_watchlist_size: env::var("SCAN_WATCHLIST_SIZE")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("SCAN_WATCHLIST_SIZE must be a count")?,
            alert_threshold: env::var("ALERT_THRESHOLD")
                .unwrap_or_else(|_| "80".to_string())
                .parse()
                .context("ALERT_THRESHOLD must be 0-100")?,
            inter_fetch_delay_ms: env::var("INTER_FETCH_DELAY_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .context("INTER_FETCH_DELAY_MS must be milliseconds")?,
            alert_suppression_minutes: env::var("ALERT_SUPPRESSION_MINUTES")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .context("ALERT_SUPPRESSION_MINUTES must be minutes")?,

            brief_time: NaiveTime::parse_from_str(
                &env::var("DAILY_BRIEF_TIME").unwrap_or_else(|_| "09:00".to_string()),
                "%H:%M",
            )
            .context("DAILY_BRIEF_TIME must be HH:MM")?,
            brief_timezone: env::var("BRIEF_TIMEZONE")
                .unwrap_or_else(|_| "America/New_York".to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("bad BRIEF_TIMEZONE: {e}"))?,

            alpha_vantage_key: env::var("ALPHA_VANTAGE_KEY")
                .context("ALPHA_VANTAGE_KEY not set")?,
            news_api_key: env::var("NEWS_API_KEY").context("NEWS_API_KEY not set")?,
            discord_webhook_url: env::var("DISCORD_WEBHOOK_URL").unwrap_or_else(|_| String::new()),
        };

        if config.scan_interval_secs == 0 {
            anyhow::bail!("SCAN_INTERVAL must be positive");
        }
        if config.watchlist.stocks.is_empty() {
            anyhow::bail!("WATCHLIST_STOCKS must name at least one symbol");
        }

        Ok(config)
    }
}

fn csv(value: String) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_trims_and_drops_empties() {
        let parsed = csv("TSLA, NVDA ,,AMD,".to_string());
        assert_eq!(parsed, vec!["TSLA", "NVDA", "AMD"]);
    }

    #[test]
    fn default_keywords_keep_multiword_phrases() {
        let parsed = csv(DEFAULT_NEWS_KEYWORDS.to_string());
        assert_eq!(parsed[0], "supply chain");
        assert_eq!(parsed.len(), 5);
    }
}
