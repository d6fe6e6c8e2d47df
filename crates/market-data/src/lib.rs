pub mod alpha_vantage;
pub mod coingecko;
pub mod newsapi;
pub mod rate_limiter;

pub use alpha_vantage::AlphaVantageClient;
pub use coingecko::CoinGeckoClient;
pub use newsapi::NewsApiClient;
pub use rate_limiter::RateLimiter;

use signal_core::MarketDataError;
use std::time::Duration;

/// Per-call provider timeout; a timeout is a recoverable per-symbol failure
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn request_error(e: reqwest::Error) -> MarketDataError {
    if e.is_timeout() {
        MarketDataError::Timeout(e.to_string())
    } else {
        MarketDataError::Provider(e.to_string())
    }
}

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(PROVIDER_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
