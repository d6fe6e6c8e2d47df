use thiserror::Error;

/// Failures at the market-data provider boundary.
///
/// "No data for a valid request" is not an error: providers return
/// `Ok(None)` (or an empty list) for that case, and callers treat it as
/// "no signal". Everything here is recoverable per symbol/keyword; a scan
/// skips the affected entry and continues the batch.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("provider timeout: {0}")]
    Timeout(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("malformed response: {0}")]
    Parse(String),
}
