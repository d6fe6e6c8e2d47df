pub mod crypto;
pub mod ranker;
pub mod risk;
pub mod stock;

pub use crypto::score_crypto;
pub use ranker::rank_signals;
pub use risk::{FixedRisk, RiskModel, ThreadRngRisk};
pub use stock::score_stock;
