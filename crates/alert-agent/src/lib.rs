pub mod config;
pub mod metrics;
pub mod scheduler;
pub mod screener;

pub use config::Config;
pub use scheduler::AlertScheduler;
pub use screener::Screener;
