mod discord;

pub use discord::DiscordWebhookChannel;

use async_trait::async_trait;
use signal_core::{AlertEvent, BriefSummary};

/// Payloads the engine pushes out through its channels
#[derive(Debug, Clone)]
pub enum Notification {
    SignalAlert(AlertEvent),
    DailyBrief(BriefSummary),
    Startup {
        tracked_stocks: usize,
        tracked_cryptos: usize,
        scan_interval_secs: u64,
    },
}

/// Trait for notification channels.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError>;
    fn name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Discord webhook error: {0}")]
    Discord(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Dispatches notifications to every configured channel.
///
/// Delivery failures are logged and dropped. Retries, if ever wanted,
/// belong to a channel implementation, not here.
#[derive(Default)]
pub struct NotificationService {
    channels: Vec<Box<dyn NotificationChannel>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, channel: Box<dyn NotificationChannel>) -> Self {
        tracing::info!("notification channel enabled: {}", channel.name());
        self.channels.push(channel);
        self
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub async fn dispatch(&self, notification: &Notification) {
        for channel in &self.channels {
            match channel.send(notification).await {
                Ok(()) => tracing::debug!("sent notification via {}", channel.name()),
                Err(e) => {
                    tracing::warn!("failed to send notification via {}: {}", channel.name(), e)
                }
            }
        }
    }
}
