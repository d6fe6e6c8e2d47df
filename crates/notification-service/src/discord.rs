use async_trait::async_trait;
use serde_json::{json, Value};
use signal_core::TradeAction;

use crate::{Notification, NotificationChannel, NotificationError};

const COLOR_BUY: u32 = 0x00ff88;
const COLOR_SELL: u32 = 0xff6b6b;
const COLOR_BRIEF: u32 = 0x00aaff;

/// Discord webhook channel posting embed payloads.
///
/// An empty webhook URL disables the channel silently so local runs work
/// without a Discord server.
pub struct DiscordWebhookChannel {
    webhook_url: String,
    client: reqwest::Client,
}

impl DiscordWebhookChannel {
    pub fn new(webhook_url: String) -> Self {
        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NotificationChannel for DiscordWebhookChannel {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        if self.webhook_url.is_empty() {
            tracing::debug!("Discord webhook not configured, skipping notification");
            return Ok(());
        }

        let payload = json!({ "embeds": [embed_for(notification)] });

        self.client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotificationError::Discord(e.to_string()))?;

        Ok(())
    }

    fn name(&self) -> &str {
        "discord-webhook"
    }
}

fn embed_for(notification: &Notification) -> Value {
    match notification {
        Notification::SignalAlert(event) => {
            let signal = &event.signal;
            let color = if signal.action == TradeAction::Buy {
                COLOR_BUY
            } else {
                COLOR_SELL
            };
            json!({
                "title": format!("HIGH PROBABILITY ALERT: {}", signal.symbol),
                "color": color,
                "fields": [
                    { "name": "Price", "value": format!("${:.2}", signal.price), "inline": true },
                    { "name": "Action", "value": signal.action.as_str(), "inline": true },
                    { "name": "Score", "value": format!("{}/100", signal.strength), "inline": true },
                    { "name": "Target", "value": format!("${:.2}", signal.target), "inline": true },
                    { "name": "Risk", "value": format!("{}/100", signal.risk), "inline": true },
                ],
                "timestamp": event.triggered_at.to_rfc3339(),
                "footer": { "text": "Not financial advice" },
            })
        }
        Notification::DailyBrief(brief) => json!({
            "title": "Daily Market Brief",
            "description": "Good morning! Here's your market overview for today.",
            "color": COLOR_BRIEF,
            "fields": [
                { "name": "Date", "value": brief.date.format("%Y-%m-%d").to_string(), "inline": true },
                {
                    "name": "Tracking",
                    "value": format!("{} stocks, {} cryptos", brief.tracked_stocks, brief.tracked_cryptos),
                    "inline": true
                },
            ],
        }),
        Notification::Startup {
            tracked_stocks,
            tracked_cryptos,
            scan_interval_secs,
        } => json!({
            "title": "Signal Engine - LIVE",
            "description": "Scanning markets for high-strength signals.",
            "color": COLOR_BUY,
            "fields": [
                {
                    "name": "Tracking",
                    "value": format!("{tracked_stocks} stocks, {tracked_cryptos} cryptos"),
                    "inline": true
                },
                {
                    "name": "Scan cadence",
                    "value": format!("every {}s", scan_interval_secs),
                    "inline": true
                },
            ],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use signal_core::{AlertEvent, BriefSummary, Signal};

    fn signal(action: TradeAction) -> Signal {
        Signal {
            symbol: "NVDA".to_string(),
            action,
            strength: 85,
            price: 500.0,
            target: 525.0,
            risk: 28,
        }
    }

    #[test]
    fn buy_alert_embed_is_green_and_named() {
        let embed = embed_for(&Notification::SignalAlert(AlertEvent {
            signal: signal(TradeAction::Buy),
            triggered_at: Utc::now(),
        }));

        assert_eq!(embed["color"], COLOR_BUY);
        assert_eq!(embed["title"], "HIGH PROBABILITY ALERT: NVDA");
        assert_eq!(embed["fields"][1]["value"], "BUY");
    }

    #[test]
    fn sell_alert_embed_is_red() {
        let embed = embed_for(&Notification::SignalAlert(AlertEvent {
            signal: signal(TradeAction::Sell),
            triggered_at: Utc::now(),
        }));
        assert_eq!(embed["color"], COLOR_SELL);
    }

    #[test]
    fn brief_embed_carries_watchlist_counts() {
        let embed = embed_for(&Notification::DailyBrief(BriefSummary {
            date: Utc::now().date_naive(),
            tracked_stocks: 8,
            tracked_cryptos: 3,
        }));

        assert_eq!(embed["color"], COLOR_BRIEF);
        assert_eq!(embed["fields"][1]["value"], "8 stocks, 3 cryptos");
    }
}
