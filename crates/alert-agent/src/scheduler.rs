use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use market_data::RateLimiter;
use notification_service::{Notification, NotificationService};
use signal_core::{AlertEvent, BriefSummary, StockQuoteProvider};
use signal_scoring::{score_stock, RiskModel};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

use crate::config::Config;
use crate::metrics::ScanMetrics;

/// What one scan cycle did, for metrics and tests
#[derive(Debug, Default)]
pub struct CycleOutcome {
    pub quotes_fetched: usize,
    pub fetch_failures: usize,
    pub alerts_dispatched: usize,
    pub alerts_suppressed: usize,
}

/// Runs the two periodic jobs: the high-threshold scan and the daily brief.
///
/// Overlap policy: each job owns one task and a cycle runs to completion
/// before the next tick is honored (`MissedTickBehavior::Delay`), so a job
/// never overlaps itself. The jobs are independent tasks, so a slow scan
/// does not delay the brief.
pub struct AlertScheduler {
    config: Config,
    stocks: Arc<dyn StockQuoteProvider>,
    risk: Arc<dyn RiskModel>,
    notifier: Arc<NotificationService>,
    pacer: RateLimiter,
    last_alert_at: Mutex<HashMap<String, chrono::DateTime<Utc>>>,
    last_brief_date: Mutex<Option<NaiveDate>>,
    metrics: Mutex<ScanMetrics>,
}

impl AlertScheduler {
    pub fn new(
        config: Config,
        stocks: Arc<dyn StockQuoteProvider>,
        risk: Arc<dyn RiskModel>,
        notifier: Arc<NotificationService>,
    ) -> Self {
        let pacer = RateLimiter::min_gap(Duration::from_millis(config.inter_fetch_delay_ms));
        Self {
            config,
            stocks,
            risk,
            notifier,
            pacer,
            last_alert_at: Mutex::new(HashMap::new()),
            last_brief_date: Mutex::new(None),
            metrics: Mutex::new(ScanMetrics::new()),
        }
    }

    /// Scan loop: one cycle per cadence tick, first cycle immediately.
    pub async fn run_scan_loop(&self) {
        let mut interval =
            tokio::time::interval(Duration::from_secs(self.config.scan_interval_secs));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let cycle_start = std::time::Instant::now();
            let outcome = self.scan_cycle().await;

            let mut metrics = self.metrics.lock().await;
            metrics.record_cycle(&outcome, cycle_start);
            metrics.log_summary();
        }
    }

    /// One pass over the head of the stock watchlist.
    ///
    /// Symbols are processed strictly in watchlist order with the pacer
    /// spacing provider calls; a per-symbol failure is logged and skipped.
    /// Alerts are dispatched in the order produced, not by score.
    pub async fn scan_cycle(&self) -> CycleOutcome {
        let mut outcome = CycleOutcome::default();
        let mut events = Vec::new();

        tracing::info!("scanning for high-strength signals");

        for symbol in self
            .config
            .watchlist
            .stocks
            .iter()
            .take(self.config.scan_watchlist_size)
        {
            self.pacer.acquire().await;

            match self.stocks.stock_quote(symbol).await {
                Ok(Some(quote)) => {
                    outcome.quotes_fetched += 1;
                    let signal = score_stock(&quote, self.risk.as_ref());
                    if signal.strength > self.config.alert_threshold {
                        events.push(AlertEvent {
                            signal,
                            triggered_at: Utc::now(),
                        });
                    }
                }
                Ok(None) => {
                    tracing::info!("no quote data for {}", symbol);
                }
                Err(e) => {
                    outcome.fetch_failures += 1;
                    tracing::warn!("quote fetch failed for {}: {}", symbol, e);
                }
            }
        }

        for event in events {
            if self.suppressed(&event.signal.symbol).await {
                outcome.alerts_suppressed += 1;
                tracing::info!(
                    "alert for {} suppressed (window active)",
                    event.signal.symbol
                );
                continue;
            }
            self.mark_alerted(&event.signal.symbol).await;
            self.notifier
                .dispatch(&Notification::SignalAlert(event))
                .await;
            outcome.alerts_dispatched += 1;
        }

        outcome
    }

    async fn suppressed(&self, symbol: &str) -> bool {
        if self.config.alert_suppression_minutes == 0 {
            return false;
        }
        let window = chrono::Duration::minutes(self.config.alert_suppression_minutes as i64);
        let last_alert_at = self.last_alert_at.lock().await;
        last_alert_at
            .get(symbol)
            .is_some_and(|&t| Utc::now() - t < window)
    }

    async fn mark_alerted(&self, symbol: &str) {
        if self.config.alert_suppression_minutes == 0 {
            return;
        }
        self.last_alert_at
            .lock()
            .await
            .insert(symbol.to_string(), Utc::now());
    }

    /// Brief loop: a coarse ticker checking whether the configured local
    /// time has been reached on a weekday that hasn't been briefed yet.
    pub async fn run_brief_loop(&self) {
        let mut interval = tokio::time::interval(Duration::from_secs(30));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            self.maybe_send_brief().await;
        }
    }

    pub async fn maybe_send_brief(&self) {
        let now = Utc::now().with_timezone(&self.config.brief_timezone);
        let today = now.date_naive();

        let mut last_brief_date = self.last_brief_date.lock().await;
        if !brief_due(
            now.weekday(),
            now.time(),
            today,
            self.config.brief_time,
            *last_brief_date,
        ) {
            return;
        }
        *last_brief_date = Some(today);
        drop(last_brief_date);

        tracing::info!("sending daily brief for {}", today);
        self.notifier
            .dispatch(&Notification::DailyBrief(BriefSummary {
                date: today,
                tracked_stocks: self.config.watchlist.stocks.len(),
                tracked_cryptos: self.config.watchlist.cryptos.len(),
            }))
            .await;
    }
}

/// Weekdays only, at most once per local date, within the brief hour at or
/// after its minute. The brief does not consult the scorers.
fn brief_due(
    weekday: Weekday,
    time: NaiveTime,
    today: NaiveDate,
    at: NaiveTime,
    last: Option<NaiveDate>,
) -> bool {
    if weekday == Weekday::Sat || weekday == Weekday::Sun {
        return false;
    }
    if last == Some(today) {
        return false;
    }
    time.hour() == at.hour() && time.minute() >= at.minute()
}
