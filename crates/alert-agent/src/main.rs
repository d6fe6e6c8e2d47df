use std::sync::Arc;

use alert_agent::config::Config;
use alert_agent::scheduler::AlertScheduler;
use alert_agent::screener::Screener;
use anyhow::Result;
use market_data::{AlphaVantageClient, CoinGeckoClient, NewsApiClient};
use notification_service::{DiscordWebhookChannel, Notification, NotificationService};
use signal_core::{CryptoQuoteProvider, NewsProvider, StockQuoteProvider};
use signal_scoring::{RiskModel, ThreadRngRisk};
use tokio::signal::unix::SignalKind;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env, init tracing
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    tracing::info!("Starting Supply Alpha signal engine");

    // Configuration is fatal-at-startup: a bad or missing key stops us here
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!(
        "  Watchlist: {} stocks, {} cryptos, {} news keywords",
        config.watchlist.stocks.len(),
        config.watchlist.cryptos.len(),
        config.watchlist.news_keywords.len()
    );
    tracing::info!(
        "  Scan: every {}s over first {} stocks, alert on strength > {}",
        config.scan_interval_secs,
        config.scan_watchlist_size,
        config.alert_threshold
    );
    tracing::info!(
        "  Daily brief: weekdays {} {}",
        config.brief_time.format("%H:%M"),
        config.brief_timezone
    );
    if config.alert_suppression_minutes > 0 {
        tracing::info!(
            "  Alert suppression window: {} minutes",
            config.alert_suppression_minutes
        );
    }

    // Providers
    let stocks: Arc<dyn StockQuoteProvider> =
        Arc::new(AlphaVantageClient::new(config.alpha_vantage_key.clone()));
    let cryptos: Arc<dyn CryptoQuoteProvider> = Arc::new(CoinGeckoClient::new());
    let news: Arc<dyn NewsProvider> = Arc::new(NewsApiClient::new(config.news_api_key.clone()));
    let risk: Arc<dyn RiskModel> = Arc::new(ThreadRngRisk);

    // Notification channels
    let notifier = Arc::new(NotificationService::new().with_channel(Box::new(
        DiscordWebhookChannel::new(config.discord_webhook_url.clone()),
    )));

    // Startup notification
    notifier
        .dispatch(&Notification::Startup {
            tracked_stocks: config.watchlist.stocks.len(),
            tracked_cryptos: config.watchlist.cryptos.len(),
            scan_interval_secs: config.scan_interval_secs,
        })
        .await;

    // One screener pass at boot doubles as a provider connectivity check
    let screener = Screener::new(
        &config,
        Arc::clone(&stocks),
        Arc::clone(&cryptos),
        Arc::clone(&news),
        Arc::clone(&risk),
    );
    let opportunities = screener.best_opportunities().await;
    if opportunities.is_empty() {
        tracing::info!("Startup screen: no strong signals right now");
    }
    for signal in &opportunities {
        tracing::info!(
            "Startup screen: {} {} strength {} (price {:.2}, target {:.2})",
            signal.symbol,
            signal.action.as_str(),
            signal.strength,
            signal.price,
            signal.target
        );
    }
    for keyword in screener.sentiment_overview().await {
        tracing::info!(
            "Startup sentiment: {:?} {} ({:.2} over {} articles)",
            keyword.keyword,
            keyword.sentiment.label.as_str(),
            keyword.sentiment.score,
            keyword.article_count
        );
    }

    let scheduler = Arc::new(AlertScheduler::new(
        config,
        Arc::clone(&stocks),
        Arc::clone(&risk),
        Arc::clone(&notifier),
    ));

    let scan_task = tokio::spawn({
        let scheduler = Arc::clone(&scheduler);
        async move { scheduler.run_scan_loop().await }
    });
    let brief_task = tokio::spawn({
        let scheduler = Arc::clone(&scheduler);
        async move { scheduler.run_brief_loop().await }
    });

    tracing::info!("Scheduler running. Press Ctrl+C to stop.");

    // Graceful shutdown on SIGINT or SIGTERM
    let mut sigterm = tokio::signal::unix::signal(SignalKind::terminate())?;
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received SIGINT");
        }
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM");
        }
    }

    scan_task.abort();
    brief_task.abort();
    tracing::info!("Signal engine stopped");

    Ok(())
}
