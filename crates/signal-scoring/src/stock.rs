use signal_core::{Signal, StockQuote, TradeAction};

use crate::risk::RiskModel;

const BASE_SCORE: f64 = 50.0;
const VOLUME_THRESHOLD: i64 = 1_000_000;
const VOLATILITY_THRESHOLD: f64 = 5.0;
const SUPPLY_RISK_LO: f64 = 10.0;
const SUPPLY_RISK_HI: f64 = 50.0;

/// Score a stock quote into a bounded signal.
///
/// Total function: any well-formed quote produces a signal. The action is
/// decided on the raw score *before* clamping, so a heavily negative score
/// still reads as Sell even though its strength floors at 0.
pub fn score_stock(quote: &StockQuote, risk_model: &dyn RiskModel) -> Signal {
    let mut score = BASE_SCORE;

    // Momentum buckets: only the first match applies
    if quote.change_percent > 3.0 {
        score += 20.0;
    } else if quote.change_percent > 1.0 {
        score += 10.0;
    } else if quote.change_percent < -3.0 {
        score -= 20.0;
    } else if quote.change_percent < -1.0 {
        score -= 10.0;
    }

    if quote.volume > VOLUME_THRESHOLD {
        score += 10.0;
    }

    let volatility = (quote.high - quote.low) / quote.price * 100.0;
    if volatility > VOLATILITY_THRESHOLD {
        score += 5.0;
    }

    let supply_risk = risk_model.draw(SUPPLY_RISK_LO, SUPPLY_RISK_HI);
    score -= supply_risk / 2.0;

    let action = if score > 70.0 {
        TradeAction::Buy
    } else if score < 30.0 {
        TradeAction::Sell
    } else {
        TradeAction::Hold
    };

    let strength = score.round().clamp(0.0, 100.0) as u8;

    let target = if action == TradeAction::Buy {
        round2(quote.price * 1.05)
    } else {
        round2(quote.price * 0.95)
    };

    tracing::debug!(
        symbol = %quote.symbol,
        score,
        supply_risk,
        volatility,
        "scored stock quote"
    );

    Signal {
        symbol: quote.symbol.clone(),
        action,
        strength,
        price: quote.price,
        target,
        risk: (supply_risk + volatility * 2.0).round() as u32,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
