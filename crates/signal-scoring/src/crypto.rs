use signal_core::{CryptoQuote, Signal, TradeAction};

use crate::risk::RiskModel;

const BASE_SCORE: f64 = 50.0;
const LARGE_CAP_USD: f64 = 100e9;
const MICRO_CAP_USD: f64 = 1e9;
const CRYPTO_RISK_LO: f64 = 20.0;
const CRYPTO_RISK_HI: f64 = 50.0;

/// Score a crypto quote into a bounded signal.
///
/// Same shape as the stock scorer but an independent formula: wider momentum
/// buckets for the higher baseline volatility, a market-cap term instead of
/// volume, and a whole-unit price target.
pub fn score_crypto(quote: &CryptoQuote, risk_model: &dyn RiskModel) -> Signal {
    let mut score = BASE_SCORE;
    let change = quote.change_percent_24h;

    if change > 5.0 {
        score += 25.0;
    } else if change > 2.0 {
        score += 15.0;
    } else if change < -5.0 {
        score -= 25.0;
    } else if change < -2.0 {
        score -= 15.0;
    }

    // Large caps get a stability bonus, micro caps a smaller upside bonus;
    // the mid range gets neither.
    if quote.market_cap_usd > LARGE_CAP_USD {
        score += 10.0;
    } else if quote.market_cap_usd < MICRO_CAP_USD {
        score += 5.0;
    }

    let crypto_risk = risk_model.draw(CRYPTO_RISK_LO, CRYPTO_RISK_HI);
    score -= crypto_risk / 3.0;

    let action = if score > 70.0 {
        TradeAction::Buy
    } else if score < 30.0 {
        TradeAction::Sell
    } else {
        TradeAction::Hold
    };

    let strength = score.round().clamp(0.0, 100.0) as u8;

    // Whole currency units, unlike the stock scorer's cent precision
    let target = if action == TradeAction::Buy {
        (quote.price * 1.08).round()
    } else {
        (quote.price * 0.92).round()
    };

    tracing::debug!(id = %quote.id, score, crypto_risk, "scored crypto quote");

    Signal {
        symbol: quote.id.to_uppercase(),
        action,
        strength,
        price: quote.price,
        target,
        risk: (crypto_risk + change.abs()).round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::FixedRisk;

    fn quote(change: f64, market_cap: f64, price: f64) -> CryptoQuote {
        CryptoQuote {
            id: "bitcoin".to_string(),
            price,
            change_percent_24h: change,
            market_cap_usd: market_cap,
        }
    }

    #[test]
    fn micro_cap_dump_scores_sell_at_20() {
        // 50 - 25 (momentum) + 5 (micro cap) - 10 (risk 30/3)
        let q = quote(-6.0, 5e8, 50_000.0);
        let signal = score_crypto(&q, &FixedRisk(30.0));

        assert_eq!(signal.action, TradeAction::Sell);
        assert_eq!(signal.strength, 20);
        assert_eq!(signal.target, 46_000.0);
        // risk = crypto_risk + |change| = 30 + 6
        assert_eq!(signal.risk, 36);
    }

    #[test]
    fn large_cap_rally_scores_buy() {
        // 50 + 25 + 10 - 30/3 = 75
        let q = quote(6.0, 1.9e12, 97_000.0);
        let signal = score_crypto(&q, &FixedRisk(30.0));

        assert_eq!(signal.action, TradeAction::Buy);
        assert_eq!(signal.strength, 75);
        assert_eq!(signal.target, (97_000.0f64 * 1.08).round());
    }

    #[test]
    fn mid_cap_gets_no_cap_bonus() {
        // 50 + 0 (change 1) + 0 (cap 50e9) - 0
        let q = quote(1.0, 50e9, 2_000.0);
        let signal = score_crypto(&q, &FixedRisk(0.0));
        assert_eq!(signal.strength, 50);
        assert_eq!(signal.action, TradeAction::Hold);
    }

    #[test]
    fn score_of_exactly_70_is_hold() {
        // 50 + 15 (change 3) + 5 (micro cap) = 70 with zero draw
        let q = quote(3.0, 5e8, 1.25);
        let signal = score_crypto(&q, &FixedRisk(0.0));

        assert_eq!(signal.strength, 70);
        assert_eq!(signal.action, TradeAction::Hold);
        // Hold targets use the downside multiplier, rounded to whole units
        assert_eq!(signal.target, (1.25f64 * 0.92).round());
    }

    #[test]
    fn symbol_is_uppercased_id() {
        let q = quote(0.0, 50e9, 100.0);
        let signal = score_crypto(&q, &FixedRisk(20.0));
        assert_eq!(signal.symbol, "BITCOIN");
    }

    #[test]
    fn rescoring_with_same_risk_is_deterministic() {
        let q = quote(-3.3, 8e9, 143.7);
        let a = score_crypto(&q, &FixedRisk(41.0));
        let b = score_crypto(&q, &FixedRisk(41.0));
        assert_eq!(a.strength, b.strength);
        assert_eq!(a.target, b.target);
        assert_eq!(a.risk, b.risk);
    }

    #[test]
    fn strength_stays_bounded_over_live_draws() {
        let model = crate::risk::ThreadRngRisk;
        let q = quote(-8.0, 5e8, 0.002);
        for _ in 0..200 {
            let signal = score_crypto(&q, &model);
            assert!(signal.strength <= 100);
        }
    }
}
