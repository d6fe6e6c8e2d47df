use signal_core::Signal;

/// Filter signals above `min_strength`, order strongest-first, keep `top_n`.
///
/// The sort is stable, so signals with equal strength keep their input
/// order. Used for the on-demand opportunities view (threshold 60, top 5)
/// and reusable by the scheduler with a stricter threshold.
pub fn rank_signals(mut signals: Vec<Signal>, min_strength: u8, top_n: usize) -> Vec<Signal> {
    signals.retain(|s| s.strength > min_strength);
    signals.sort_by(|a, b| b.strength.cmp(&a.strength));
    signals.truncate(top_n);
    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_core::TradeAction;

    fn signal(symbol: &str, strength: u8) -> Signal {
        Signal {
            symbol: symbol.to_string(),
            action: TradeAction::Buy,
            strength,
            price: 100.0,
            target: 105.0,
            risk: 25,
        }
    }

    #[test]
    fn filters_sorts_and_truncates() {
        let signals = vec![
            signal("AAPL", 61),
            signal("TSLA", 95),
            signal("WMT", 40),
            signal("NVDA", 72),
        ];

        let ranked = rank_signals(signals, 60, 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].symbol, "TSLA");
        assert_eq!(ranked[1].symbol, "NVDA");
    }

    #[test]
    fn threshold_is_exclusive() {
        let ranked = rank_signals(vec![signal("AAPL", 60)], 60, 5);
        assert!(ranked.is_empty());
    }

    #[test]
    fn ties_preserve_input_order() {
        let signals = vec![
            signal("F", 75),
            signal("GM", 75),
            signal("AMD", 80),
            signal("MSFT", 75),
        ];

        let ranked = rank_signals(signals, 0, 10);

        assert_eq!(ranked[0].symbol, "AMD");
        assert_eq!(ranked[1].symbol, "F");
        assert_eq!(ranked[2].symbol, "GM");
        assert_eq!(ranked[3].symbol, "MSFT");
    }

    #[test]
    fn empty_input_is_fine() {
        assert!(rank_signals(Vec::new(), 60, 5).is_empty());
    }
}
