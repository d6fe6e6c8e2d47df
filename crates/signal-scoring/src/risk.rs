use rand::Rng;

/// Source of the exogenous risk term the scorers subtract from their score.
///
/// The draw is the only non-deterministic input per scoring call, so it sits
/// behind this trait: production uses `ThreadRngRisk`, tests inject
/// `FixedRisk` to make signals reproducible.
pub trait RiskModel: Send + Sync {
    /// Draw a risk factor uniformly from `[lo, hi)`
    fn draw(&self, lo: f64, hi: f64) -> f64;
}

/// Uniform draw from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngRisk;

impl RiskModel for ThreadRngRisk {
    fn draw(&self, lo: f64, hi: f64) -> f64 {
        rand::thread_rng().gen_range(lo..hi)
    }
}

/// Always returns the same value, ignoring the requested range
#[derive(Debug, Clone, Copy)]
pub struct FixedRisk(pub f64);

impl RiskModel for FixedRisk {
    fn draw(&self, _lo: f64, _hi: f64) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_rng_draw_stays_in_range() {
        let model = ThreadRngRisk;
        for _ in 0..1000 {
            let v = model.draw(10.0, 50.0);
            assert!((10.0..50.0).contains(&v));
        }
    }

    #[test]
    fn fixed_risk_ignores_range() {
        assert_eq!(FixedRisk(7.5).draw(10.0, 50.0), 7.5);
    }
}
