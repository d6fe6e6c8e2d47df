use std::time::Instant;

use crate::scheduler::CycleOutcome;

/// Rolling counters for the scan job, emitted via tracing after each cycle.
/// Nothing here is persisted; the engine is stateless across restarts.
#[derive(Debug, Default)]
pub struct ScanMetrics {
    pub cycles_run: u64,
    pub quotes_fetched: u64,
    pub fetch_failures: u64,
    pub alerts_dispatched: u64,
    pub alerts_suppressed: u64,
    pub last_cycle_ms: u64,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cycle(&mut self, outcome: &CycleOutcome, cycle_start: Instant) {
        self.cycles_run += 1;
        self.quotes_fetched += outcome.quotes_fetched as u64;
        self.fetch_failures += outcome.fetch_failures as u64;
        self.alerts_dispatched += outcome.alerts_dispatched as u64;
        self.alerts_suppressed += outcome.alerts_suppressed as u64;
        self.last_cycle_ms = cycle_start.elapsed().as_millis() as u64;
    }

    pub fn log_summary(&self) {
        tracing::info!(
            cycles = self.cycles_run,
            quotes_fetched = self.quotes_fetched,
            fetch_failures = self.fetch_failures,
            alerts_dispatched = self.alerts_dispatched,
            alerts_suppressed = self.alerts_suppressed,
            last_cycle_ms = self.last_cycle_ms,
            "scan metrics summary"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_across_cycles() {
        let mut metrics = ScanMetrics::new();
        let outcome = CycleOutcome {
            quotes_fetched: 3,
            fetch_failures: 1,
            alerts_dispatched: 2,
            alerts_suppressed: 0,
        };

        metrics.record_cycle(&outcome, Instant::now());
        metrics.record_cycle(&outcome, Instant::now());

        assert_eq!(metrics.cycles_run, 2);
        assert_eq!(metrics.quotes_fetched, 6);
        assert_eq!(metrics.fetch_failures, 2);
        assert_eq!(metrics.alerts_dispatched, 4);
    }
}
