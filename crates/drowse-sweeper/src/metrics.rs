//! Metrics collection for sweep operations

use drowse_domain::KeepReason;
use std::collections::HashMap;

/// Cumulative counters for sweep operations.
///
/// Counters accumulate across ticks until [`reset`](Self::reset) is
/// called; each completed tick also returns a clone of the current
/// totals.
#[derive(Debug, Clone, Default)]
pub struct SweepMetrics {
    /// Resources evaluated across all ticks
    pub evaluated: usize,
    /// Suspend actions successfully issued
    pub discarded: usize,
    /// Suspend actions that reported an error
    pub discard_failures: usize,
    /// Resources kept, by the guard that held
    pub kept: HashMap<KeepReason, usize>,
    /// Records garbage-collected for resources no longer reported live
    pub reclaimed: usize,
    /// Completed sweep ticks
    pub sweep_count: usize,
    /// Total time spent sweeping, in milliseconds
    pub total_runtime_ms: u64,
}

impl SweepMetrics {
    /// Create a new metrics collector with zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one policy evaluation
    pub fn record_evaluation(&mut self) {
        self.evaluated += 1;
    }

    /// Record a resource kept for `reason`
    pub fn record_kept(&mut self, reason: KeepReason) {
        *self.kept.entry(reason).or_insert(0) += 1;
    }

    /// Record a successful suspend action
    pub fn record_discard(&mut self) {
        self.discarded += 1;
    }

    /// Record a suspend action the host refused
    pub fn record_discard_failure(&mut self) {
        self.discard_failures += 1;
    }

    /// Record `count` records reclaimed by reconciliation
    pub fn record_reclaimed(&mut self, count: usize) {
        self.reclaimed += count;
    }

    /// Record one completed sweep tick
    pub fn record_sweep(&mut self) {
        self.sweep_count += 1;
    }

    /// Total resources kept, across all reasons
    pub fn total_kept(&self) -> usize {
        self.kept.values().sum()
    }

    /// Resources kept for one particular reason
    pub fn kept_for(&self, reason: KeepReason) -> usize {
        self.kept.get(&reason).copied().unwrap_or(0)
    }

    /// Reset all counters to zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a human-readable summary of all metrics
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Sweep Metrics Summary\n");
        summary.push_str("=====================\n");
        summary.push_str(&format!("Sweep ticks: {}\n", self.sweep_count));
        summary.push_str(&format!("Total runtime: {}ms\n", self.total_runtime_ms));
        summary.push_str(&format!("Evaluated: {}\n", self.evaluated));
        summary.push_str(&format!(
            "Discarded: {} ({} failed)\n",
            self.discarded, self.discard_failures
        ));
        summary.push_str(&format!("Reclaimed records: {}\n", self.reclaimed));

        summary.push_str(&format!("Kept: {}\n", self.total_kept()));
        let mut kept: Vec<(&KeepReason, &usize)> = self.kept.iter().collect();
        kept.sort_by_key(|(reason, _)| reason.as_str());
        for (reason, count) in kept {
            summary.push_str(&format!("  {}: {}\n", reason, count));
        }

        summary
    }
}
