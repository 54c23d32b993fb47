//! Count spec outcomes for a run.
//!
//! ## Notes
//! - **Invariant**: `passed + failed + pending <= total` at all times. `total` starts at the number of
//!   specs the engine declared, and grows if the engine reports more results than it declared.
//! - **Pass rate**: a run with zero specs has a pass rate of `0.0` rather than `NaN`.

use crate::results::{OverallStatus, SpecResult, SpecStatus};

/// Scalar counters accumulated from `spec-finished` callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunTally {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pending: usize,
}

impl RunTally {
    /// Start a tally for a run that declared `total_specs_defined` specs.
    pub fn new(total_specs_defined: usize) -> Self {
        Self {
            total: total_specs_defined,
            ..Self::default()
        }
    }

    /// Record one finished spec.
    ///
    /// ## Parameters
    /// - `result`: the finished spec.
    pub fn record(&mut self, result: &SpecResult) {
        match result.status {
            SpecStatus::Passed => self.passed += 1,
            SpecStatus::Failed => self.failed += 1,
            SpecStatus::Pending => self.pending += 1,
        }
        let seen = self.recorded();
        if seen > self.total {
            self.total = seen;
        }
    }

    /// Number of specs recorded so far.
    pub fn recorded(&self) -> usize {
        self.passed + self.failed + self.pending
    }

    /// Percentage of declared specs that passed.
    ///
    /// ## Returns
    /// - (`f64`): `passed / total * 100`, or `0.0` for an empty run.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.passed as f64 / self.total as f64) * 100.0
    }

    /// Derive the overall status of the run.
    ///
    /// ## Parameters
    /// - `stopped_early`: whether the engine halted before running every selected spec.
    pub fn overall(&self, stopped_early: bool) -> OverallStatus {
        if stopped_early {
            OverallStatus::Incomplete
        } else if self.failed > 0 {
            OverallStatus::Failed
        } else {
            OverallStatus::Passed
        }
    }
}
