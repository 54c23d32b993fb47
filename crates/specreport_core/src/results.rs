//! Define the payloads carried by the four lifecycle callbacks.
//!
//! ## Notes
//! - Ids follow Jasmine numbering: specs are `spec0, spec1, ...`, suites are `suite1, suite2, ...`.
//! - `full_name` is the space-joined chain of suite descriptions followed by the spec description.

use std::time::Duration;

/// Outcome of a single spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecStatus {
    Passed,
    Failed,
    /// Declared but not executed (`xit`-style, or an ignored libtest test).
    Pending,
}

impl SpecStatus {
    /// Return the lowercase status word used in console and report output.
    ///
    /// ## Returns
    /// - (`&'static str`): `passed`, `failed`, or `pending`.
    pub fn as_str(self) -> &'static str {
        match self {
            SpecStatus::Passed => "passed",
            SpecStatus::Failed => "failed",
            SpecStatus::Pending => "pending",
        }
    }

    pub fn is_failed(self) -> bool {
        self == SpecStatus::Failed
    }
}

impl std::fmt::Display for SpecStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed expectation inside a spec: the message and the captured stack text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedExpectation {
    pub message: String,
    pub stack: String,
}

impl FailedExpectation {
    pub fn new(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: stack.into(),
        }
    }
}

/// Payload of the `spec-finished` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecResult {
    pub id: String,
    pub description: String,
    pub full_name: String,
    pub status: SpecStatus,
    /// `None` when the engine reports no timing for this spec.
    pub duration: Option<Duration>,
    pub failed_expectations: Vec<FailedExpectation>,
}

impl SpecResult {
    /// Build a passed result.
    pub fn passed(
        id: impl Into<String>,
        description: impl Into<String>,
        full_name: impl Into<String>,
        duration: Option<Duration>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            full_name: full_name.into(),
            status: SpecStatus::Passed,
            duration,
            failed_expectations: Vec::new(),
        }
    }

    /// Build a failed result carrying one or more failed expectations.
    pub fn failed(
        id: impl Into<String>,
        description: impl Into<String>,
        full_name: impl Into<String>,
        duration: Option<Duration>,
        failed_expectations: Vec<FailedExpectation>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            full_name: full_name.into(),
            status: SpecStatus::Failed,
            duration,
            failed_expectations,
        }
    }

    /// Build a pending result (never executed, so no duration).
    pub fn pending(id: impl Into<String>, description: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            full_name: full_name.into(),
            status: SpecStatus::Pending,
            duration: None,
            failed_expectations: Vec::new(),
        }
    }

    /// Duration in whole milliseconds; a missing duration counts as zero.
    pub fn duration_ms(&self) -> u128 {
        self.duration.map(|d| d.as_millis()).unwrap_or(0)
    }
}

/// Payload of the `suite-started` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteInfo {
    pub id: String,
    pub description: String,
    pub full_name: String,
}

/// Payload of the `run-started` callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunInfo {
    pub total_specs_defined: usize,
}

/// Overall outcome of a run, reported with `run-finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallStatus {
    Passed,
    Failed,
    /// The run halted before every selected spec executed (stop-on-fail).
    Incomplete,
}

impl OverallStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OverallStatus::Passed => "passed",
            OverallStatus::Failed => "failed",
            OverallStatus::Incomplete => "incomplete",
        }
    }
}
