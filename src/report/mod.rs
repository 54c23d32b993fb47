//! Test-result reporting
//!
//! ## Reporter Trait
//!
//! Engines (the in-process [`Runner`](crate::runner::Runner) and the `cargo test` adapter) drive reporters
//! through four lifecycle callbacks, in the order the engine emits them:
//!
//! 1. `run_started` - once, with the number of specs selected
//! 2. `suite_started` / `suite_finished` - around each suite that has selected specs
//! 3. `spec_finished` - once per spec, in execution order
//! 4. `run_finished` - once, after the last spec result
//!
//! Only `run_finished` can fail: it is where reporters render and write. A failure there is fatal to the run
//! and propagates to the CLI.
//!
//! ## Reporters
//!
//! - `console` - progress dots (or verbose lines) and a summary on the terminal
//! - `html` - accumulates every result, then renders a single static report
//! - `json` - machine-readable summary next to the HTML report

pub mod console;
pub mod html;
pub mod json;

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use specreport_core::{OverallStatus, RunInfo, RunTally, SpecResult, SuiteInfo};
use thiserror::Error;

pub use console::ConsoleReporter;
pub use html::{HtmlReporter, ReportData, render_report};
pub use json::JsonReporter;

/// Errors raised while producing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write console output: {0}")]
    Console(#[source] std::io::Error),

    #[error("report already rendered; run_finished was called more than once")]
    AlreadyRendered,

    #[error("failed to serialize JSON summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("test execution failed: {0}")]
    Execution(String),
}

/// Payload of the `run-finished` callback.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub tally: RunTally,
    pub elapsed: Duration,
    pub finished_at: DateTime<Utc>,
    pub overall: OverallStatus,
}

/// Trait for receiving test lifecycle events.
///
/// Implement this trait to add an output format.
pub trait Reporter {
    /// Called once before any spec runs
    fn run_started(&mut self, _info: &RunInfo) {}

    /// Called when a suite with at least one selected spec begins
    fn suite_started(&mut self, _suite: &SuiteInfo) {}

    /// Called after the last spec of a suite (and its child suites)
    fn suite_finished(&mut self, _suite: &SuiteInfo) {}

    /// Called when a spec completes
    fn spec_finished(&mut self, result: &SpecResult);

    /// Called once, after the last spec result
    fn run_finished(&mut self, summary: &RunSummary) -> Result<(), ReportError>;
}

/// Fan-out over several reporters, in registration order.
#[derive(Default)]
pub struct Reporters {
    inner: Vec<Box<dyn Reporter>>,
}

impl Reporters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reporter: impl Reporter + 'static) {
        self.inner.push(Box::new(reporter));
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Reporter for Reporters {
    fn run_started(&mut self, info: &RunInfo) {
        for reporter in &mut self.inner {
            reporter.run_started(info);
        }
    }

    fn suite_started(&mut self, suite: &SuiteInfo) {
        for reporter in &mut self.inner {
            reporter.suite_started(suite);
        }
    }

    fn suite_finished(&mut self, suite: &SuiteInfo) {
        for reporter in &mut self.inner {
            reporter.suite_finished(suite);
        }
    }

    fn spec_finished(&mut self, result: &SpecResult) {
        for reporter in &mut self.inner {
            reporter.spec_finished(result);
        }
    }

    /// Every reporter gets `run_finished` even if an earlier one failed; the first error is returned.
    fn run_finished(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        let mut first_err = None;
        for reporter in &mut self.inner {
            if let Err(e) = reporter.run_finished(summary) {
                tracing::error!("reporter failed: {}", e);
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recording {
        log: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl Reporter for Recording {
        fn run_started(&mut self, info: &RunInfo) {
            self.log.borrow_mut().push(format!("start:{}", info.total_specs_defined));
        }

        fn spec_finished(&mut self, result: &SpecResult) {
            self.log.borrow_mut().push(format!("spec:{}", result.full_name));
        }

        fn run_finished(&mut self, _summary: &RunSummary) -> Result<(), ReportError> {
            self.log.borrow_mut().push("done".to_string());
            if self.fail { Err(ReportError::AlreadyRendered) } else { Ok(()) }
        }
    }

    fn summary() -> RunSummary {
        RunSummary {
            tally: RunTally::new(1),
            elapsed: Duration::from_millis(5),
            finished_at: Utc::now(),
            overall: OverallStatus::Passed,
        }
    }

    #[test]
    fn test_fan_out_preserves_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut reporters = Reporters::new();
        reporters.push(Recording {
            log: Rc::clone(&log),
            fail: false,
        });
        reporters.push(Recording {
            log: Rc::clone(&log),
            fail: false,
        });

        reporters.run_started(&RunInfo { total_specs_defined: 1 });
        reporters.spec_finished(&SpecResult::passed("spec0", "a", "S a", None));
        reporters.run_finished(&summary()).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["start:1", "start:1", "spec:S a", "spec:S a", "done", "done"]
        );
    }

    #[test]
    fn test_first_error_wins_but_all_finish() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut reporters = Reporters::new();
        reporters.push(Recording {
            log: Rc::clone(&log),
            fail: true,
        });
        reporters.push(Recording {
            log: Rc::clone(&log),
            fail: false,
        });

        let err = reporters.run_finished(&summary()).unwrap_err();
        assert!(matches!(err, ReportError::AlreadyRendered));
        assert_eq!(log.borrow().iter().filter(|l| *l == "done").count(), 2);
    }
}
