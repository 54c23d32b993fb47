#![forbid(unsafe_code)]
//! specreport: run specs, collect their results, and write a static HTML report
//!
//! Two engines drive the same [`Reporter`](report::Reporter) lifecycle: the in-process
//! [`Runner`](runner::Runner) (nested suites of sync, async, and pending specs) and the `cargo test`
//! adapter in [`runner::cargo`]. The demo code under test lives in `specreport_demo`; result types and
//! counters live in `specreport_core`.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Spec bodies**: assertions panic; the runner catches the unwind and records a
//!   failed expectation.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod doubles;
pub mod report;
pub mod runner;
pub mod suites;

pub use config::ReportConfig;
pub use doubles::{Spy, SpyError};
pub use report::{ConsoleReporter, HtmlReporter, JsonReporter, ReportError, Reporter, Reporters, RunSummary};
pub use runner::{RunOptions, Runner, Spec, Suite};
pub use specreport_core::{FailedExpectation, OverallStatus, RunInfo, RunTally, SpecResult, SpecStatus, SuiteInfo};
