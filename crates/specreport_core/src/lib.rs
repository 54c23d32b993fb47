//! Provide the shared result vocabulary for the specreport runner and its reporters.
//!
//! Everything the lifecycle callbacks carry lives here, so the in-process runner, the `cargo test`
//! adapter and every reporter agree on one shape of "what happened".
//!
//! ## Notes
//!
//! - This crate is intentionally small and dependency-free: **no IO**, no global state.
//! - Current scope: lifecycle payload types ([`results`]), run counters ([`tally`]), and HTML escaping for
//!   untrusted text ([`escape`]).

pub mod escape;
pub mod results;
pub mod tally;

pub use escape::escape_html;
pub use results::{FailedExpectation, OverallStatus, RunInfo, SpecResult, SpecStatus, SuiteInfo};
pub use tally::RunTally;
