//! In-process spec runner (Jasmine-style)
//!
//! Suites are trees of `describe`-like groups holding specs, in declaration order. The runner walks them
//! depth-first, executes each selected spec, and drives a [`Reporter`] through the lifecycle:
//! `run_started`, then `suite_started` / `spec_finished` / `suite_finished` per suite, then exactly one
//! `run_finished`.
//!
//! ## Spec bodies
//!
//! - sync: a plain closure; failing means panicking (`assert!`, `assert_eq!`, `panic!`)
//! - async: a closure returning a future, run to completion on a fresh current-thread tokio runtime under
//!   the configured timeout
//! - pending: declared but never executed
//!
//! The `cargo` submodule adapts `cargo test` output to the same reporter lifecycle.

pub mod capture;
pub mod cargo;

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::time::{Duration, Instant};

use chrono::Utc;
use specreport_core::{FailedExpectation, RunInfo, RunTally, SpecResult, SuiteInfo};

use crate::report::{ReportError, Reporter, RunSummary};
use capture::HookGuard;

pub type BoxFuture = Pin<Box<dyn Future<Output = ()>>>;

enum SpecBody {
    Sync(Box<dyn Fn()>),
    Async(Box<dyn Fn() -> BoxFuture>),
    Pending,
}

/// A single spec (`it`).
pub struct Spec {
    description: String,
    body: SpecBody,
}

impl Spec {
    pub fn new(description: impl Into<String>, body: impl Fn() + 'static) -> Self {
        Self {
            description: description.into(),
            body: SpecBody::Sync(Box::new(body)),
        }
    }

    pub fn asynchronous<F, Fut>(description: impl Into<String>, body: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        Self {
            description: description.into(),
            body: SpecBody::Async(Box::new(move || Box::pin(body()) as BoxFuture)),
        }
    }

    pub fn pending(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            body: SpecBody::Pending,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.body, SpecBody::Pending)
    }
}

enum Node {
    Spec(Spec),
    Suite(Suite),
}

/// A group of specs and nested suites (`describe`).
pub struct Suite {
    description: String,
    nodes: Vec<Node>,
}

impl Suite {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            nodes: Vec::new(),
        }
    }

    /// Add a sync spec.
    pub fn it(mut self, description: impl Into<String>, body: impl Fn() + 'static) -> Self {
        self.nodes.push(Node::Spec(Spec::new(description, body)));
        self
    }

    /// Add an async spec.
    pub fn it_async<F, Fut>(mut self, description: impl Into<String>, body: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.nodes.push(Node::Spec(Spec::asynchronous(description, body)));
        self
    }

    /// Add a pending spec (`xit`).
    pub fn xit(mut self, description: impl Into<String>) -> Self {
        self.nodes.push(Node::Spec(Spec::pending(description)));
        self
    }

    pub fn spec(mut self, spec: Spec) -> Self {
        self.nodes.push(Node::Spec(spec));
        self
    }

    /// Nest a child suite.
    pub fn describe(mut self, child: Suite) -> Self {
        self.nodes.push(Node::Suite(child));
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of specs in this suite and every nested suite.
    pub fn spec_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| match n {
                Node::Spec(_) => 1,
                Node::Suite(s) => s.spec_count(),
            })
            .sum()
    }
}

fn join_name(parent: &str, description: &str) -> String {
    if parent.is_empty() {
        description.to_string()
    } else {
        format!("{parent} {description}")
    }
}

/// Runner options
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Only run specs whose full name contains this substring
    pub filter: Option<String>,
    /// Halt after the first failed spec
    pub stop_on_fail: bool,
    /// Timeout applied to each async spec
    pub spec_timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            filter: None,
            stop_on_fail: false,
            spec_timeout: Duration::from_secs(5),
        }
    }
}

struct RunState {
    tally: RunTally,
    next_spec: usize,
    next_suite: usize,
    stopped: bool,
}

enum Failure {
    Panic(String),
    Timeout,
    Runtime(String),
}

pub struct Runner {
    options: RunOptions,
}

impl Runner {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    fn selected(&self, full_name: &str) -> bool {
        self.options.filter.as_deref().is_none_or(|f| full_name.contains(f))
    }

    fn count_selected(&self, suite: &Suite, parent: &str) -> usize {
        let full_name = join_name(parent, &suite.description);
        suite
            .nodes
            .iter()
            .map(|node| match node {
                Node::Spec(spec) => usize::from(self.selected(&join_name(&full_name, &spec.description))),
                Node::Suite(child) => self.count_selected(child, &full_name),
            })
            .sum()
    }

    /// Run `suites` in declaration order, reporting to `reporter`.
    ///
    /// ## Errors
    ///
    /// Returns the reporter's error if `run_finished` fails (rendering or writing a report). Spec failures
    /// are not errors; they are reflected in the returned summary.
    pub fn run(&self, suites: &[Suite], reporter: &mut dyn Reporter) -> Result<RunSummary, ReportError> {
        let start = Instant::now();
        let total: usize = suites.iter().map(|s| self.count_selected(s, "")).sum();
        tracing::info!(total, "run started");
        reporter.run_started(&RunInfo {
            total_specs_defined: total,
        });

        let mut state = RunState {
            tally: RunTally::new(total),
            next_spec: 0,
            next_suite: 1,
            stopped: false,
        };

        {
            let _guard = HookGuard::install();
            for suite in suites {
                if state.stopped {
                    break;
                }
                self.run_suite(suite, "", &mut state, reporter);
            }
        }

        let summary = RunSummary {
            tally: state.tally,
            elapsed: start.elapsed(),
            finished_at: Utc::now(),
            overall: state.tally.overall(state.stopped),
        };
        tracing::info!(
            passed = summary.tally.passed,
            failed = summary.tally.failed,
            pending = summary.tally.pending,
            "run finished"
        );
        reporter.run_finished(&summary)?;
        Ok(summary)
    }

    fn run_suite(&self, suite: &Suite, parent: &str, state: &mut RunState, reporter: &mut dyn Reporter) {
        if self.count_selected(suite, parent) == 0 {
            return;
        }

        let full_name = join_name(parent, &suite.description);
        let info = SuiteInfo {
            id: format!("suite{}", state.next_suite),
            description: suite.description.clone(),
            full_name: full_name.clone(),
        };
        state.next_suite += 1;
        reporter.suite_started(&info);

        for node in &suite.nodes {
            if state.stopped {
                break;
            }
            match node {
                Node::Spec(spec) => {
                    let spec_name = join_name(&full_name, &spec.description);
                    if !self.selected(&spec_name) {
                        continue;
                    }
                    let id = format!("spec{}", state.next_spec);
                    state.next_spec += 1;

                    let result = self.execute(spec, id, spec_name);
                    state.tally.record(&result);
                    reporter.spec_finished(&result);

                    if result.status.is_failed() && self.options.stop_on_fail {
                        tracing::info!(spec = %result.full_name, "stopping after first failure");
                        state.stopped = true;
                    }
                }
                Node::Suite(child) => self.run_suite(child, &full_name, state, reporter),
            }
        }

        reporter.suite_finished(&info);
    }

    fn execute(&self, spec: &Spec, id: String, full_name: String) -> SpecResult {
        let start = Instant::now();
        let outcome = match &spec.body {
            SpecBody::Pending => {
                tracing::debug!(spec = %full_name, "pending");
                return SpecResult::pending(id, spec.description.clone(), full_name);
            }
            SpecBody::Sync(body) => panic::catch_unwind(AssertUnwindSafe(|| body()))
                .map_err(|payload| Failure::Panic(capture::payload_message(payload.as_ref()))),
            SpecBody::Async(body) => self.execute_async(body.as_ref()),
        };
        let duration = Some(start.elapsed());
        tracing::debug!(spec = %full_name, ok = outcome.is_ok(), "spec finished");

        match outcome {
            Ok(()) => SpecResult::passed(id, spec.description.clone(), full_name, duration),
            Err(failure) => {
                let expectation = match failure {
                    Failure::Panic(message) => {
                        let stack = capture::take_last().unwrap_or_default().stack();
                        FailedExpectation::new(message, stack)
                    }
                    Failure::Timeout => FailedExpectation::new(
                        format!(
                            "Timeout - spec did not complete within {}ms",
                            self.options.spec_timeout.as_millis()
                        ),
                        String::new(),
                    ),
                    Failure::Runtime(message) => FailedExpectation::new(message, String::new()),
                };
                SpecResult::failed(id, spec.description.clone(), full_name, duration, vec![expectation])
            }
        }
    }

    fn execute_async(&self, body: &dyn Fn() -> BoxFuture) -> Result<(), Failure> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Failure::Runtime(format!("failed to start async runtime: {e}")))?;
        let timeout = self.options.spec_timeout;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            runtime.block_on(async { tokio::time::timeout(timeout, body()).await })
        }));
        match outcome {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_elapsed)) => Err(Failure::Timeout),
            Err(payload) => Err(Failure::Panic(capture::payload_message(payload.as_ref()))),
        }
    }
}

/// Render the suite tree as indented lines (for listing).
pub fn describe_tree(suites: &[Suite]) -> String {
    fn walk(suite: &Suite, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&suite.description);
        out.push_str(&format!(" ({} specs)\n", suite.spec_count()));
        for node in &suite.nodes {
            match node {
                Node::Spec(spec) => {
                    out.push_str(&"  ".repeat(depth + 1));
                    out.push_str(if spec.is_pending() { "- (pending) " } else { "- " });
                    out.push_str(&spec.description);
                    out.push('\n');
                }
                Node::Suite(child) => walk(child, depth + 1, out),
            }
        }
    }

    let mut out = String::new();
    for suite in suites {
        walk(suite, 0, &mut out);
    }
    out
}
