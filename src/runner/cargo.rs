//! `cargo test` as the external engine
//!
//! [`CargoTestExecutor`] runs `cargo test` and captures its output; [`parse_libtest_output`] turns libtest's
//! plain-text format into a [`ParsedRun`]; [`replay`] feeds that run through the usual reporter lifecycle.
//!
//! The text format carries no per-test timing, so replayed results have no duration.

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use chrono::Utc;
use specreport_core::{FailedExpectation, RunInfo, RunTally, SpecResult, SuiteInfo};

use crate::report::{ReportError, Reporter, RunSummary};

/// Output of one `cargo test` invocation.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Execute a test command and capture its output.
///
/// The trait lets the adapter run against canned output in tests.
pub trait TestExecutor {
    fn execute(&self, project_dir: &Path, extra_args: &[String]) -> Result<CapturedOutput, ReportError>;
}

/// Runs `cargo test --no-fail-fast [-- ARGS]` in the project directory.
pub struct CargoTestExecutor;

impl TestExecutor for CargoTestExecutor {
    fn execute(&self, project_dir: &Path, extra_args: &[String]) -> Result<CapturedOutput, ReportError> {
        let mut cmd = Command::new("cargo");
        cmd.arg("test").arg("--no-fail-fast").current_dir(project_dir);
        if !extra_args.is_empty() {
            cmd.arg("--").args(extra_args);
        }
        tracing::debug!(dir = %project_dir.display(), ?extra_args, "running cargo test");

        let output = cmd
            .output()
            .map_err(|e| ReportError::Execution(format!("Failed to run cargo test: {}", e)))?;

        Ok(CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}

/// Outcome of one libtest test line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedOutcome {
    Ok,
    Failed,
    /// `ignored`, with the reason when one was given (`ignored, reason`)
    Ignored(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTest {
    pub name: String,
    pub outcome: ParsedOutcome,
    /// Index of the test binary, counted from its `running N tests` line
    pub binary: usize,
    /// Captured `---- NAME stdout ----` block from the same binary
    pub output: Option<String>,
}

/// Everything recovered from libtest output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRun {
    /// Sum of every `running N tests` line
    pub declared: usize,
    pub tests: Vec<ParsedTest>,
}

/// Name of the spec standing in for results lost when a test binary exits abnormally
pub const ABNORMAL_EXIT_SPEC: &str = "(abnormal exit)";

fn parse_running_line(line: &str) -> Option<usize> {
    let rest = line.strip_prefix("running ")?;
    let count = rest.strip_suffix(" tests").or_else(|| rest.strip_suffix(" test"))?;
    count.trim().parse().ok()
}

fn parse_test_line(line: &str) -> Option<ParsedTest> {
    let rest = line.strip_prefix("test ")?;
    let (name, result) = rest.split_once(" ... ")?;
    let result = result.trim();
    let outcome = if result == "ok" || result.starts_with("ok ") {
        ParsedOutcome::Ok
    } else if result.starts_with("FAILED") {
        ParsedOutcome::Failed
    } else if let Some(reason) = result.strip_prefix("ignored") {
        let reason = reason.trim_start_matches(',').trim();
        ParsedOutcome::Ignored((!reason.is_empty()).then(|| reason.to_string()))
    } else {
        return None;
    };
    Some(ParsedTest {
        name: name.trim().to_string(),
        outcome,
        binary: 0,
        output: None,
    })
}

fn parse_block_header(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("---- ")?.strip_suffix(" ----")?;
    inner
        .strip_suffix(" stdout")
        .or_else(|| inner.strip_suffix(" stderr"))
        .map(str::trim)
}

/// Parse libtest's plain-text output (possibly several test binaries back to back).
///
/// Each `running N tests` line starts a new binary; captured blocks attach to the matching test of the
/// binary they appear in.
pub fn parse_libtest_output(text: &str) -> ParsedRun {
    let mut run = ParsedRun::default();
    let mut block: Option<(String, Vec<&str>)> = None;
    let mut binaries: usize = 0;
    let mut binary_start = 0;

    let flush = |block: &mut Option<(String, Vec<&str>)>, run: &mut ParsedRun, binary_start: usize| {
        if let Some((name, lines)) = block.take() {
            let body = lines.join("\n").trim().to_string();
            let owner = run.tests[binary_start..]
                .iter_mut()
                .find(|t| t.name == name && t.output.is_none());
            match owner {
                Some(test) => test.output = Some(body),
                None => tracing::debug!(test = %name, "captured output for a test with no result line"),
            }
        }
    };

    for raw in text.lines() {
        let line = raw.trim_end();

        if let Some(name) = parse_block_header(line) {
            flush(&mut block, &mut run, binary_start);
            block = Some((name.to_string(), Vec::new()));
            continue;
        }

        if block.is_some() {
            if line == "failures:" || line == "successes:" || line.starts_with("test result:") {
                flush(&mut block, &mut run, binary_start);
            } else if let Some((_, lines)) = block.as_mut() {
                lines.push(line);
                continue;
            }
        }

        if let Some(count) = parse_running_line(line) {
            run.declared += count;
            binaries += 1;
            binary_start = run.tests.len();
        } else if let Some(mut test) = parse_test_line(line) {
            test.binary = binaries.saturating_sub(1);
            run.tests.push(test);
        }
    }
    flush(&mut block, &mut run, binary_start);

    run
}

/// Last `lines` lines of `text`.
pub fn tail_lines(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    all[all.len().saturating_sub(lines)..].join("\n")
}

/// Make a run whose process exited abnormally impossible to report as passed.
///
/// When results are missing (fewer test lines than declared), or the command failed with no failed test
/// to show for it, a failed [`ABNORMAL_EXIT_SPEC`] result carrying `stderr_tail` is appended.
///
/// ## Returns
/// - (`bool`): whether a result was appended.
pub fn account_for_exit(run: &mut ParsedRun, success: bool, stderr_tail: &str) -> bool {
    let reported = run.tests.len();
    let missing = run.declared > reported;
    let unexplained = !success && !run.tests.iter().any(|t| t.outcome == ParsedOutcome::Failed);
    if !missing && !unexplained {
        return false;
    }

    let message = if missing {
        format!(
            "test binary exited abnormally: {reported} of {} declared tests reported",
            run.declared
        )
    } else {
        "test command failed without a failing test".to_string()
    };
    tracing::warn!(reported, declared = run.declared, "abnormal test exit");
    run.tests.push(ParsedTest {
        name: ABNORMAL_EXIT_SPEC.to_string(),
        outcome: ParsedOutcome::Failed,
        binary: run.tests.last().map_or(0, |t| t.binary),
        output: Some(format!("{message}\n{stderr_tail}").trim_end().to_string()),
    });
    true
}

/// Split a captured failure block into (message, stack).
///
/// The message is the text following the `panicked at` line, up to the `note:` hint; the stack is the whole
/// block.
pub fn extract_failure(block: &str) -> (String, String) {
    let mut lines = block.lines();
    let mut message = Vec::new();

    while let Some(line) = lines.next() {
        if let Some(idx) = line.find("panicked at ") {
            let after = &line[idx + "panicked at ".len()..];
            // Pre-1.73 format: panicked at 'message', src/lib.rs:1:1
            if let Some(quoted) = after.strip_prefix('\'') {
                if let Some((msg, _)) = quoted.rsplit_once("', ") {
                    message.push(msg);
                }
            }
            for rest in lines.by_ref() {
                if rest.starts_with("note:") || rest.starts_with("stack backtrace:") {
                    break;
                }
                message.push(rest);
            }
            break;
        }
    }

    let message = message.join("\n").trim().to_string();
    let message = if message.is_empty() {
        block
            .lines()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("test failed")
            .trim()
            .to_string()
    } else {
        message
    };
    (message, block.to_string())
}

fn suite_of(test_name: &str) -> &str {
    if test_name.contains(" - ") && test_name.contains("(line ") {
        return "doctests";
    }
    test_name.rsplit_once("::").map(|(suite, _)| suite).unwrap_or("(root)")
}

fn description_of(test_name: &str) -> &str {
    test_name.rsplit_once("::").map(|(_, desc)| desc).unwrap_or(test_name)
}

/// Drive `reporter` through the lifecycle for a parsed run.
///
/// Consecutive tests sharing a module path are reported as one suite.
pub fn replay(run: &ParsedRun, elapsed: Duration, reporter: &mut dyn Reporter) -> Result<RunSummary, ReportError> {
    let total = run.declared.max(run.tests.len());
    reporter.run_started(&RunInfo {
        total_specs_defined: total,
    });

    let mut tally = RunTally::new(total);
    let mut current: Option<SuiteInfo> = None;
    let mut next_suite = 1;

    for (idx, test) in run.tests.iter().enumerate() {
        let suite_name = suite_of(&test.name);
        if current.as_ref().is_none_or(|s| s.full_name != suite_name) {
            if let Some(done) = current.take() {
                reporter.suite_finished(&done);
            }
            let info = SuiteInfo {
                id: format!("suite{next_suite}"),
                description: suite_name.to_string(),
                full_name: suite_name.to_string(),
            };
            next_suite += 1;
            reporter.suite_started(&info);
            current = Some(info);
        }

        let id = format!("spec{idx}");
        let description = description_of(&test.name);
        let result = match &test.outcome {
            ParsedOutcome::Ok => SpecResult::passed(id, description, test.name.clone(), None),
            ParsedOutcome::Ignored(_) => SpecResult::pending(id, description, test.name.clone()),
            ParsedOutcome::Failed => {
                let (message, stack) = match &test.output {
                    Some(block) => extract_failure(block),
                    None => ("test failed".to_string(), String::new()),
                };
                SpecResult::failed(
                    id,
                    description,
                    test.name.clone(),
                    None,
                    vec![FailedExpectation::new(message, stack)],
                )
            }
        };
        tally.record(&result);
        reporter.spec_finished(&result);
    }
    if let Some(done) = current.take() {
        reporter.suite_finished(&done);
    }

    let summary = RunSummary {
        tally,
        elapsed,
        finished_at: Utc::now(),
        overall: tally.overall(false),
    };
    reporter.run_finished(&summary)?;
    Ok(summary)
}
