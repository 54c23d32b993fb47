//! Console reporter (Jasmine-style progress)

use std::io::{self, IsTerminal, Write};

use specreport_core::{RunInfo, SpecResult, SpecStatus};

use super::{ReportError, Reporter, RunSummary};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD_RED: &str = "\x1b[1;31m";
const RESET: &str = "\x1b[0m";

/// Prints one character per spec (`.` passed, `F` failed, `*` pending), or one line per spec when verbose,
/// followed by failure details and a summary.
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    verbose: bool,
    color: bool,
    failures: Vec<SpecResult>,
}

impl ConsoleReporter<io::Stdout> {
    pub fn new(verbose: bool) -> Self {
        let color = io::stdout().is_terminal();
        Self::with_writer(io::stdout(), verbose, color)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn with_writer(out: W, verbose: bool, color: bool) -> Self {
        Self {
            out,
            verbose,
            color,
            failures: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn status_label(&self, result: &SpecResult) -> String {
        match result.status {
            SpecStatus::Passed => {
                if self.verbose {
                    format!("{} ({}ms)", self.paint(GREEN, "PASSED"), result.duration_ms())
                } else {
                    self.paint(GREEN, ".")
                }
            }
            SpecStatus::Failed => {
                if self.verbose {
                    format!("{} ({}ms)", self.paint(RED, "FAILED"), result.duration_ms())
                } else {
                    self.paint(RED, "F")
                }
            }
            SpecStatus::Pending => {
                if self.verbose {
                    self.paint(YELLOW, "PENDING")
                } else {
                    self.paint(YELLOW, "*")
                }
            }
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn run_started(&mut self, info: &RunInfo) {
        let _ = writeln!(self.out, "Running {} specs...\n", info.total_specs_defined);
    }

    fn spec_finished(&mut self, result: &SpecResult) {
        let label = self.status_label(result);
        let _ = if self.verbose {
            writeln!(self.out, "{} {}", result.full_name, label)
        } else {
            write!(self.out, "{}", label)
        };
        let _ = self.out.flush();

        if result.status.is_failed() {
            self.failures.push(result.clone());
        }
    }

    fn run_finished(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        self.write_summary(summary).map_err(ReportError::Console)
    }
}

impl<W: Write> ConsoleReporter<W> {
    fn write_summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        if !self.verbose {
            writeln!(self.out)?;
        }

        if !self.failures.is_empty() {
            let header = self.paint(BOLD_RED, "Failures:");
            writeln!(self.out, "\n{}", header)?;
            for (idx, failure) in self.failures.iter().enumerate() {
                writeln!(self.out, "{}) {}", idx + 1, failure.full_name)?;
                for expectation in &failure.failed_expectations {
                    writeln!(self.out, "  Message:\n    {}", expectation.message)?;
                    if !expectation.stack.is_empty() {
                        writeln!(self.out, "  Stack:")?;
                        for line in expectation.stack.lines() {
                            writeln!(self.out, "    {}", line)?;
                        }
                    }
                }
            }
        }

        let tally = &summary.tally;
        let mut line = format!("{} specs, {} failures", tally.total, tally.failed);
        if tally.pending > 0 {
            line.push_str(&format!(", {} pending specs", tally.pending));
        }
        writeln!(self.out, "\n{}", line)?;
        writeln!(self.out, "Finished in {:.3} seconds", summary.elapsed.as_secs_f64())?;
        if summary.overall == specreport_core::OverallStatus::Incomplete {
            writeln!(self.out, "Incomplete: stopped after first failure")?;
        }
        self.out.flush()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use specreport_core::{FailedExpectation, OverallStatus, RunTally};
    use std::time::Duration;

    fn run(verbose: bool, results: &[SpecResult]) -> String {
        let mut reporter = ConsoleReporter::with_writer(Vec::new(), verbose, false);
        reporter.run_started(&RunInfo {
            total_specs_defined: results.len(),
        });
        let mut tally = RunTally::new(results.len());
        for result in results {
            tally.record(result);
            reporter.spec_finished(result);
        }
        let overall = tally.overall(false);
        reporter
            .run_finished(&RunSummary {
                tally,
                elapsed: Duration::from_millis(1500),
                finished_at: Utc::now(),
                overall,
            })
            .unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    fn sample() -> Vec<SpecResult> {
        vec![
            SpecResult::passed("spec0", "adds", "Calc adds", Some(Duration::from_millis(3))),
            SpecResult::failed(
                "spec1",
                "divides",
                "Calc divides",
                Some(Duration::from_millis(1)),
                vec![FailedExpectation::new("expected 2, got 3", "at calc.rs:1:1")],
            ),
            SpecResult::pending("spec2", "later", "Calc later"),
        ]
    }

    #[test]
    fn test_progress_dots() {
        let out = run(false, &sample());
        assert!(out.starts_with("Running 3 specs...\n\n.F*\n"));
        assert!(out.contains("3 specs, 1 failures, 1 pending specs"));
        assert!(out.contains("Finished in 1.500 seconds"));
    }

    #[test]
    fn test_failure_details_are_listed() {
        let out = run(false, &sample());
        assert!(out.contains("1) Calc divides"));
        assert!(out.contains("expected 2, got 3"));
        assert!(out.contains("    at calc.rs:1:1"));
    }

    #[test]
    fn test_verbose_lines() {
        let out = run(true, &sample());
        assert!(out.contains("Calc adds PASSED (3ms)"));
        assert!(out.contains("Calc divides FAILED (1ms)"));
        assert!(out.contains("Calc later PENDING"));
    }

    #[test]
    fn test_incomplete_notice() {
        let mut reporter = ConsoleReporter::with_writer(Vec::new(), false, false);
        reporter
            .run_finished(&RunSummary {
                tally: RunTally::new(2),
                elapsed: Duration::ZERO,
                finished_at: Utc::now(),
                overall: OverallStatus::Incomplete,
            })
            .unwrap();
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.contains("Incomplete"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_summary_write_error_is_returned() {
        let mut reporter = ConsoleReporter::with_writer(ClosedPipe, false, false);
        let err = reporter
            .run_finished(&RunSummary {
                tally: RunTally::new(0),
                elapsed: Duration::ZERO,
                finished_at: Utc::now(),
                overall: OverallStatus::Passed,
            })
            .unwrap_err();
        assert!(matches!(err, ReportError::Console(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}
