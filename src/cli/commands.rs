//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;
use std::time::Instant;

use specreport_core::OverallStatus;

use crate::config::ReportConfig;
use crate::report::{ConsoleReporter, HtmlReporter, JsonReporter, ReportError, Reporters, RunSummary};
use crate::runner::cargo::{CargoTestExecutor, TestExecutor, account_for_exit, parse_libtest_output, replay, tail_lines};
use crate::runner::{RunOptions, Runner, describe_tree};
use crate::suites::builtin_suites;

use super::{CliResult, ExitCode};

/// Lines of stderr kept when `cargo test` produced no test output
const STDERR_TAIL_LINES: usize = 20;

/// Console, HTML, and (when configured) JSON reporters for one run.
fn build_reporters(config: &ReportConfig) -> Reporters {
    let mut reporters = Reporters::new();
    reporters.push(ConsoleReporter::new(config.verbose));
    reporters.push(HtmlReporter::new(config));
    if let Some(path) = &config.json_path {
        reporters.push(JsonReporter::new(path));
    }
    reporters
}

fn finish(config: &ReportConfig, summary: &RunSummary) -> ExitCode {
    println!("\nHTML report: {}", config.report_path().display());
    if let Some(json) = &config.json_path {
        println!("JSON summary: {}", json.display());
    }
    if summary.overall == OverallStatus::Passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// ============================================================================
// Built-in suites
// ============================================================================

/// Run the built-in suites through the in-process runner.
pub fn run_builtin(config: &ReportConfig, stop_on_fail: bool, filter: Option<String>) -> CliResult<ExitCode> {
    let options = RunOptions {
        filter,
        stop_on_fail,
        spec_timeout: config.spec_timeout,
    };
    let suites = builtin_suites();
    let mut reporters = build_reporters(config);

    let summary = Runner::new(options).run(&suites, &mut reporters)?;
    Ok(finish(config, &summary))
}

/// Print the built-in suite tree.
pub fn list_suites() -> CliResult<ExitCode> {
    print!("{}", describe_tree(&builtin_suites()));
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// cargo test
// ============================================================================

/// Run `cargo test` in `project_dir` and report the parsed results.
pub fn run_cargo(config: &ReportConfig, project_dir: &Path, test_args: &[String]) -> CliResult<ExitCode> {
    run_cargo_with(&CargoTestExecutor, config, project_dir, test_args)
}

/// Like [`run_cargo`], with the test command supplied by `executor`.
pub fn run_cargo_with(
    executor: &dyn TestExecutor,
    config: &ReportConfig,
    project_dir: &Path,
    test_args: &[String],
) -> CliResult<ExitCode> {
    if !project_dir.join("Cargo.toml").exists() {
        return Err(super::CliError::failure(format!(
            "Error: no Cargo.toml in {}",
            project_dir.display()
        )));
    }

    let start = Instant::now();
    let output = executor.execute(project_dir, test_args)?;
    let mut parsed = parse_libtest_output(&output.stdout);
    let tail = tail_lines(&output.stderr, STDERR_TAIL_LINES);

    if parsed.tests.is_empty() && !output.success {
        return Err(ReportError::Execution(format!("cargo test produced no results\n{tail}")).into());
    }
    tracing::info!(tests = parsed.tests.len(), declared = parsed.declared, "parsed cargo test output");
    account_for_exit(&mut parsed, output.success, &tail);

    let mut reporters = build_reporters(config);
    let summary = replay(&parsed, start.elapsed(), &mut reporters)?;
    Ok(finish(config, &summary))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::runner::cargo::CapturedOutput;
    use std::fs;

    struct Canned(CapturedOutput);

    impl TestExecutor for Canned {
        fn execute(&self, _dir: &Path, _args: &[String]) -> Result<CapturedOutput, ReportError> {
            Ok(self.0.clone())
        }
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"demo\"\n").unwrap();
        dir
    }

    #[test]
    fn test_cargo_run_writes_report() {
        let dir = project();
        let config = ReportConfig::new().with_output_dir(dir.path().join("reports"));
        let canned = Canned(CapturedOutput {
            stdout: "running 2 tests\ntest a::works ... ok\ntest a::breaks ... FAILED\n".to_string(),
            stderr: String::new(),
            success: false,
        });

        let code = run_cargo_with(&canned, &config, dir.path(), &[]).unwrap();
        assert_eq!(code, ExitCode::FAILURE);

        let html = fs::read_to_string(config.report_path()).unwrap();
        assert!(html.contains("a::works"));
        assert!(html.contains("a::breaks"));
    }

    #[test]
    fn test_cargo_crash_mid_run_fails() {
        let dir = project();
        let config = ReportConfig::new().with_output_dir(dir.path().join("reports"));
        let canned = Canned(CapturedOutput {
            stdout: "running 3 tests\ntest a::one ... ok\ntest a::two ... ok\n".to_string(),
            stderr: "thread 'a::three' has overflowed its stack\nfatal runtime error: stack overflow".to_string(),
            success: false,
        });

        let code = run_cargo_with(&canned, &config, dir.path(), &[]).unwrap();
        assert_eq!(code, ExitCode::FAILURE);

        let html = fs::read_to_string(config.report_path()).unwrap();
        assert!(html.contains("(abnormal exit)"));
        assert!(html.contains("has overflowed its stack"));
    }

    #[test]
    fn test_cargo_build_failure_is_an_error() {
        let dir = project();
        let config = ReportConfig::new().with_output_dir(dir.path().join("reports"));
        let canned = Canned(CapturedOutput {
            stdout: String::new(),
            stderr: "error[E0425]: cannot find value `x`\nerror: could not compile `demo`".to_string(),
            success: false,
        });

        let err = run_cargo_with(&canned, &config, dir.path(), &[]).unwrap_err();
        assert!(err.message.contains("could not compile"));
        assert!(!config.report_path().exists());
    }

    #[test]
    fn test_cargo_requires_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let canned = Canned(CapturedOutput::default());
        let err = run_cargo_with(&canned, &ReportConfig::new(), dir.path(), &[]).unwrap_err();
        assert!(err.message.contains("no Cargo.toml"));
    }

    #[test]
    fn test_builtin_run_passes() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::new()
            .with_output_dir(dir.path())
            .with_json_path(dir.path().join("summary.json"));

        let code = run_builtin(&config, false, Some("StringUtils".to_string())).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(config.report_path().exists());
        assert!(dir.path().join("summary.json").exists());
    }
}
