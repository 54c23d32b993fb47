//! CLI module for specreport
//!
//! ## Commands
//!
//! - `run` - Run the built-in suites and write the HTML report
//! - `cargo [path]` - Run `cargo test` in a project and report its results
//! - `list` - Print the built-in suite tree
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::ReportConfig;
use crate::report::ReportError;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ReportError> for CliError {
    fn from(err: ReportError) -> Self {
        Self::failure(format!("Error: {err}"))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run specs and write an HTML test report
#[derive(Parser, Debug)]
#[command(name = "specreport")]
#[command(version = VERSION)]
#[command(about = "Run specs and write an HTML test report", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Report flags shared by every command that produces a report
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Verbose output (one line per spec)
    #[arg(short, long)]
    pub verbose: bool,
    /// Directory for the HTML report [env: SPECREPORT_OUTPUT_DIR]
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
    /// Report title [env: SPECREPORT_TITLE]
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,
    /// Also write a JSON summary to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

impl ReportArgs {
    /// Layer these flags over `config`.
    pub fn apply(&self, mut config: ReportConfig) -> ReportConfig {
        config = config.with_verbose(self.verbose);
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(title) = &self.title {
            config = config.with_title(title);
        }
        if let Some(json) = &self.json {
            config = config.with_json_path(json);
        }
        config
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the built-in suites
    Run {
        #[command(flatten)]
        report: ReportArgs,
        /// Stop on first failure
        #[arg(short = 'x', long = "exitfirst")]
        stop_on_fail: bool,
        /// Only run specs whose full name contains EXPR
        #[arg(short = 'k', value_name = "EXPR")]
        filter: Option<String>,
        /// Timeout for each async spec, in milliseconds
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,
    },

    /// Run `cargo test` in a project and report its results
    Cargo {
        /// Project directory
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,
        #[command(flatten)]
        report: ReportArgs,
        /// Arguments passed to the test binaries (after `--`)
        #[arg(last = true, value_name = "ARGS")]
        test_args: Vec<String>,
    },

    /// List the built-in suites and specs
    List,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Run {
            report,
            stop_on_fail,
            filter,
            timeout_ms,
        } => {
            let mut config = report.apply(ReportConfig::from_env());
            if let Some(ms) = timeout_ms {
                config = config.with_spec_timeout(Duration::from_millis(ms));
            }
            commands::run_builtin(&config, stop_on_fail, filter)
        }
        Command::Cargo {
            path,
            report,
            test_args,
        } => {
            let config = report.apply(ReportConfig::from_env());
            commands::run_cargo(&config, &path, &test_args)
        }
        Command::List => commands::list_suites(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::try_parse_from(["specreport", "run", "-v", "-x", "-k", "Calculator"]).unwrap();
        if let Command::Run {
            report,
            stop_on_fail,
            filter,
            timeout_ms,
        } = cli.command
        {
            assert!(report.verbose);
            assert!(stop_on_fail);
            assert_eq!(filter.as_deref(), Some("Calculator"));
            assert!(timeout_ms.is_none());
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_parse_report_flags() {
        let cli = Cli::try_parse_from([
            "specreport",
            "run",
            "--output-dir",
            "out",
            "--title",
            "Nightly",
            "--json",
            "out/summary.json",
            "--timeout-ms",
            "250",
        ])
        .unwrap();
        let Command::Run { report, timeout_ms, .. } = cli.command else {
            panic!("Expected Run command");
        };
        let config = report.apply(ReportConfig::new());
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.title, "Nightly");
        assert_eq!(config.json_path, Some(PathBuf::from("out/summary.json")));
        assert_eq!(timeout_ms, Some(250));
    }

    #[test]
    fn test_cli_parse_cargo_with_trailing_args() {
        let cli = Cli::try_parse_from(["specreport", "cargo", "demo", "--", "--include-ignored"]).unwrap();
        if let Command::Cargo { path, test_args, .. } = cli.command {
            assert_eq!(path, PathBuf::from("demo"));
            assert_eq!(test_args, vec!["--include-ignored"]);
        } else {
            panic!("Expected Cargo command");
        }
    }

    #[test]
    fn test_cli_parse_cargo_default_path() {
        let cli = Cli::try_parse_from(["specreport", "cargo"]).unwrap();
        assert!(matches!(cli.command, Command::Cargo { ref path, .. } if path == &PathBuf::from(".")));
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::try_parse_from(["specreport", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn test_unflagged_args_keep_env_config() {
        let base = ReportConfig::new().with_title("From env");
        let config = ReportArgs::default().apply(base);
        assert_eq!(config.title, "From env");
    }

    #[test]
    fn test_report_error_maps_to_failure() {
        let err: CliError = ReportError::AlreadyRendered.into();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.starts_with("Error: "));
    }
}
