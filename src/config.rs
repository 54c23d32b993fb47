//! Report configuration
//!
//! Precedence, lowest to highest: built-in defaults, environment (`SPECREPORT_OUTPUT_DIR`, `SPECREPORT_TITLE`),
//! then CLI flags applied through the builder methods.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the report directory
pub const OUTPUT_DIR_ENV: &str = "SPECREPORT_OUTPUT_DIR";
/// Environment variable overriding the report title
pub const TITLE_ENV: &str = "SPECREPORT_TITLE";

/// Report configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory the HTML report is written to
    pub output_dir: PathBuf,
    /// File name of the HTML report inside `output_dir`
    pub file_name: String,
    /// Report title (header and `<title>`)
    pub title: String,
    /// Optional JSON summary path
    pub json_path: Option<PathBuf>,
    /// Verbose console output (one line per spec)
    pub verbose: bool,
    /// Timeout applied to each async spec
    pub spec_timeout: Duration,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("test-reports"),
            file_name: "index.html".to_string(),
            title: "Spec Report".to_string(),
            json_path: None,
            verbose: false,
            // Matches Jasmine's default async timeout
            spec_timeout: Duration::from_secs(5),
        }
    }
}

impl ReportConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, overridden by any non-empty environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`ReportConfig::from_env`], reading variables through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!(dir = %dir, "output directory from environment");
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(title) = lookup(TITLE_ENV).filter(|v| !v.is_empty()) {
            config.title = title;
        }
        config
    }

    /// Full path of the HTML report
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the report file name
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Set the report title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Also write a JSON summary to `path`
    pub fn with_json_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.json_path = Some(path.into());
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the async spec timeout
    pub fn with_spec_timeout(mut self, timeout: Duration) -> Self {
        self.spec_timeout = timeout;
        self
    }
}
