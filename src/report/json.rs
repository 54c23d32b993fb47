//! JSON summary reporter

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use specreport_core::SpecResult;

use super::{ReportError, Reporter, RunSummary};

#[derive(Serialize)]
struct JsonExpectation<'a> {
    message: &'a str,
    stack: &'a str,
}

#[derive(Serialize)]
struct JsonSpec<'a> {
    id: &'a str,
    description: &'a str,
    full_name: &'a str,
    status: &'static str,
    duration_ms: u128,
    failed_expectations: Vec<JsonExpectation<'a>>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    overall: &'static str,
    total: usize,
    passed: usize,
    failed: usize,
    pending: usize,
    pass_rate: f64,
    elapsed_secs: f64,
    finished_at: String,
    specs: Vec<JsonSpec<'a>>,
}

/// Writes a machine-readable summary of the run to a JSON file.
pub struct JsonReporter {
    path: PathBuf,
    results: Vec<SpecResult>,
    written: bool,
}

impl JsonReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            results: Vec::new(),
            written: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn to_json(&self, summary: &RunSummary) -> Result<String, ReportError> {
        let specs = self
            .results
            .iter()
            .map(|r| JsonSpec {
                id: &r.id,
                description: &r.description,
                full_name: &r.full_name,
                status: r.status.as_str(),
                duration_ms: r.duration_ms(),
                failed_expectations: r
                    .failed_expectations
                    .iter()
                    .map(|f| JsonExpectation {
                        message: &f.message,
                        stack: &f.stack,
                    })
                    .collect(),
            })
            .collect();

        let report = JsonReport {
            overall: summary.overall.as_str(),
            total: summary.tally.total,
            passed: summary.tally.passed,
            failed: summary.tally.failed,
            pending: summary.tally.pending,
            pass_rate: summary.tally.pass_rate(),
            elapsed_secs: summary.elapsed.as_secs_f64(),
            finished_at: summary.finished_at.to_rfc3339(),
            specs,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

impl Reporter for JsonReporter {
    fn spec_finished(&mut self, result: &SpecResult) {
        self.results.push(result.clone());
    }

    fn run_finished(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        if self.written {
            return Err(ReportError::AlreadyRendered);
        }
        self.written = true;

        let json = self.to_json(summary)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| ReportError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, json).map_err(|source| ReportError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "JSON summary written");
        Ok(())
    }
}
