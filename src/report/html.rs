//! Static HTML report
//!
//! [`HtmlReporter`] accumulates every `spec_finished` result and renders exactly once, in `run_finished`.
//! Rendering itself is the pure [`render_report`], so it can be tested without touching the filesystem.
//!
//! All spec-provided text (names, statuses, messages, stacks) and the title are escaped with
//! [`escape_html`]; a spec named `<b>` shows up as literal text, not markup.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use specreport_core::{RunInfo, SpecResult, SpecStatus, escape_html};

use super::{ReportError, Reporter, RunSummary};
use crate::config::ReportConfig;

/// Everything the renderer needs, borrowed from the reporter.
pub struct ReportData<'a> {
    pub title: &'a str,
    pub results: &'a [SpecResult],
    pub summary: &'a RunSummary,
}

pub struct HtmlReporter {
    title: String,
    path: PathBuf,
    results: Vec<SpecResult>,
    rendered: bool,
}

impl HtmlReporter {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            title: config.title.clone(),
            path: config.report_path(),
            results: Vec::new(),
            rendered: false,
        }
    }

    /// Where the report is (or will be) written.
    pub fn report_path(&self) -> &Path {
        &self.path
    }

    pub fn results(&self) -> &[SpecResult] {
        &self.results
    }
}

impl Reporter for HtmlReporter {
    fn run_started(&mut self, info: &RunInfo) {
        self.results.reserve(info.total_specs_defined);
    }

    fn spec_finished(&mut self, result: &SpecResult) {
        if self.rendered {
            tracing::warn!(spec = %result.full_name, "spec result arrived after the report was rendered");
            return;
        }
        self.results.push(result.clone());
    }

    fn run_finished(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        if self.rendered {
            return Err(ReportError::AlreadyRendered);
        }
        self.rendered = true;

        let html = render_report(&ReportData {
            title: &self.title,
            results: &self.results,
            summary,
        });

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| ReportError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, html).map_err(|source| ReportError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(path = %self.path.display(), specs = self.results.len(), "HTML report written");
        Ok(())
    }
}

// ============================================================================
// Rendering
// ============================================================================

const STYLE: &str = r#"    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif; background: #f5f5f5; padding: 20px; line-height: 1.6; }
    .container { max-width: 1200px; margin: 0 auto; background: white; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); overflow: hidden; }
    .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; text-align: center; }
    .header h1 { font-size: 2.5em; margin-bottom: 10px; }
    .header .timestamp { margin-top: 10px; font-size: 0.85em; opacity: 0.8; }
    .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; padding: 30px; background: #f8f9fa; }
    .summary-card { background: white; padding: 20px; border-radius: 8px; text-align: center; box-shadow: 0 2px 4px rgba(0,0,0,0.05); }
    .summary-card .number { font-size: 2.5em; font-weight: bold; margin-bottom: 5px; }
    .summary-card .label { color: #666; font-size: 0.9em; text-transform: uppercase; letter-spacing: 1px; }
    .summary-card.total .number { color: #667eea; }
    .summary-card.passed .number { color: #10b981; }
    .summary-card.failed .number { color: #ef4444; }
    .summary-card.rate .number { color: #3b82f6; }
    .summary-card.duration .number { font-size: 2em; }
    .results { padding: 30px; }
    .results h2 { font-size: 1.8em; margin-bottom: 20px; color: #333; }
    table { width: 100%; border-collapse: collapse; margin-top: 20px; }
    thead { background: #f8f9fa; }
    th { padding: 15px; text-align: left; font-weight: 600; color: #555; border-bottom: 2px solid #e5e7eb; }
    td { padding: 15px; border-bottom: 1px solid #e5e7eb; }
    tr.passed td { background: #f0fdf4; }
    tr.failed td { background: #fef2f2; }
    tr.pending td { background: #fffbeb; }
    .status-icon { display: inline-block; width: 24px; height: 24px; line-height: 24px; text-align: center; border-radius: 50%; font-weight: bold; color: white; }
    .status-icon.passed { background: #10b981; }
    .status-icon.failed { background: #ef4444; }
    .status-icon.pending { background: #f59e0b; }
    .failure-details details { margin: 10px 0; padding: 15px; background: #fff5f5; border-left: 4px solid #ef4444; border-radius: 4px; }
    .error-message { color: #dc2626; font-weight: 600; cursor: pointer; }
    .error-stack { margin-top: 10px; background: #1f2937; color: #f3f4f6; padding: 15px; border-radius: 4px; overflow-x: auto; font-size: 0.85em; line-height: 1.5; }
    .failure-row td { padding: 0 15px 15px 15px; }
    .footer { text-align: center; padding: 20px; background: #f8f9fa; color: #666; font-size: 0.9em; }
"#;

fn status_icon(status: SpecStatus) -> &'static str {
    match status {
        SpecStatus::Passed => "✓",
        SpecStatus::Failed => "✗",
        SpecStatus::Pending => "•",
    }
}

/// Render the table row (plus a failure row for failed specs) for one result.
pub fn render_spec_row(result: &SpecResult) -> String {
    let status = result.status.as_str();
    let mut out = String::new();
    // Writing to String cannot fail.
    let _ = writeln!(out, "<tr class=\"{status}\">");
    let _ = writeln!(
        out,
        "  <td><span class=\"status-icon {status}\">{}</span></td>",
        status_icon(result.status)
    );
    let _ = writeln!(out, "  <td>{}</td>", escape_html(&result.full_name));
    let _ = writeln!(out, "  <td>{status}</td>");
    let _ = writeln!(out, "  <td>{}ms</td>", result.duration_ms());
    out.push_str("</tr>\n");

    if result.status.is_failed() && !result.failed_expectations.is_empty() {
        out.push_str("<tr class=\"failure-row\">\n  <td colspan=\"4\">\n    <div class=\"failure-details\">\n");
        for expectation in &result.failed_expectations {
            out.push_str("      <details open>\n");
            let _ = writeln!(
                out,
                "        <summary class=\"error-message\">{}</summary>",
                escape_html(&expectation.message)
            );
            let _ = writeln!(
                out,
                "        <pre class=\"error-stack\">{}</pre>",
                escape_html(&expectation.stack)
            );
            out.push_str("      </details>\n");
        }
        out.push_str("    </div>\n  </td>\n</tr>\n");
    }
    out
}

fn summary_card(out: &mut String, class: &str, number: &str, label: &str) {
    let _ = writeln!(
        out,
        "      <div class=\"summary-card {class}\">\n        <div class=\"number\">{number}</div>\n        <div class=\"label\">{label}</div>\n      </div>"
    );
}

/// Render the complete report document.
pub fn render_report(data: &ReportData<'_>) -> String {
    let tally = &data.summary.tally;
    let title = escape_html(data.title);
    let mut out = String::with_capacity(8 * 1024 + data.results.len() * 256);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("  <meta charset=\"UTF-8\">\n");
    out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    let _ = writeln!(out, "  <title>{title}</title>");
    out.push_str("  <style>\n");
    out.push_str(STYLE);
    out.push_str("  </style>\n</head>\n<body>\n  <div class=\"container\">\n");

    out.push_str("    <div class=\"header\">\n");
    let _ = writeln!(out, "      <h1>{title}</h1>");
    let _ = writeln!(
        out,
        "      <div class=\"subtitle\">Overall: {}</div>",
        data.summary.overall.as_str()
    );
    let _ = writeln!(
        out,
        "      <div class=\"timestamp\">Generated: {}</div>",
        data.summary.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out.push_str("    </div>\n");

    out.push_str("    <div class=\"summary\">\n");
    summary_card(&mut out, "total", &tally.total.to_string(), "Total");
    summary_card(&mut out, "passed", &tally.passed.to_string(), "Passed");
    summary_card(&mut out, "failed", &tally.failed.to_string(), "Failed");
    if tally.pending > 0 {
        summary_card(&mut out, "pending", &tally.pending.to_string(), "Pending");
    }
    summary_card(&mut out, "rate", &format!("{:.2}%", tally.pass_rate()), "Pass rate");
    summary_card(
        &mut out,
        "duration",
        &format!("{:.2}s", data.summary.elapsed.as_secs_f64()),
        "Duration",
    );
    out.push_str("    </div>\n");

    out.push_str("    <div class=\"results\">\n      <h2>Results</h2>\n      <table>\n");
    out.push_str("        <thead>\n          <tr>\n");
    out.push_str("            <th style=\"width: 50px;\">Status</th>\n");
    out.push_str("            <th>Spec</th>\n");
    out.push_str("            <th style=\"width: 100px;\">Result</th>\n");
    out.push_str("            <th style=\"width: 100px;\">Time</th>\n");
    out.push_str("          </tr>\n        </thead>\n        <tbody>\n");
    for result in data.results {
        out.push_str(&render_spec_row(result));
    }
    out.push_str("        </tbody>\n      </table>\n    </div>\n");

    out.push_str("    <div class=\"footer\">\n");
    let _ = writeln!(out, "      <div>Generated by specreport {}</div>", env!("CARGO_PKG_VERSION"));
    out.push_str("    </div>\n  </div>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use specreport_core::{FailedExpectation, RunTally};
    use std::time::Duration;

    fn summary_for(results: &[SpecResult]) -> RunSummary {
        let mut tally = RunTally::new(results.len());
        for r in results {
            tally.record(r);
        }
        RunSummary {
            overall: tally.overall(false),
            tally,
            elapsed: Duration::from_millis(1234),
            finished_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        }
    }

    fn sample() -> Vec<SpecResult> {
        vec![
            SpecResult::passed("spec0", "adds", "Calculator adds", Some(Duration::from_millis(2))),
            SpecResult::failed(
                "spec1",
                "divides",
                "Calculator divides",
                None,
                vec![FailedExpectation::new("expected 2", "panicked at src/calc.rs:9:5")],
            ),
        ]
    }

    #[test]
    fn test_summary_numbers() {
        let results = sample();
        let summary = summary_for(&results);
        let html = render_report(&ReportData {
            title: "Demo",
            results: &results,
            summary: &summary,
        });
        assert!(html.contains("<div class=\"number\">2</div>"));
        assert!(html.contains("<div class=\"number\">50.00%</div>"));
        assert!(html.contains("<div class=\"number\">1.23s</div>"));
        assert!(html.contains("Generated: 2024-05-01 12:30:00 UTC"));
        assert!(html.contains("Overall: failed"));
        assert!(!html.contains("summary-card pending"));
    }

    #[test]
    fn test_failure_row_only_for_failed_specs() {
        let results = sample();
        assert!(!render_spec_row(&results[0]).contains("failure-row"));
        let failed = render_spec_row(&results[1]);
        assert!(failed.contains("failure-row"));
        assert!(failed.contains("<pre class=\"error-stack\">panicked at src/calc.rs:9:5</pre>"));
        assert!(failed.contains("<td>0ms</td>"));
    }

    #[test]
    fn test_markup_in_names_is_escaped() {
        let result = SpecResult::failed(
            "spec0",
            "<img src=x>",
            "Suite <img src=x>",
            None,
            vec![FailedExpectation::new("<b>bold</b>", "a & b")],
        );
        let row = render_spec_row(&result);
        assert!(row.contains("Suite &lt;img src=x&gt;"));
        assert!(row.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(row.contains("a &amp; b"));
        assert!(!row.contains("<img"));
    }

    #[test]
    fn test_empty_run_renders_zero_rate() {
        let summary = summary_for(&[]);
        let html = render_report(&ReportData {
            title: "Empty",
            results: &[],
            summary: &summary,
        });
        assert!(html.contains("0.00%"));
        assert!(html.contains("<tbody>\n        </tbody>"));
    }

    #[test]
    fn test_render_happens_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::new().with_output_dir(dir.path().join("nested"));
        let mut reporter = HtmlReporter::new(&config);
        let results = sample();
        for r in &results {
            reporter.spec_finished(r);
        }
        let summary = summary_for(&results);

        reporter.run_finished(&summary).unwrap();
        let written = fs::read_to_string(reporter.report_path()).unwrap();
        assert!(written.contains("Calculator divides"));

        let again = reporter.run_finished(&summary);
        assert!(matches!(again, Err(ReportError::AlreadyRendered)));

        // Late results are not recorded
        reporter.spec_finished(&SpecResult::pending("spec9", "late", "late"));
        assert_eq!(reporter.results().len(), 2);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let config = ReportConfig::new().with_output_dir(blocker.join("reports"));
        let mut reporter = HtmlReporter::new(&config);
        let err = reporter.run_finished(&summary_for(&[])).unwrap_err();
        assert!(matches!(err, ReportError::Write { .. }));
    }
}
