//! End-to-end runs through the reporters

use std::fs;

use specreport::report::ReportError;
use specreport::suites::builtin_suites;
use specreport::{HtmlReporter, OverallStatus, ReportConfig, Reporter, RunOptions, Runner, Suite};

fn config_in(dir: &tempfile::TempDir) -> ReportConfig {
    ReportConfig::new().with_output_dir(dir.path().join("reports")).with_title("Integration")
}

#[test]
fn test_builtin_calculator_suite_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(&dir);
    let mut html = HtmlReporter::new(&config);

    let options = RunOptions {
        filter: Some("Calculator".to_string()),
        ..RunOptions::default()
    };
    let summary = Runner::new(options).run(&builtin_suites(), &mut html).expect("run");

    assert_eq!(summary.overall, OverallStatus::Passed);
    assert_eq!(summary.tally.total, 9);
    assert_eq!(summary.tally.passed, 9);

    let report = fs::read_to_string(config.report_path()).expect("report written");
    assert!(report.contains("<title>Integration</title>"));
    assert!(report.contains("Calculator basic operations adds"));
    assert!(report.contains("100.00%"));
    assert_eq!(report.matches("<tr class=\"passed\">").count(), 9);
}

#[test]
fn test_failures_are_escaped_and_counted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(&dir);
    let mut html = HtmlReporter::new(&config);

    let suites = vec![
        Suite::new("<Widget>")
            .it("renders", || {})
            .it("breaks", || panic!("expected <div> & got <span>"))
            .xit("someday"),
    ];
    let summary = Runner::new(RunOptions::default()).run(&suites, &mut html).expect("run");

    assert_eq!(summary.overall, OverallStatus::Failed);
    assert_eq!(summary.tally.passed + summary.tally.failed + summary.tally.pending, 3);

    let report = fs::read_to_string(config.report_path()).expect("report written");
    assert!(report.contains("&lt;Widget&gt; breaks"));
    assert!(report.contains("expected &lt;div&gt; &amp; got &lt;span&gt;"));
    assert!(!report.contains("<Widget>"));
    assert!(report.contains("33.33%"));
}

#[test]
fn test_report_renders_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(&dir);
    let mut html = HtmlReporter::new(&config);
    let suites = vec![Suite::new("Once").it("works", || {})];

    let summary = Runner::new(RunOptions::default()).run(&suites, &mut html).expect("first run");
    let second = html.run_finished(&summary);
    assert!(matches!(second, Err(ReportError::AlreadyRendered)));
}

#[test]
fn test_empty_run_still_writes_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(&dir);
    let mut html = HtmlReporter::new(&config);

    let summary = Runner::new(RunOptions::default()).run(&[], &mut html).expect("run");
    assert_eq!(summary.tally.total, 0);

    let report = fs::read_to_string(config.report_path()).expect("report written");
    assert!(report.contains("0.00%"));
}

#[test]
fn test_unwritable_output_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "file").expect("write blocker");

    let config = ReportConfig::new().with_output_dir(blocker.join("reports"));
    let mut html = HtmlReporter::new(&config);
    let result = Runner::new(RunOptions::default()).run(&[Suite::new("S").it("ok", || {})], &mut html);
    assert!(matches!(result, Err(ReportError::Write { .. })));
}
