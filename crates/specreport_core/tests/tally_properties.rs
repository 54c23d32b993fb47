//! Property tests for the run tally and HTML escaping.
//!
//! These lock in the two guarantees every reporter relies on: counters never exceed the total, and escaped
//! text never contains raw markup characters.

use proptest::prelude::*;
use specreport_core::{FailedExpectation, RunTally, SpecResult, SpecStatus, escape_html};

fn result_with(status: SpecStatus) -> SpecResult {
    match status {
        SpecStatus::Passed => SpecResult::passed("spec", "d", "S d", None),
        SpecStatus::Failed => SpecResult::failed("spec", "d", "S d", None, vec![FailedExpectation::new("m", "s")]),
        SpecStatus::Pending => SpecResult::pending("spec", "d", "S d"),
    }
}

fn status_strategy() -> impl Strategy<Value = SpecStatus> {
    prop_oneof![
        Just(SpecStatus::Passed),
        Just(SpecStatus::Failed),
        Just(SpecStatus::Pending),
    ]
}

proptest! {
    /// Property: however many results arrive, passed + failed never exceeds total.
    #[test]
    fn counters_never_exceed_total(declared in 0usize..20, statuses in prop::collection::vec(status_strategy(), 0..40)) {
        let mut tally = RunTally::new(declared);
        for status in &statuses {
            tally.record(&result_with(*status));
            prop_assert!(tally.passed + tally.failed <= tally.total);
        }
        prop_assert_eq!(tally.recorded(), statuses.len());
    }

    /// Property: the pass rate is always a finite percentage.
    #[test]
    fn pass_rate_is_bounded(declared in 0usize..20, passes in 0usize..20) {
        let mut tally = RunTally::new(declared);
        for _ in 0..passes {
            tally.record(&result_with(SpecStatus::Passed));
        }
        let rate = tally.pass_rate();
        prop_assert!(rate.is_finite());
        prop_assert!((0.0..=100.0).contains(&rate));
    }

    /// Property: escaped output contains no raw markup characters.
    #[test]
    fn escaped_text_has_no_markup(input in ".*") {
        let escaped = escape_html(&input);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
        prop_assert!(!escaped.contains('\''));
    }

    /// Property: every `&` in escaped output starts an entity.
    #[test]
    fn ampersands_start_entities(input in "[a-z&<>]{0,32}") {
        let escaped = escape_html(&input);
        for (idx, _) in escaped.match_indices('&') {
            let rest = &escaped[idx..];
            prop_assert!(rest.starts_with("&amp;") || rest.starts_with("&lt;") || rest.starts_with("&gt;"));
        }
    }
}
