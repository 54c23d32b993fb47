//! Built-in demo suites
//!
//! Specs exercising `specreport_demo` and [`crate::doubles`]; `specreport run` executes these.

mod calculator;
mod doubles;
mod fetch;
mod strings;
mod users;

use crate::runner::Suite;

/// Every built-in suite, in the order they run.
pub fn builtin_suites() -> Vec<Suite> {
    vec![
        calculator::suite(),
        strings::suite(),
        users::suite(),
        fetch::suite(),
        doubles::suite(),
    ]
}

/// Panic unless `actual` rounds to `expected` at `digits` decimal places.
#[track_caller]
pub(crate) fn assert_close(actual: f64, expected: f64, digits: i32) {
    let tolerance = 10f64.powi(-digits) / 2.0;
    assert!(
        (expected - actual).abs() < tolerance,
        "Expected {actual} to be close to {expected} ({digits} digits)"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_suites_are_populated() {
        let suites = builtin_suites();
        assert_eq!(suites.len(), 5);
        assert!(suites.iter().all(|s| s.spec_count() > 0));
    }

    #[test]
    fn test_assert_close_tolerance() {
        assert_close(0.1 + 0.2, 0.3, 5);
        assert!(std::panic::catch_unwind(|| assert_close(0.34, 0.333, 2)).is_err());
    }
}
