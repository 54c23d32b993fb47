#![no_main]

use libfuzzer_sys::fuzz_target;
use specreport::runner::cargo::{extract_failure, parse_libtest_output};

fuzz_target!(|data: &[u8]| {
    // Only valid UTF-8 reaches the parser
    if let Ok(s) = std::str::from_utf8(data) {
        let run = parse_libtest_output(s);
        for block in run.tests.iter().filter_map(|t| t.output.as_deref()) {
            let _ = extract_failure(block);
        }
    }
});
