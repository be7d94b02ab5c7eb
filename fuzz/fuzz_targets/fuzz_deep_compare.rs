#![no_main]
use bom_diff::{deep_compare, DeepCompareOptions};
use libfuzzer_sys::fuzz_target;

/// Fuzz the generic deep comparator with arbitrary JSON value pairs.
///
/// Splits the input in half and parses each side independently; whenever
/// both halves are valid JSON the comparison must complete without
/// panicking, reporting depth overruns as accumulated errors.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (left_str, right_str) = s.split_at(s.len() / 2);
        if let (Ok(left), Ok(right)) = (
            serde_json::from_str::<serde_json::Value>(left_str),
            serde_json::from_str::<serde_json::Value>(right_str),
        ) {
            let summary = deep_compare(&left, &right, DeepCompareOptions::default());
            let _ = summary.has_changes();
        }
    }
});
