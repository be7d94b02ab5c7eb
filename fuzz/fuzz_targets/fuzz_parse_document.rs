#![no_main]
use bom_diff::parse_document_str;
use libfuzzer_sys::fuzz_target;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the BOM document parser.
///
/// Prefixes input with a minimal document envelope to increase the
/// likelihood of reaching the item deserialization path rather than
/// failing at the top level.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Try raw input first
        let _ = parse_document_str(s);

        // Also try wrapping as the items array of a valid document
        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(
                r#"{{"assembly":{{"code":"A","name":"Main"}},"items":[{s}]}}"#,
            );
            let _ = parse_document_str(&wrapped);
        }
    }
});
