#![no_main]

use gallery_harness::diagnostics::DiagnosticFilter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let filter = DiagnosticFilter::new().unwrap();

    let captured = filter.capture(&input);
    for diagnostic in &captured.diagnostics {
        assert!(!diagnostic.category.is_empty());
        assert!(input.contains(diagnostic.text.lines().next().unwrap_or("")));
    }
    assert!(filter.shown(&captured.diagnostics).len() <= captured.diagnostics.len());
});
