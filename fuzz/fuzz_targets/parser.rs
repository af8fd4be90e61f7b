#![no_main]

use gallery_harness::parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    if let Ok(case) = parser::parse(&input) {
        for command in &case.commands {
            assert!(!command.name.is_empty(), "Empty command name");
            assert!(command.line_num > 0, "Invalid line number");
        }
        for file in &case.files {
            assert!(!file.name.is_empty(), "Empty file name");
        }
    }
});
