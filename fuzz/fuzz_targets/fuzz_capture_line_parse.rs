//! Fuzzes the capture-log line parser.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_capture_line_parse
#![no_main]
use libfuzzer_sys::fuzz_target;
use openpad_capture_format::{parse_line, parse_log};

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary bytes — errors are expected, panics are not.
    if let Ok(text) = core::str::from_utf8(data) {
        let _ = parse_line(text);
        let _ = parse_log(text);
    }
});
