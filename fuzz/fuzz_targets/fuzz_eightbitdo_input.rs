//! Fuzzes the 8BitDo Lite 2 input report parser.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_eightbitdo_input
#![no_main]
use hid_eightbitdo_protocol::Lite2InputReport;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary bytes — errors are expected, panics are not.
    if let Ok(report) = Lite2InputReport::parse(data) {
        let _ = report.control_data();
    }
});
