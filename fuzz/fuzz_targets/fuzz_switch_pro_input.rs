//! Fuzzes the Switch Pro input report parser across both report shapes.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_switch_pro_input
#![no_main]
use hid_switch_pro_protocol::SwitchProInputReport;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary bytes — errors are expected, panics are not.
    if let Ok(report) = SwitchProInputReport::parse(data) {
        let _ = report.control_data();
        let _ = report.motion_state();
    }
});
