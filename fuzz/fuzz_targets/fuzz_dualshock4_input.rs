//! Fuzzes the DualShock 4 input report parser, including the progressive
//! motion/battery/trackpad sections.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_dualshock4_input
#![no_main]
use hid_dualshock4_protocol::Ds4InputReport;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary bytes — errors are expected, panics are not.
    if let Ok(report) = Ds4InputReport::parse(data) {
        let _ = report.control_data();
        let _ = report.touch_data();
        let _ = report.motion_state();
    }
});
