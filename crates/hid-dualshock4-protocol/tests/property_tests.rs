//! Property-based tests for the DualShock 4 protocol.
//!
//! Uses proptest with 500 cases to verify invariants on frame validation,
//! section tiering, and the battery and trackpad decoders.

use hid_dualshock4_protocol::{
    DS4_BATTERY_LEN, DS4_CORE_LEN, DS4_MOTION_LEN, DS4_REPORT_ID, DS4_TRACKPAD_LEN,
    DUALSHOCK4_V1_PID, DUALSHOCK4_V2_PID, Ds4InputReport, ReportError, SONY_VENDOR_ID,
    is_dualshock4,
};
use openpad_device_types::{HatDirection, buttons};
use proptest::prelude::*;

fn make_core_frame(axes: [u8; 4], face: u8, shoulder: u8, misc: u8) -> Vec<u8> {
    vec![
        DS4_REPORT_ID,
        axes[0],
        axes[1],
        axes[2],
        axes[3],
        face,
        shoulder,
        misc,
        0x00,
        0x00,
    ]
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    // -- Frame validation -----------------------------------------------------

    /// parse must return a value or an error for any byte soup, never panic.
    #[test]
    fn prop_parse_total_on_arbitrary_bytes(frame in proptest::collection::vec(any::<u8>(), 0..80)) {
        let _ = Ds4InputReport::parse(&frame);
    }

    /// Frames shorter than the core length must be rejected as TooShort.
    #[test]
    fn prop_short_frames_rejected(len in 0usize..DS4_CORE_LEN) {
        let frame = vec![DS4_REPORT_ID; len];
        let result = Ds4InputReport::parse(&frame);
        prop_assert!(matches!(result, Err(ReportError::TooShort { .. })), "len={}", len);
    }

    /// Any leading byte other than the report ID must be rejected.
    #[test]
    fn prop_wrong_report_id_rejected(id: u8, body in proptest::collection::vec(any::<u8>(), 9..64)) {
        prop_assume!(id != DS4_REPORT_ID);
        let mut frame = vec![id];
        frame.extend_from_slice(&body);
        let result = Ds4InputReport::parse(&frame);
        prop_assert!(
            matches!(result, Err(ReportError::UnrecognizedType { found }) if found == id),
            "id={}",
            id
        );
    }

    // -- Decoding -------------------------------------------------------------

    /// Axis bytes must pass through the decoder unchanged.
    #[test]
    fn prop_axes_identity(axes: [u8; 4]) {
        let frame = make_core_frame(axes, 0x08, 0, 0);
        let result = Ds4InputReport::parse(&frame);
        prop_assert!(result.is_ok());
        if let Ok(report) = result {
            prop_assert_eq!(report.left_x, axes[0]);
            prop_assert_eq!(report.left_y, axes[1]);
            prop_assert_eq!(report.right_x, axes[2]);
            prop_assert_eq!(report.right_y, axes[3]);
        }
    }

    /// Directional bits must come from the hat nibble and nothing else.
    #[test]
    fn prop_dpad_bits_track_hat_nibble(face: u8, shoulder: u8, misc: u8) {
        let frame = make_core_frame([0x80; 4], face, shoulder, misc);
        let result = Ds4InputReport::parse(&frame);
        prop_assert!(result.is_ok());
        if let Ok(report) = result {
            let expected = HatDirection::from_code(face & 0x0F).mask();
            prop_assert_eq!(report.control_data().buttons & buttons::DPAD, expected);
        }
    }

    /// Battery never decodes above one hundred percent.
    #[test]
    fn prop_battery_clamped(status: u8) {
        let mut frame = vec![0u8; DS4_BATTERY_LEN];
        frame[0] = DS4_REPORT_ID;
        frame[30] = status;
        let result = Ds4InputReport::parse(&frame);
        prop_assert!(result.is_ok());
        if let Ok(report) = result {
            let battery = report.battery_percent;
            prop_assert!(battery.is_some());
            if let Some(percent) = battery {
                prop_assert!(percent <= 100, "status={:#04X} percent={}", status, percent);
            }
        }
    }

    /// A finger is active exactly when bit 7 of its contact byte is clear.
    #[test]
    fn prop_finger_activity_bit(contact: u8) {
        let mut frame = vec![0u8; DS4_TRACKPAD_LEN];
        frame[0] = DS4_REPORT_ID;
        frame[35] = contact;
        frame[39] = 0x80;
        let result = Ds4InputReport::parse(&frame);
        prop_assert!(result.is_ok());
        if let Ok(report) = result {
            let fingers = report.fingers;
            prop_assert!(fingers.is_some());
            if let Some(fingers) = fingers {
                prop_assert_eq!(fingers[0].active, contact & 0x80 == 0);
                prop_assert_eq!(fingers[0].id, contact & 0x7F);
            }
        }
    }

    /// Optional sections appear exactly at their documented length tiers.
    #[test]
    fn prop_section_tiers(len in DS4_CORE_LEN..=64usize) {
        let mut frame = vec![0u8; len];
        frame[0] = DS4_REPORT_ID;
        let result = Ds4InputReport::parse(&frame);
        prop_assert!(result.is_ok());
        if let Ok(report) = result {
            prop_assert_eq!(report.motion.is_some(), len >= DS4_MOTION_LEN);
            prop_assert_eq!(report.battery_percent.is_some(), len >= DS4_BATTERY_LEN);
            prop_assert_eq!(report.fingers.is_some(), len >= DS4_TRACKPAD_LEN);
        }
    }

    // -- Identity -------------------------------------------------------------

    /// is_dualshock4 must accept exactly the two known VID/PID pairs.
    #[test]
    fn prop_is_dualshock4_exact_match(vid: u16, pid: u16) {
        let expected =
            vid == SONY_VENDOR_ID && (pid == DUALSHOCK4_V1_PID || pid == DUALSHOCK4_V2_PID);
        prop_assert_eq!(is_dualshock4(vid, pid), expected);
    }
}
