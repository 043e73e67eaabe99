//! Snapshot tests for the 8BitDo Lite 2 protocol.
//!
//! These lock in the canonical button mapping to catch accidental regressions
//! in the decode tables.

use hid_eightbitdo_protocol::Lite2InputReport;
use insta::assert_snapshot;

fn decode_summary(frame: &[u8]) -> String {
    match Lite2InputReport::parse(frame) {
        Ok(report) => {
            let data = report.control_data();
            format!(
                "buttons={:#010X} lx={} ly={} rx={} ry={}",
                data.buttons, data.left_x, data.left_y, data.right_x, data.right_y
            )
        }
        Err(err) => format!("error: {err}"),
    }
}

#[test]
fn test_snapshot_idle_frame() {
    let frame = [0x01, 0x00, 0x00, 0x80, 0x80, 0x80, 0x80, 0x80];
    assert_snapshot!(
        decode_summary(&frame),
        @"buttons=0x00000000 lx=128 ly=128 rx=128 ry=128"
    );
}

#[test]
fn test_snapshot_circle_l1_select_ltrigger_right() {
    // A + L1 pressed, L2 + select pressed, hat right, sticks deflected.
    let frame = [0x01, 0x41, 0x05, 0x20, 0x10, 0x80, 0xF0, 0x7F];
    assert_snapshot!(
        decode_summary(&frame),
        @"buttons=0x00002521 lx=16 ly=128 rx=240 ry=127"
    );
}

#[test]
fn test_snapshot_everything_held() {
    let frame = [0x01, 0xDF, 0x0F, 0x00, 0x00, 0x00, 0xFF, 0xFF];
    assert_snapshot!(
        decode_summary(&frame),
        @"buttons=0x0001FF19 lx=0 ly=0 rx=255 ry=255"
    );
}

#[test]
fn test_snapshot_short_frame_error() {
    let frame = [0x01, 0x00, 0x00];
    assert_snapshot!(
        decode_summary(&frame),
        @"error: report too short: need 8 bytes, got 3"
    );
}
