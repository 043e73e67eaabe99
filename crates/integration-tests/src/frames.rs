//! Raw report fixtures for the supported pads

use hid_dualshock4_protocol::{DS4_REPORT_ID, DUALSHOCK4_V2_PID, SONY_VENDOR_ID};
use hid_eightbitdo_protocol::{EIGHTBITDO_VENDOR_ID, LITE2_PID, LITE2_REPORT_ID};
use hid_switch_pro_protocol::{NINTENDO_VENDOR_ID, SWITCH_PRO_PID};

pub fn lite2_ids() -> (u16, u16) {
    (EIGHTBITDO_VENDOR_ID, LITE2_PID)
}

pub fn switch_pro_ids() -> (u16, u16) {
    (NINTENDO_VENDOR_ID, SWITCH_PRO_PID)
}

pub fn ds4_ids() -> (u16, u16) {
    (SONY_VENDOR_ID, DUALSHOCK4_V2_PID)
}

/// Lite 2 frame: nothing pressed, hat neutral, sticks centered.
pub fn lite2_idle() -> Vec<u8> {
    vec![LITE2_REPORT_ID, 0x00, 0x00, 0x80, 0x80, 0x80, 0x80, 0x80]
}

/// Lite 2 frame with the given face-button byte.
pub fn lite2_face(face: u8) -> Vec<u8> {
    let mut frame = lite2_idle();
    frame[1] = face;
    frame
}

/// Switch pad reply while still in subcommand mode: the worker must answer
/// it with the standard-mode request.
pub fn switch_pro_subcommand_reply() -> Vec<u8> {
    vec![0x81; 12]
}

/// Switch pad frame in the simple (`0x3F`) shape with CROSS pressed.
pub fn switch_pro_simple_cross() -> Vec<u8> {
    vec![
        0x3F, 0x01, 0x00, 0x08, 0x00, 0x80, 0x00, 0x80, 0x00, 0x80, 0x00, 0x80,
    ]
}

/// Full-length DualShock 4 frame: idle sticks, neutral hat, both fingers
/// lifted, battery at ten units.
pub fn ds4_idle() -> Vec<u8> {
    let mut frame = vec![0u8; 64];
    frame[0] = DS4_REPORT_ID;
    frame[1] = 0x80;
    frame[2] = 0x80;
    frame[3] = 0x80;
    frame[4] = 0x80;
    frame[5] = 0x08;
    frame[30] = 0x0A;
    frame[35] = 0x80;
    frame[39] = 0x80;
    frame
}

/// DualShock 4 frame with CROSS held, a 30 percent battery, and one
/// trackpad contact at native (1000, 500).
pub fn ds4_active() -> Vec<u8> {
    let mut frame = ds4_idle();
    frame[5] = 0x08 | 0x20;
    frame[30] = 0x03;
    frame[35] = 0x03;
    frame[36] = 0xE8;
    frame[37] = 0x43;
    frame[38] = 0x1F;
    frame
}
