//! Sony DualShock 4 HID protocol definitions
//!
//! Over USB the DualShock 4 pushes input report `0x01` at up to 250 Hz. The
//! first ten bytes carry everything a basic pad needs; the rest of the
//! 64-byte report adds sensors, battery, and the trackpad:
//!
//! | Byte  | Contents                                                      |
//! |-------|---------------------------------------------------------------|
//! | 0     | Report ID, always `0x01`                                      |
//! | 1-4   | Left X, left Y, right X, right Y (0-255)                      |
//! | 5     | Hat in the low nibble; square/cross/circle/triangle above     |
//! | 6     | L1, R1, L2, R2, share, options, L3, R3                        |
//! | 7     | PS button, trackpad click, report counter in the high bits    |
//! | 8-9   | L2 / R2 analog pressure                                       |
//! | 10-11 | Sensor timestamp                                              |
//! | 12    | Sensor temperature                                            |
//! | 13-18 | Gyroscope pitch/yaw/roll, `i16` LE                            |
//! | 19-24 | Accelerometer X/Y/Z, `i16` LE                                 |
//! | 30    | Status: battery units in the low nibble, cable bit `0x10`     |
//! | 33    | Number of queued trackpad frames                              |
//! | 34    | Trackpad frame timestamp                                      |
//! | 35-38 | Finger 1: contact byte then 12-bit-packed X/Y                 |
//! | 39-42 | Finger 2: same shape                                          |
//!
//! A contact byte's bit 7 means "not touching"; the low seven bits are a
//! monotonically increasing touch ID. Trackpad coordinates are native
//! 1920x942 with the edges physically hard to reach, so consumers get dead
//! margins to scale against.
//!
//! Bluetooth moves the same payload three bytes deeper inside report `0x11`;
//! that framing is not handled here.
//!
//! Sources: USB captures of CUH-ZCT1 and CUH-ZCT2 pads, cross-checked
//! against the layout mainline Linux uses for this device.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]

pub mod ids;
pub mod input;

pub use ids::*;
pub use input::*;

pub use openpad_hid_common::{ReportError, ReportResult};
