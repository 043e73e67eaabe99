//! Nintendo Switch Pro Controller HID protocol definitions
//!
//! Over USB the Pro Controller speaks two input report shapes:
//!
//! * `0x30` "standard": full-resolution report pushed at 60 Hz once
//!   requested. Three button bytes, two 12-bit-packed sticks, and three
//!   accelerometer/gyroscope frames of six `i16` words each.
//! * `0x3F` "simple": the power-on default on some compatible pads. Two
//!   button bytes, an eight-way hat code, and four 16-bit stick axes of
//!   which only the high byte is stable.
//!
//! Fresh out of enumeration the controller may instead emit `0x81`
//! subcommand replies; sending [`STANDARD_MODE_REQUEST`] once switches it to
//! `0x30` reports. Pads already emitting `0x30` or `0x3F` must NOT be sent
//! the request: third-party pads that reuse this VID/PID (8BitDo Pro series
//! in Switch mode, which speak `0x3F`) can drop the connection when asked to
//! change mode.
//!
//! Standard report layout (byte offsets):
//!
//! | Byte  | Contents                                                      |
//! |-------|---------------------------------------------------------------|
//! | 0     | Report ID `0x30`                                              |
//! | 1     | Timer (increments per report)                                 |
//! | 2     | Battery (high nibble) and connection info                     |
//! | 3     | Buttons: Y, X, B, A, R, ZR                                    |
//! | 4     | Buttons: minus, plus, stick clicks, home, capture             |
//! | 5     | Buttons: d-pad, L, ZL                                         |
//! | 6-8   | Left stick, two 12-bit axes packed little-endian              |
//! | 9-11  | Right stick, same packing                                     |
//! | 12    | Vibration ack                                                 |
//! | 13-24 | First motion frame: accel X/Y/Z then gyro X/Y/Z, `i16` LE     |
//!
//! Sources: USB captures of a first-party Pro Controller and an 8BitDo
//! Pro 3 presenting the same VID/PID, plus the community-documented
//! subcommand tables for report mode `0x03`.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]

pub mod ids;
pub mod input;
pub mod output;

pub use ids::*;
pub use input::*;
pub use output::*;

pub use openpad_hid_common::{ReportError, ReportResult};
