//! 8BitDo Lite 2 HID protocol definitions
//!
//! The Lite 2 is a compact Switch/Android gamepad. In wired and Bluetooth
//! classic mode it emits a fixed-shape input report:
//!
//! | Byte | Contents                                                       |
//! |------|----------------------------------------------------------------|
//! | 0    | Report ID, always `0x01`                                       |
//! | 1    | Face/shoulder bitfield: A, B, home, X, Y, L1, R1               |
//! | 2    | Trigger/menu bitfield: L2, R2, select, start                   |
//! | 3    | Hat: `0x80` neutral, `0x00` up, clockwise in `0x10` steps      |
//! | 4-7  | Left X, left Y, right X, right Y (0-255, ~0x80 at rest)        |
//!
//! Button labels follow the Nintendo layout printed on the shell; the decoder
//! maps them positionally, so A lands on the canonical right face button and
//! B on the bottom one.
//!
//! Sources: USB captures of a Lite 2 in wired mode, cross-checked against the
//! pad's Bluetooth classic reports (identical layout).

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]

pub mod ids;
pub mod input;

pub use ids::*;
pub use input::*;

pub use openpad_hid_common::{ReportError, ReportResult};
