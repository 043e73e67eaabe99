//! Output reports for Switch Pro compatible pads
//!
//! The only output this crate needs is the one-shot subcommand that moves a
//! freshly enumerated pad from `0x81` subcommand replies to `0x30` standard
//! input reports.

use openpad_hid_common::ReportBuilder;

/// Output report ID for the rumble-plus-subcommand shape.
pub const OUTPUT_RUMBLE_SUBCOMMAND: u8 = 0x01;

/// Subcommand selecting the input report mode.
pub const SUBCOMMAND_SET_INPUT_MODE: u8 = 0x03;

/// Length of a rumble-plus-subcommand report with a one-byte argument.
pub const STANDARD_MODE_REQUEST_LEN: usize = 12;

/// Build the "switch to standard reports" request.
///
/// Byte 1 is a packet counter the pad uses to dedupe retransmits; a fixed
/// value is fine for a single shot. Bytes 2 through 9 are neutral rumble.
pub fn standard_mode_request() -> Vec<u8> {
    let mut builder = ReportBuilder::zeroed(STANDARD_MODE_REQUEST_LEN);
    builder
        .set_u8(0, OUTPUT_RUMBLE_SUBCOMMAND)
        .set_u8(1, 0x01)
        .set_u8(10, SUBCOMMAND_SET_INPUT_MODE)
        .set_u8(11, crate::STANDARD_REPORT_ID);
    builder.into_inner()
}
