//! Input report parsing for the 8BitDo Lite 2

use openpad_device_types::{AXIS_NEUTRAL, ControlData, HatDirection, buttons};
use openpad_hid_common::{ReportError, ReportParser, ReportResult, require_len};

/// Report ID carried in byte 0 of every Lite 2 input report.
pub const LITE2_REPORT_ID: u8 = 0x01;

/// Bytes needed to decode a report: ID, two button bytes, hat, four axes.
pub const LITE2_REPORT_LEN: usize = 8;

/// Decoded Lite 2 input report.
///
/// `buttons` is already in canonical mask form; the hat is kept separate so
/// callers can distinguish "d-pad released" from "no d-pad at all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lite2InputReport {
    pub buttons: u32,
    pub hat: HatDirection,
    pub left_x: u8,
    pub left_y: u8,
    pub right_x: u8,
    pub right_y: u8,
}

impl Default for Lite2InputReport {
    fn default() -> Self {
        Self {
            buttons: 0,
            hat: HatDirection::Neutral,
            left_x: AXIS_NEUTRAL,
            left_y: AXIS_NEUTRAL,
            right_x: AXIS_NEUTRAL,
            right_y: AXIS_NEUTRAL,
        }
    }
}

impl Lite2InputReport {
    /// Parse a raw input report.
    ///
    /// The frame must be at least [`LITE2_REPORT_LEN`] bytes and start with
    /// [`LITE2_REPORT_ID`]; trailing bytes are ignored.
    pub fn parse(frame: &[u8]) -> ReportResult<Self> {
        require_len(frame, LITE2_REPORT_LEN)?;

        let mut parser = ReportParser::new(frame);
        let report_id = parser.read_u8()?;
        if report_id != LITE2_REPORT_ID {
            return Err(ReportError::UnrecognizedType { found: report_id });
        }

        let face = parser.read_u8()?;
        let menu = parser.read_u8()?;
        let hat_raw = parser.read_u8()?;

        Ok(Self {
            buttons: map_buttons(face, menu),
            // Neutral is 0x80 and directions step by 0x10, so the code is
            // the high nibble.
            hat: HatDirection::from_code(hat_raw >> 4),
            left_x: parser.read_u8()?,
            left_y: parser.read_u8()?,
            right_x: parser.read_u8()?,
            right_y: parser.read_u8()?,
        })
    }

    /// Canonical state for this report, hat folded into the button mask.
    pub fn control_data(&self) -> ControlData {
        ControlData {
            buttons: self.buttons | self.hat.mask(),
            left_x: self.left_x,
            left_y: self.left_y,
            right_x: self.right_x,
            right_y: self.right_y,
        }
    }
}

fn map_buttons(face: u8, menu: u8) -> u32 {
    let mut mask = 0;
    if face & 0x01 != 0 {
        mask |= buttons::CIRCLE; // A
    }
    if face & 0x02 != 0 {
        mask |= buttons::CROSS; // B
    }
    if face & 0x04 != 0 {
        mask |= buttons::SYSTEM; // home
    }
    if face & 0x08 != 0 {
        mask |= buttons::TRIANGLE; // X
    }
    if face & 0x10 != 0 {
        mask |= buttons::SQUARE; // Y
    }
    if face & 0x40 != 0 {
        mask |= buttons::L1;
    }
    if face & 0x80 != 0 {
        mask |= buttons::R1;
    }
    if menu & 0x01 != 0 {
        mask |= buttons::LTRIGGER; // L2
    }
    if menu & 0x02 != 0 {
        mask |= buttons::RTRIGGER; // R2
    }
    if menu & 0x04 != 0 {
        mask |= buttons::SELECT;
    }
    if menu & 0x08 != 0 {
        mask |= buttons::START;
    }
    mask
}
