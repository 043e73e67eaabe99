//! Input report parsing for Switch Pro compatible pads

use openpad_device_types::{AXIS_NEUTRAL, ControlData, HatDirection, MotionState, Vec3, buttons};
use openpad_hid_common::{
    ReportError, ReportParser, ReportResult, apply_deadzone, require_len, unpack_u12_pair,
};

/// Full-resolution report pushed after a mode request.
pub const STANDARD_REPORT_ID: u8 = 0x30;

/// Power-on default shape on compatible third-party pads.
pub const SIMPLE_REPORT_ID: u8 = 0x3F;

/// Bytes needed for either shape's buttons and sticks.
pub const MIN_REPORT_LEN: usize = 12;

/// Standard report length that reaches the first motion frame.
pub const STANDARD_MOTION_LEN: usize = 25;

/// Rest value of the simple shape's stick high bytes.
pub const SIMPLE_STICK_CENTER: u8 = 0x80;

/// Jitter tolerance on the simple shape's stick high bytes.
pub const SIMPLE_STICK_DEADZONE: u8 = 3;

/// One decoded input report, either shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwitchProInputReport {
    Simple(SimpleInputReport),
    Standard(StandardInputReport),
}

impl SwitchProInputReport {
    /// Parse a raw input report, dispatching on the report ID.
    ///
    /// A leading byte that is neither shape comes back as
    /// [`ReportError::UnrecognizedType`]; callers use that to decide whether
    /// the pad still needs a mode request.
    pub fn parse(frame: &[u8]) -> ReportResult<Self> {
        require_len(frame, MIN_REPORT_LEN)?;

        let mut parser = ReportParser::new(frame);
        let report_id = parser.read_u8()?;
        match report_id {
            SIMPLE_REPORT_ID => SimpleInputReport::parse_body(&mut parser).map(Self::Simple),
            STANDARD_REPORT_ID => {
                StandardInputReport::parse_body(&mut parser, frame.len()).map(Self::Standard)
            }
            other => Err(ReportError::UnrecognizedType { found: other }),
        }
    }

    /// Canonical state for this report.
    pub fn control_data(&self) -> ControlData {
        match self {
            Self::Simple(report) => report.control_data(),
            Self::Standard(report) => report.control_data(),
        }
    }

    /// Motion snapshot, present only on standard reports long enough to
    /// carry the first motion frame.
    pub fn motion_state(&self) -> Option<MotionState> {
        match self {
            Self::Simple(_) => None,
            Self::Standard(report) => report.motion,
        }
    }
}

/// Decoded `0x3F` report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleInputReport {
    pub buttons: u32,
    pub hat: HatDirection,
    pub left_x: u8,
    pub left_y: u8,
    pub right_x: u8,
    pub right_y: u8,
}

impl Default for SimpleInputReport {
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

impl SimpleInputReport {
    fn parse_body(parser: &mut ReportParser<'_>) -> ReportResult<Self> {
        let face = parser.read_u8()?;
        let menu = parser.read_u8()?;
        let hat = HatDirection::from_code(parser.read_u8()?);

        // Each axis is a 16-bit little-endian word whose low byte jitters at
        // rest; only the high byte is usable.
        let left_x = high_byte(parser.read_u16_le()?);
        let left_y = high_byte(parser.read_u16_le()?);
        let right_x = high_byte(parser.read_u16_le()?);
        let right_y = high_byte(parser.read_u16_le()?);

        Ok(Self {
            buttons: map_simple_buttons(face, menu),
            hat,
            left_x: apply_deadzone(left_x, SIMPLE_STICK_CENTER, SIMPLE_STICK_DEADZONE),
            left_y: apply_deadzone(left_y, SIMPLE_STICK_CENTER, SIMPLE_STICK_DEADZONE),
            right_x: apply_deadzone(right_x, SIMPLE_STICK_CENTER, SIMPLE_STICK_DEADZONE),
            right_y: apply_deadzone(right_y, SIMPLE_STICK_CENTER, SIMPLE_STICK_DEADZONE),
        })
    }

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

/// Decoded `0x30` report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardInputReport {
    /// Canonical mask; the d-pad arrives as button bits in this shape.
    pub buttons: u32,
    pub left_x: u8,
    pub left_y: u8,
    pub right_x: u8,
    pub right_y: u8,
    pub motion: Option<MotionState>,
}

impl Default for StandardInputReport {
    fn default() -> Self {
        Self {
            buttons: 0,
            left_x: AXIS_NEUTRAL,
            left_y: AXIS_NEUTRAL,
            right_x: AXIS_NEUTRAL,
            right_y: AXIS_NEUTRAL,
            motion: None,
        }
    }
}

impl StandardInputReport {
    fn parse_body(parser: &mut ReportParser<'_>, frame_len: usize) -> ReportResult<Self> {
        let _timer = parser.read_u8()?;
        // TODO: surface battery level from this byte's high nibble (0-8 scale).
        let _battery = parser.read_u8()?;

        let right = parser.read_u8()?;
        let shared = parser.read_u8()?;
        let left = parser.read_u8()?;

        let (left_x, left_y) = unpack_u12_pair(parser.read_array::<3>()?);
        let (right_x, right_y) = unpack_u12_pair(parser.read_array::<3>()?);

        let motion = if frame_len >= STANDARD_MOTION_LEN {
            let _vibration_ack = parser.read_u8()?;
            Some(MotionState {
                acceleration: read_motion_vec(parser)?,
                angular_velocity: read_motion_vec(parser)?,
            })
        } else {
            None
        };

        Ok(Self {
            buttons: map_standard_buttons(right, shared, left),
            left_x: downshift(left_x),
            // The sensor's Y grows downward; the canonical axes grow upward.
            left_y: 255 - downshift(left_y),
            right_x: downshift(right_x),
            right_y: 255 - downshift(right_y),
            motion,
        })
    }

    pub fn control_data(&self) -> ControlData {
        ControlData {
            buttons: self.buttons,
            left_x: self.left_x,
            left_y: self.left_y,
            right_x: self.right_x,
            right_y: self.right_y,
        }
    }
}

fn high_byte(word: u16) -> u8 {
    (word >> 8) as u8
}

fn downshift(axis: u16) -> u8 {
    (axis >> 4) as u8
}

fn read_motion_vec(parser: &mut ReportParser<'_>) -> ReportResult<Vec3> {
    Ok(Vec3::new(
        f32::from(parser.read_i16_le()?),
        f32::from(parser.read_i16_le()?),
        f32::from(parser.read_i16_le()?),
    ))
}

fn map_simple_buttons(face: u8, menu: u8) -> u32 {
    let mut mask = 0;
    if face & 0x01 != 0 {
        mask |= buttons::CROSS; // B
    }
    if face & 0x02 != 0 {
        mask |= buttons::CIRCLE; // A
    }
    if face & 0x04 != 0 {
        mask |= buttons::SQUARE; // Y
    }
    if face & 0x08 != 0 {
        mask |= buttons::TRIANGLE; // X
    }
    if face & 0x10 != 0 {
        mask |= buttons::L1; // L
    }
    if face & 0x20 != 0 {
        mask |= buttons::R1; // R
    }
    if face & 0x40 != 0 {
        mask |= buttons::LTRIGGER; // ZL
    }
    if face & 0x80 != 0 {
        mask |= buttons::RTRIGGER; // ZR
    }
    if menu & 0x01 != 0 {
        mask |= buttons::SELECT; // minus
    }
    if menu & 0x02 != 0 {
        mask |= buttons::START; // plus
    }
    if menu & 0x10 != 0 {
        mask |= buttons::SYSTEM; // home
    }
    // Stick clicks share bits with axis noise in this shape and stay
    // unmapped until captures isolate them.
    mask
}

fn map_standard_buttons(right: u8, shared: u8, left: u8) -> u32 {
    let mut mask = 0;
    if right & 0x01 != 0 {
        mask |= buttons::SQUARE; // Y
    }
    if right & 0x02 != 0 {
        mask |= buttons::TRIANGLE; // X
    }
    if right & 0x04 != 0 {
        mask |= buttons::CROSS; // B
    }
    if right & 0x08 != 0 {
        mask |= buttons::CIRCLE; // A
    }
    if right & 0x40 != 0 {
        mask |= buttons::R1; // R
    }
    if right & 0x80 != 0 {
        mask |= buttons::RTRIGGER; // ZR
    }
    if shared & 0x01 != 0 {
        mask |= buttons::SELECT; // minus
    }
    if shared & 0x02 != 0 {
        mask |= buttons::START; // plus
    }
    if shared & 0x04 != 0 {
        mask |= buttons::R3;
    }
    if shared & 0x08 != 0 {
        mask |= buttons::L3;
    }
    if shared & 0x10 != 0 {
        mask |= buttons::SYSTEM; // home
    }
    // Capture (0x20) has no canonical counterpart.
    if left & 0x01 != 0 {
        mask |= buttons::DOWN;
    }
    if left & 0x02 != 0 {
        mask |= buttons::UP;
    }
    if left & 0x04 != 0 {
        mask |= buttons::RIGHT;
    }
    if left & 0x08 != 0 {
        mask |= buttons::LEFT;
    }
    if left & 0x40 != 0 {
        mask |= buttons::L1; // L
    }
    if left & 0x80 != 0 {
        mask |= buttons::LTRIGGER; // ZL
    }
    mask
}
