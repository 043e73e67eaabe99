//! Input report parsing for the DualShock 4

use openpad_device_types::{
    AXIS_NEUTRAL, ControlData, HatDirection, MotionState, TouchData, TouchPoint, Vec3, buttons,
};
use openpad_hid_common::{
    ReportError, ReportParser, ReportResult, require_len, unpack_u12_pair,
};

/// Report ID carried in byte 0 of every USB input report.
pub const DS4_REPORT_ID: u8 = 0x01;

/// Bytes needed for buttons, sticks, and trigger pressure.
pub const DS4_CORE_LEN: usize = 10;

/// Report length that reaches the gyro and accelerometer words.
pub const DS4_MOTION_LEN: usize = 25;

/// Report length that reaches the battery status byte.
pub const DS4_BATTERY_LEN: usize = 31;

/// Report length that reaches both trackpad fingers.
pub const DS4_TRACKPAD_LEN: usize = 43;

/// Native trackpad width in device units.
pub const TRACKPAD_WIDTH: u16 = 1920;

/// Native trackpad height in device units.
pub const TRACKPAD_HEIGHT: u16 = 942;

/// Horizontal margin a finger cannot practically reach.
pub const TRACKPAD_DEAD_X: u16 = 60;

/// Vertical margin a finger cannot practically reach.
pub const TRACKPAD_DEAD_Y: u16 = 45;

/// One trackpad contact in native coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackpadFinger {
    pub active: bool,
    /// Rolling contact ID assigned by the pad firmware.
    pub id: u8,
    pub x: u16,
    pub y: u16,
}

impl TrackpadFinger {
    fn parse(parser: &mut ReportParser<'_>) -> ReportResult<Self> {
        let contact = parser.read_u8()?;
        let (x, y) = unpack_u12_pair(parser.read_array::<3>()?);
        Ok(Self {
            // Bit 7 set means "not touching".
            active: contact & 0x80 == 0,
            id: contact & 0x7F,
            x,
            y,
        })
    }
}

/// Decoded DualShock 4 input report.
///
/// Sensor, battery, and trackpad sections are `None` when the frame is too
/// short to carry them; some Bluetooth bridges truncate reports to the core
/// ten bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ds4InputReport {
    /// Canonical mask, hat excluded.
    pub buttons: u32,
    pub hat: HatDirection,
    pub left_x: u8,
    pub left_y: u8,
    pub right_x: u8,
    pub right_y: u8,
    pub l2_analog: u8,
    pub r2_analog: u8,
    /// Physical trackpad click, distinct from touch contacts.
    pub touchpad_clicked: bool,
    pub motion: Option<MotionState>,
    pub battery_percent: Option<u8>,
    pub fingers: Option<[TrackpadFinger; 2]>,
}

impl Default for Ds4InputReport {
    fn default() -> Self {
        Self {
            buttons: 0,
            hat: HatDirection::Neutral,
            left_x: AXIS_NEUTRAL,
            left_y: AXIS_NEUTRAL,
            right_x: AXIS_NEUTRAL,
            right_y: AXIS_NEUTRAL,
            l2_analog: 0,
            r2_analog: 0,
            touchpad_clicked: false,
            motion: None,
            battery_percent: None,
            fingers: None,
        }
    }
}

impl Ds4InputReport {
    /// Parse a raw input report.
    ///
    /// The frame must be at least [`DS4_CORE_LEN`] bytes and start with
    /// [`DS4_REPORT_ID`]. Longer frames progressively unlock motion, battery,
    /// and trackpad data.
    pub fn parse(frame: &[u8]) -> ReportResult<Self> {
        require_len(frame, DS4_CORE_LEN)?;

        let mut parser = ReportParser::new(frame);
        let report_id = parser.read_u8()?;
        if report_id != DS4_REPORT_ID {
            return Err(ReportError::UnrecognizedType { found: report_id });
        }

        let left_x = parser.read_u8()?;
        let left_y = parser.read_u8()?;
        let right_x = parser.read_u8()?;
        let right_y = parser.read_u8()?;
        let face = parser.read_u8()?;
        let shoulder = parser.read_u8()?;
        let misc = parser.read_u8()?;
        let l2_analog = parser.read_u8()?;
        let r2_analog = parser.read_u8()?;

        let motion = if frame.len() >= DS4_MOTION_LEN {
            // Timestamp and temperature sit between the triggers and the
            // sensor words.
            parser.skip(3);
            let angular_velocity = read_sensor_vec(&mut parser)?;
            let acceleration = read_sensor_vec(&mut parser)?;
            Some(MotionState {
                acceleration,
                angular_velocity,
            })
        } else {
            None
        };

        let battery_percent = if frame.len() >= DS4_BATTERY_LEN {
            parser.seek(30);
            Some(battery_percent_from_status(parser.read_u8()?))
        } else {
            None
        };

        let fingers = if frame.len() >= DS4_TRACKPAD_LEN {
            parser.seek(35);
            Some([
                TrackpadFinger::parse(&mut parser)?,
                TrackpadFinger::parse(&mut parser)?,
            ])
        } else {
            None
        };

        Ok(Self {
            buttons: map_buttons(face, shoulder, misc),
            hat: HatDirection::from_code(face & 0x0F),
            left_x,
            left_y,
            right_x,
            right_y,
            l2_analog,
            r2_analog,
            touchpad_clicked: misc & 0x02 != 0,
            motion,
            battery_percent,
            fingers,
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

    /// Trackpad contacts plus surface geometry, when the frame carried them.
    pub fn touch_data(&self) -> Option<TouchData> {
        let fingers = self.fingers?;
        let mut data = TouchData {
            width: TRACKPAD_WIDTH,
            height: TRACKPAD_HEIGHT,
            dead_x: TRACKPAD_DEAD_X,
            dead_y: TRACKPAD_DEAD_Y,
            ..TouchData::default()
        };
        for (point, finger) in data.points.iter_mut().zip(fingers) {
            *point = TouchPoint {
                active: finger.active,
                id: finger.id,
                x: finger.x,
                y: finger.y,
            };
        }
        Some(data)
    }

    pub fn motion_state(&self) -> Option<MotionState> {
        self.motion
    }
}

fn read_sensor_vec(parser: &mut ReportParser<'_>) -> ReportResult<Vec3> {
    Ok(Vec3::new(
        f32::from(parser.read_i16_le()?),
        f32::from(parser.read_i16_le()?),
        f32::from(parser.read_i16_le()?),
    ))
}

fn battery_percent_from_status(status: u8) -> u8 {
    // Low nibble counts tenths; the cable bit above it does not change the
    // scale. Values above ten are clamped rather than trusted.
    ((status & 0x0F) * 10).min(100)
}

fn map_buttons(face: u8, shoulder: u8, misc: u8) -> u32 {
    let mut mask = 0;
    if face & 0x10 != 0 {
        mask |= buttons::SQUARE;
    }
    if face & 0x20 != 0 {
        mask |= buttons::CROSS;
    }
    if face & 0x40 != 0 {
        mask |= buttons::CIRCLE;
    }
    if face & 0x80 != 0 {
        mask |= buttons::TRIANGLE;
    }
    if shoulder & 0x01 != 0 {
        mask |= buttons::L1;
    }
    if shoulder & 0x02 != 0 {
        mask |= buttons::R1;
    }
    if shoulder & 0x04 != 0 {
        mask |= buttons::LTRIGGER; // L2
    }
    if shoulder & 0x08 != 0 {
        mask |= buttons::RTRIGGER; // R2
    }
    if shoulder & 0x10 != 0 {
        mask |= buttons::SELECT; // share
    }
    if shoulder & 0x20 != 0 {
        mask |= buttons::START; // options
    }
    if shoulder & 0x40 != 0 {
        mask |= buttons::L3;
    }
    if shoulder & 0x80 != 0 {
        mask |= buttons::R3;
    }
    if misc & 0x01 != 0 {
        mask |= buttons::SYSTEM; // PS
    }
    // The trackpad click (0x02) has no canonical counterpart and is
    // surfaced as its own field.
    mask
}
