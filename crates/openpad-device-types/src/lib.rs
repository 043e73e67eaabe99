//! Canonical controller state for OpenPad
//!
//! Every report decoder produces these records and every injection consumer
//! reads them. The button masks match the host wire format bit-for-bit so
//! merges can OR them straight into caller buffers.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

/// Canonical button masks in host wire-format bit positions.
pub mod buttons {
    /// Select / share / minus.
    pub const SELECT: u32 = 0x0000_0001;
    /// Left stick click.
    pub const L3: u32 = 0x0000_0002;
    /// Right stick click.
    pub const R3: u32 = 0x0000_0004;
    /// Start / options / plus.
    pub const START: u32 = 0x0000_0008;
    pub const UP: u32 = 0x0000_0010;
    pub const RIGHT: u32 = 0x0000_0020;
    pub const DOWN: u32 = 0x0000_0040;
    pub const LEFT: u32 = 0x0000_0080;
    /// Primary left shoulder on the host.
    pub const LTRIGGER: u32 = 0x0000_0100;
    /// Primary right shoulder on the host.
    pub const RTRIGGER: u32 = 0x0000_0200;
    pub const L1: u32 = 0x0000_0400;
    pub const R1: u32 = 0x0000_0800;
    pub const TRIANGLE: u32 = 0x0000_1000;
    pub const CIRCLE: u32 = 0x0000_2000;
    pub const CROSS: u32 = 0x0000_4000;
    pub const SQUARE: u32 = 0x0000_8000;
    /// Home/system button; also forwarded to the host's button-emulation path.
    pub const SYSTEM: u32 = 0x0001_0000;

    /// All four directional bits.
    pub const DPAD: u32 = UP | RIGHT | DOWN | LEFT;
}

/// Rest value for every analog stick axis.
pub const AXIS_NEUTRAL: u8 = 127;

/// Transport-level device identity: two 32-bit address halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceIdentity {
    pub msb: u32,
    pub lsb: u32,
}

impl DeviceIdentity {
    pub fn new(msb: u32, lsb: u32) -> Self {
        Self { msb, lsb }
    }
}

impl core::fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:08X}:{:08X}", self.msb, self.lsb)
    }
}

/// Button bitmask plus four analog axes, 127/128 = neutral.
///
/// Decoders overwrite this wholesale on every successful decode; it is never
/// partially merged except by the injection layer into caller buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlData {
    pub buttons: u32,
    pub left_x: u8,
    pub left_y: u8,
    pub right_x: u8,
    pub right_y: u8,
}

impl Default for ControlData {
    fn default() -> Self {
        Self {
            buttons: 0,
            left_x: AXIS_NEUTRAL,
            left_y: AXIS_NEUTRAL,
            right_x: AXIS_NEUTRAL,
            right_y: AXIS_NEUTRAL,
        }
    }
}

impl ControlData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buttons(mut self, buttons: u32) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_left_stick(mut self, x: u8, y: u8) -> Self {
        self.left_x = x;
        self.left_y = y;
        self
    }

    pub fn with_right_stick(mut self, x: u8, y: u8) -> Self {
        self.right_x = x;
        self.right_y = y;
        self
    }

    pub fn pressed(&self, mask: u32) -> bool {
        self.buttons & mask != 0
    }
}

/// One raw touch point in device-native coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchPoint {
    pub active: bool,
    pub id: u8,
    pub x: u16,
    pub y: u16,
}

/// Up to two touch points plus the device-native surface geometry the
/// injection layer needs for scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchData {
    pub points: [TouchPoint; 2],
    /// Native surface width in device units.
    pub width: u16,
    /// Native surface height in device units.
    pub height: u16,
    /// Horizontal dead margin in device units.
    pub dead_x: u16,
    /// Vertical dead margin in device units.
    pub dead_y: u16,
}

impl TouchData {
    pub fn any_active(&self) -> bool {
        self.points.iter().any(|p| p.active)
    }

    pub fn clear_points(&mut self) {
        for point in &mut self.points {
            point.active = false;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Motion snapshot written verbatim by motion-capable decoders and left at
/// its prior value by everything else.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionState {
    pub acceleration: Vec3,
    pub angular_velocity: Vec3,
}

/// Eight-way hat direction decoded from a single hat code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HatDirection {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
    #[default]
    Neutral,
}

impl HatDirection {
    /// Decode the common 0..=7 hat encoding; any other code is neutral.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => HatDirection::Up,
            1 => HatDirection::UpRight,
            2 => HatDirection::Right,
            3 => HatDirection::DownRight,
            4 => HatDirection::Down,
            5 => HatDirection::DownLeft,
            6 => HatDirection::Left,
            7 => HatDirection::UpLeft,
            _ => HatDirection::Neutral,
        }
    }

    /// Canonical direction bits for this hat position.
    pub fn mask(self) -> u32 {
        match self {
            HatDirection::Up => buttons::UP,
            HatDirection::UpRight => buttons::UP | buttons::RIGHT,
            HatDirection::Right => buttons::RIGHT,
            HatDirection::DownRight => buttons::RIGHT | buttons::DOWN,
            HatDirection::Down => buttons::DOWN,
            HatDirection::DownLeft => buttons::DOWN | buttons::LEFT,
            HatDirection::Left => buttons::LEFT,
            HatDirection::UpLeft => buttons::LEFT | buttons::UP,
            HatDirection::Neutral => 0,
        }
    }
}

#[cfg(feature = "proptest")]
mod proptest_shrinks {
    use super::*;
    use proptest::prelude::*;

    impl Arbitrary for ControlData {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            (
                any::<u32>(),
                any::<u8>(),
                any::<u8>(),
                any::<u8>(),
                any::<u8>(),
            )
                .prop_map(|(buttons, left_x, left_y, right_x, right_y)| Self {
                    buttons,
                    left_x,
                    left_y,
                    right_x,
                    right_y,
                })
                .boxed()
        }
    }
}
