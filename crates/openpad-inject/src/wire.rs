//! Host wire structures
//!
//! These mirror the records pre-existing callers of the host polling APIs
//! already receive; injection rewrites them in place, so the layouts here
//! must stay field-compatible with the host's own.

use openpad_device_types::{AXIS_NEUTRAL, Vec3};

/// Host screen width in pixels; touch X coordinates land in `[0, width)`.
pub const SCREEN_WIDTH: u16 = 1920;

/// Host screen height in pixels; touch Y coordinates land in `[0, height)`.
pub const SCREEN_HEIGHT: u16 = 1080;

/// Most touch reports one host sample can carry.
pub const MAX_TOUCH_REPORTS: usize = 8;

/// Number of logical controller ports, port 0 included.
pub const MAX_PORTS: usize = 5;

/// Button encoding convention of a controller buffer query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLogic {
    /// A set bit means pressed.
    Positive,
    /// A clear bit means pressed.
    Negative,
}

impl ButtonLogic {
    /// The all-idle button word under this convention.
    pub fn idle_buttons(self) -> u32 {
        match self {
            Self::Positive => 0,
            Self::Negative => u32::MAX,
        }
    }
}

/// One frame of a controller buffer query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlSample {
    pub buttons: u32,
    pub left_x: u8,
    pub left_y: u8,
    pub right_x: u8,
    pub right_y: u8,
}

impl CtrlSample {
    /// A frame with no buttons down and centered sticks.
    pub fn idle(logic: ButtonLogic) -> Self {
        Self {
            buttons: logic.idle_buttons(),
            left_x: AXIS_NEUTRAL,
            left_y: AXIS_NEUTRAL,
            right_x: AXIS_NEUTRAL,
            right_y: AXIS_NEUTRAL,
        }
    }

    /// Reset this frame to idle in place.
    pub fn reset(&mut self, logic: ButtonLogic) {
        *self = Self::idle(logic);
    }
}

impl Default for CtrlSample {
    fn default() -> Self {
        Self::idle(ButtonLogic::Positive)
    }
}

/// One touch contact in host screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchReport {
    pub id: u8,
    pub x: u16,
    pub y: u16,
}

/// One frame of a touch buffer query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchSample {
    pub reports: [TouchReport; MAX_TOUCH_REPORTS],
    /// Number of valid entries in `reports`.
    pub count: u8,
}

impl Default for TouchSample {
    fn default() -> Self {
        Self {
            reports: [TouchReport::default(); MAX_TOUCH_REPORTS],
            count: 0,
        }
    }
}

/// Result of a motion-state query.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionSample {
    pub acceleration: Vec3,
    pub angular_velocity: Vec3,
}

/// Device-kind codes the port-info query reports per port.
pub mod port_kind {
    /// Nothing attached.
    pub const NONE: u8 = 0;
    /// The host's fixed code for a DualShock 4; every managed device is
    /// spoofed as one so applications enable their full pad mappings.
    pub const DUALSHOCK4: u8 = 8;
}

/// Result of a controller port-info query: one device-kind code per port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortInfo {
    pub ports: [u8; MAX_PORTS],
}

impl Default for PortInfo {
    fn default() -> Self {
        Self {
            ports: [port_kind::NONE; MAX_PORTS],
        }
    }
}
