//! Device IDs for DualShock 4 pads
//!
//! Sony uses VID `0x054C` for both hardware revisions. The V2 (CUH-ZCT2)
//! added the light bar strip and reports over USB slightly faster, but the
//! input report layout is identical.
//!
//! Sources: USB VID registry, `lsusb` output from both pad revisions.

pub const SONY_VENDOR_ID: u16 = 0x054C;

/// DualShock 4 V1 (CUH-ZCT1).
pub const DUALSHOCK4_V1_PID: u16 = 0x05C4;
/// DualShock 4 V2 (CUH-ZCT2).
pub const DUALSHOCK4_V2_PID: u16 = 0x09CC;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ds4Model {
    V1,
    V2,
    Unknown,
}

impl Ds4Model {
    pub fn from_product_id(product_id: u16) -> Self {
        match product_id {
            DUALSHOCK4_V1_PID => Self::V1,
            DUALSHOCK4_V2_PID => Self::V2,
            _ => Self::Unknown,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::V1 => "DualShock 4",
            Self::V2 => "DualShock 4 V2",
            Self::Unknown => "Unknown Sony Pad",
        }
    }
}

pub fn is_sony_device(vendor_id: u16) -> bool {
    vendor_id == SONY_VENDOR_ID
}

pub fn is_dualshock4(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == SONY_VENDOR_ID
        && matches!(product_id, DUALSHOCK4_V1_PID | DUALSHOCK4_V2_PID)
}
