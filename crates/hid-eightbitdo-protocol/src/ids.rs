//! Device IDs for 8BitDo products
//!
//! 8BitDo pads that expose their own identity use VID `0x2DC8`. Note that the
//! Pro-series pads in Switch-compatible mode instead present Nintendo's
//! VID/PID and are handled by the Switch Pro decoder, not this one.
//!
//! Sources: USB VID registry, `lsusb` output from a wired Lite 2.

pub const EIGHTBITDO_VENDOR_ID: u16 = 0x2DC8;

/// Lite 2 gamepad (wired / Bluetooth classic).
pub const LITE2_PID: u16 = 0x5112;

pub fn is_eightbitdo_device(vendor_id: u16) -> bool {
    vendor_id == EIGHTBITDO_VENDOR_ID
}

pub fn is_lite2(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == EIGHTBITDO_VENDOR_ID && product_id == LITE2_PID
}
