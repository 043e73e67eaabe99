//! Device IDs for Switch Pro compatible pads
//!
//! First-party Pro Controllers use Nintendo's VID `0x057E`. Several
//! third-party pads clone the identity byte-for-byte when put in
//! Switch-compatible mode (8BitDo Pro 2/Pro 3, PowerA wired pads), so a
//! VID/PID match here means "speaks the Pro Controller protocol", not
//! "built by Nintendo".
//!
//! Sources: USB VID registry, `lsusb` output from a Pro Controller and an
//! 8BitDo Pro 3 in Switch mode.

pub const NINTENDO_VENDOR_ID: u16 = 0x057E;

/// Switch Pro Controller (USB and Bluetooth use the same PID).
pub const SWITCH_PRO_PID: u16 = 0x2009;

pub fn is_nintendo_device(vendor_id: u16) -> bool {
    vendor_id == NINTENDO_VENDOR_ID
}

pub fn is_switch_pro(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == NINTENDO_VENDOR_ID && product_id == SWITCH_PRO_PID
}
