//! Stick axis helpers

/// Symmetric dead-zone around an axis rest value.
///
/// Reports `center` whenever the raw value is within `tolerance` of it,
/// otherwise the raw value unchanged.
pub fn apply_deadzone(value: u8, center: u8, tolerance: u8) -> u8 {
    let delta = i16::from(value) - i16::from(center);
    if delta.unsigned_abs() <= u16::from(tolerance) {
        center
    } else {
        value
    }
}

/// Unpack two 12-bit values from a 3-byte group.
///
/// Layout used by both Switch Pro stick words and DualShock 4 trackpad
/// coordinates: `a = b0 | (b1.lo << 8)`, `b = b1.hi | (b2 << 4)`.
pub fn unpack_u12_pair(bytes: [u8; 3]) -> (u16, u16) {
    let a = u16::from(bytes[0]) | (u16::from(bytes[1] & 0x0F) << 8);
    let b = u16::from(bytes[1] >> 4) | (u16::from(bytes[2]) << 4);
    (a, b)
}
