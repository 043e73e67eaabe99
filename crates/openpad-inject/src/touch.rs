//! Touch coordinate scaling and touch buffer replacement

use openpad_device_types::TouchData;

use crate::wire::{SCREEN_HEIGHT, SCREEN_WIDTH, TouchReport, TouchSample};

/// Scale one device-native coordinate into host screen space.
///
/// The device margins of `dead` units per edge are unreachable in practice,
/// so the usable band `[dead, native - dead]` maps linearly onto
/// `[0, host_size)`. Output is clamped into the host range, including for
/// raw values inside the margins.
pub fn scale_touch_coord(raw: u16, native: u16, dead: u16, host_size: u16) -> u16 {
    let span = i32::from(native) - 2 * i32::from(dead);
    if span <= 0 || host_size == 0 {
        return 0;
    }
    let scaled = (i32::from(raw) - i32::from(dead)) * i32::from(host_size) / span;
    u16::try_from(scaled.clamp(0, i32::from(host_size) - 1)).unwrap_or(0)
}

/// Replace the host's touch report with the device's active touches.
///
/// No active device touch leaves the host frames untouched. Otherwise the
/// device's contacts overwrite the report wholesale; host-reported touches
/// for the same frame are dropped rather than appended so the report count
/// can never overflow.
pub fn merge_touch_frames(frames: &mut [TouchSample], touch: &TouchData) {
    if !touch.any_active() {
        return;
    }

    for frame in frames.iter_mut() {
        let mut count = 0usize;
        for point in touch.points.iter().filter(|point| point.active) {
            if let Some(report) = frame.reports.get_mut(count) {
                *report = TouchReport {
                    id: point.id,
                    x: scale_touch_coord(point.x, touch.width, touch.dead_x, SCREEN_WIDTH),
                    y: scale_touch_coord(point.y, touch.height, touch.dead_y, SCREEN_HEIGHT),
                };
                count = count.wrapping_add(1);
            }
        }
        frame.count = u8::try_from(count).unwrap_or(0);
    }
}
