//! Controller buffer and port-state merges

use openpad_device_types::{AXIS_NEUTRAL, ControlData};

use crate::wire::{ButtonLogic, CtrlSample, PortInfo, port_kind};

/// Compose one axis additively around the neutral midpoint.
///
/// The host's own contribution and the device's stack, so two legitimate
/// simultaneous sources (host hardware plus a paired pad on port 0) both
/// move the stick. Saturates at the byte range.
pub fn merge_axis(host: u8, device: u8) -> u8 {
    let sum = i16::from(host) + i16::from(device) - i16::from(AXIS_NEUTRAL);
    u8::try_from(sum.clamp(0, 255)).unwrap_or(AXIS_NEUTRAL)
}

/// Merge canonical state into every frame of a controller buffer.
///
/// Ports 1 and up are reset to idle first: the host reports nothing real
/// for them, and stale host bytes must not leak through. Port 0 is additive
/// on top of the host's own result. Buttons OR in (positive logic) or
/// AND-NOT out (negative logic); both are idempotent, so re-running a merge
/// with the same state changes nothing.
pub fn merge_control_frames(
    frames: &mut [CtrlSample],
    port: usize,
    state: &ControlData,
    logic: ButtonLogic,
) {
    for frame in frames.iter_mut() {
        if port > 0 {
            frame.reset(logic);
        }

        match logic {
            ButtonLogic::Positive => frame.buttons |= state.buttons,
            ButtonLogic::Negative => frame.buttons &= !state.buttons,
        }

        frame.left_x = merge_axis(frame.left_x, state.left_x);
        frame.left_y = merge_axis(frame.left_y, state.left_y);
        frame.right_x = merge_axis(frame.right_x, state.right_x);
        frame.right_y = merge_axis(frame.right_y, state.right_y);
    }
}

/// Overwrite the port-info entries for live slots with the spoofed kind.
///
/// Slot N answers for logical port N + 1; port 0 is the host's own and is
/// left alone.
pub fn spoof_port_info(info: &mut PortInfo, live_slots: impl Iterator<Item = usize>) {
    for slot in live_slots {
        if let Some(entry) = info.ports.get_mut(slot.wrapping_add(1)) {
            *entry = port_kind::DUALSHOCK4;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openpad_device_types::buttons;

    fn pressed_state() -> ControlData {
        ControlData::new()
            .with_buttons(buttons::CROSS | buttons::START)
            .with_left_stick(255, 127)
            .with_right_stick(127, 0)
    }

    #[test]
    fn test_positive_merge_is_or_over_clear_baseline() {
        let mut frames = [CtrlSample::idle(ButtonLogic::Positive)];
        merge_control_frames(&mut frames, 1, &pressed_state(), ButtonLogic::Positive);
        assert_eq!(frames[0].buttons, buttons::CROSS | buttons::START);
        assert_eq!(frames[0].left_x, 255);
        assert_eq!(frames[0].left_y, 127);
        assert_eq!(frames[0].right_y, 0);
    }

    #[test]
    fn test_negative_merge_is_and_not_over_set_baseline() {
        let mut frames = [CtrlSample::idle(ButtonLogic::Negative)];
        merge_control_frames(&mut frames, 1, &pressed_state(), ButtonLogic::Negative);
        assert_eq!(frames[0].buttons, !(buttons::CROSS | buttons::START));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let state = pressed_state();
        for logic in [ButtonLogic::Positive, ButtonLogic::Negative] {
            let mut once = [CtrlSample::idle(logic)];
            merge_control_frames(&mut once, 2, &state, logic);
            let mut twice = once;
            merge_control_frames(&mut twice, 2, &state, logic);
            assert_eq!(once[0].buttons, twice[0].buttons, "{logic:?}");
        }
    }

    #[test]
    fn test_nonzero_port_discards_host_residue() {
        let mut frames = [CtrlSample {
            buttons: 0xDEAD_BEEF,
            left_x: 3,
            left_y: 250,
            right_x: 77,
            right_y: 99,
        }];
        merge_control_frames(&mut frames, 1, &ControlData::default(), ButtonLogic::Positive);
        assert_eq!(frames[0], CtrlSample::idle(ButtonLogic::Positive));
    }

    #[test]
    fn test_port_zero_composes_with_host_input() {
        let mut frames = [CtrlSample {
            buttons: buttons::TRIANGLE,
            left_x: 150,
            left_y: 127,
            right_x: 127,
            right_y: 127,
        }];
        merge_control_frames(&mut frames, 0, &pressed_state(), ButtonLogic::Positive);
        // Host's own press survives alongside the device's.
        assert_eq!(
            frames[0].buttons,
            buttons::TRIANGLE | buttons::CROSS | buttons::START
        );
        // 150 + 255 - 127 saturates.
        assert_eq!(frames[0].left_x, 255);
        assert_eq!(frames[0].right_y, 0);
    }

    #[test]
    fn test_every_frame_in_the_buffer_is_merged() {
        let mut frames = [CtrlSample::idle(ButtonLogic::Positive); 3];
        merge_control_frames(&mut frames, 1, &pressed_state(), ButtonLogic::Positive);
        for frame in frames {
            assert_eq!(frame.buttons, buttons::CROSS | buttons::START);
        }
    }

    #[test]
    fn test_merge_axis_saturates_both_ends() {
        assert_eq!(merge_axis(127, 127), 127);
        assert_eq!(merge_axis(0, 0), 0);
        assert_eq!(merge_axis(255, 255), 255);
        assert_eq!(merge_axis(100, 150), 123);
    }

    #[test]
    fn test_spoof_marks_only_live_slots() {
        let mut info = PortInfo::default();
        info.ports[0] = 1; // host's own entry stays
        spoof_port_info(&mut info, [0usize, 2].into_iter());
        assert_eq!(info.ports, [1, port_kind::DUALSHOCK4, 0, port_kind::DUALSHOCK4, 0]);
    }

    #[test]
    fn test_spoof_ignores_out_of_range_slots() {
        let mut info = PortInfo::default();
        spoof_port_info(&mut info, [9usize].into_iter());
        assert_eq!(info, PortInfo::default());
    }
}
