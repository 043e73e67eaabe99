//! Property-based tests for the injection merge policy.
//!
//! Uses proptest with 500 cases to verify the button merge laws, additive
//! axis composition, and touch coordinate scaling bounds.

use openpad_device_types::{ControlData, TouchData, TouchPoint};
use openpad_inject::{
    ButtonLogic, CtrlSample, TouchSample, merge_axis, merge_control_frames, merge_touch_frames,
    scale_touch_coord,
};
use proptest::prelude::*;

fn arb_state() -> impl Strategy<Value = ControlData> {
    (any::<u32>(), any::<[u8; 4]>()).prop_map(|(buttons, axes)| ControlData {
        buttons,
        left_x: axes[0],
        left_y: axes[1],
        right_x: axes[2],
        right_y: axes[3],
    })
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    // -- Button merge laws ----------------------------------------------------

    /// Positive merge over an all-clear baseline is exactly the device mask.
    #[test]
    fn prop_positive_merge_is_pure_or(state in arb_state(), port in 1usize..5) {
        let mut frames = [CtrlSample::idle(ButtonLogic::Positive)];
        merge_control_frames(&mut frames, port, &state, ButtonLogic::Positive);
        prop_assert_eq!(frames[0].buttons, state.buttons);
    }

    /// Negative merge over an all-set baseline is exactly the complement.
    #[test]
    fn prop_negative_merge_is_pure_and_not(state in arb_state(), port in 1usize..5) {
        let mut frames = [CtrlSample::idle(ButtonLogic::Negative)];
        merge_control_frames(&mut frames, port, &state, ButtonLogic::Negative);
        prop_assert_eq!(frames[0].buttons, !state.buttons);
    }

    /// Applying the same merge twice must change nothing the second time.
    #[test]
    fn prop_merge_idempotent(state in arb_state(), port in 0usize..5, host_buttons: u32) {
        for logic in [ButtonLogic::Positive, ButtonLogic::Negative] {
            let mut frames = [CtrlSample { buttons: host_buttons, ..CtrlSample::idle(logic) }];
            merge_control_frames(&mut frames, port, &state, logic);
            let first = frames[0].buttons;
            // Feed the merged button word back through with neutral axes so
            // only the button law is under test.
            let mut again = [CtrlSample { buttons: first, ..CtrlSample::idle(logic) }];
            merge_control_frames(&mut again, port, &state, logic);
            prop_assert_eq!(again[0].buttons, first);
        }
    }

    /// A nonzero port never leaks host residue into the result.
    #[test]
    fn prop_nonzero_port_result_independent_of_host(
        state in arb_state(),
        host in arb_state(),
        port in 1usize..5,
    ) {
        let mut from_idle = [CtrlSample::idle(ButtonLogic::Positive)];
        merge_control_frames(&mut from_idle, port, &state, ButtonLogic::Positive);

        let mut from_residue = [CtrlSample {
            buttons: host.buttons,
            left_x: host.left_x,
            left_y: host.left_y,
            right_x: host.right_x,
            right_y: host.right_y,
        }];
        merge_control_frames(&mut from_residue, port, &state, ButtonLogic::Positive);

        prop_assert_eq!(from_idle[0], from_residue[0]);
    }

    // -- Axis composition -----------------------------------------------------

    /// Merging a neutral device axis is the identity on the host value.
    #[test]
    fn prop_neutral_device_axis_is_identity(host: u8) {
        prop_assert_eq!(merge_axis(host, 127), host);
    }

    /// Axis merge is symmetric in its two contributions.
    #[test]
    fn prop_axis_merge_commutes(a: u8, b: u8) {
        prop_assert_eq!(merge_axis(a, b), merge_axis(b, a));
    }

    // -- Touch scaling --------------------------------------------------------

    /// Scaled coordinates always land inside the host range.
    #[test]
    fn prop_scale_in_host_range(raw: u16, native in 1u16..4096, dead in 0u16..128, host in 1u16..4096) {
        let scaled = scale_touch_coord(raw, native, dead, host);
        prop_assert!(scaled < host, "raw={} scaled={} host={}", raw, scaled, host);
    }

    /// Scaling is monotonic in the raw coordinate.
    #[test]
    fn prop_scale_monotonic(a: u16, b: u16, native in 256u16..4096, dead in 0u16..100, host in 1u16..4096) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            scale_touch_coord(lo, native, dead, host) <= scale_touch_coord(hi, native, dead, host)
        );
    }

    /// With no active touch the host sample survives verbatim.
    #[test]
    fn prop_touch_merge_noop_without_contacts(count in 0u8..9, id: u8, x: u16, y: u16) {
        let mut sample = TouchSample::default();
        sample.count = count;
        for report in sample.reports.iter_mut() {
            *report = openpad_inject::TouchReport { id, x, y };
        }
        let before = sample;

        let touch = TouchData {
            points: [TouchPoint { active: false, id: 1, x: 10, y: 10 }; 2],
            width: 1920,
            height: 942,
            dead_x: 60,
            dead_y: 45,
        };
        let mut frames = [sample];
        merge_touch_frames(&mut frames, &touch);
        prop_assert_eq!(frames[0], before);
    }
}
