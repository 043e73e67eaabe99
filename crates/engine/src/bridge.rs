//! Injection facade over the host's polling surface
//!
//! Every query goes to the host first; pad state is merged only into
//! buffers the host actually filled. Failures pass through untouched, so
//! callers keep seeing exactly the host's own error codes.

use std::sync::Arc;

use openpad_device_types::buttons;
use openpad_inject::{
    ButtonLogic, CtrlSample, MotionSample, PortInfo, TouchSample, merge_control_frames,
    merge_touch_frames, spoof_port_info,
};

use crate::ports::{HostInputPort, HostResult, TouchPort, TouchRegion};
use crate::worker::SharedRegistry;

/// Wraps a [`HostInputPort`] and augments successful results with the
/// registry's canonical pad state.
///
/// Cheap to clone and fully synchronous; call sites sit on the host's own
/// polling paths and must not block beyond a short registry read lock.
#[derive(Clone)]
pub struct InputBridge {
    registry: SharedRegistry,
    host: Arc<dyn HostInputPort>,
}

impl InputBridge {
    pub fn new(registry: SharedRegistry, host: Arc<dyn HostInputPort>) -> Self {
        Self { registry, host }
    }

    pub fn peek_buffer_positive(
        &self,
        port: usize,
        frames: &mut [CtrlSample],
    ) -> HostResult<usize> {
        let filled = self.host.peek_buffer_positive(port, frames)?;
        self.merge_control(port, frames, filled, ButtonLogic::Positive);
        Ok(filled)
    }

    pub fn read_buffer_positive(
        &self,
        port: usize,
        frames: &mut [CtrlSample],
    ) -> HostResult<usize> {
        let filled = self.host.read_buffer_positive(port, frames)?;
        self.merge_control(port, frames, filled, ButtonLogic::Positive);
        Ok(filled)
    }

    pub fn peek_buffer_negative(
        &self,
        port: usize,
        frames: &mut [CtrlSample],
    ) -> HostResult<usize> {
        let filled = self.host.peek_buffer_negative(port, frames)?;
        self.merge_control(port, frames, filled, ButtonLogic::Negative);
        Ok(filled)
    }

    pub fn read_buffer_negative(
        &self,
        port: usize,
        frames: &mut [CtrlSample],
    ) -> HostResult<usize> {
        let filled = self.host.read_buffer_negative(port, frames)?;
        self.merge_control(port, frames, filled, ButtonLogic::Negative);
        Ok(filled)
    }

    pub fn peek_buffer_positive_ext(
        &self,
        port: usize,
        frames: &mut [CtrlSample],
    ) -> HostResult<usize> {
        let filled = self.host.peek_buffer_positive_ext(port, frames)?;
        self.merge_control(port, frames, filled, ButtonLogic::Positive);
        Ok(filled)
    }

    pub fn read_buffer_positive_ext(
        &self,
        port: usize,
        frames: &mut [CtrlSample],
    ) -> HostResult<usize> {
        let filled = self.host.read_buffer_positive_ext(port, frames)?;
        self.merge_control(port, frames, filled, ButtonLogic::Positive);
        Ok(filled)
    }

    pub fn controller_port_info(&self) -> HostResult<PortInfo> {
        let mut info = self.host.controller_port_info()?;
        let registry = self.registry.read();
        spoof_port_info(&mut info, registry.live().map(|(slot, _)| slot.index()));
        Ok(info)
    }

    /// Per-port battery. Port 0 is the host's own gauge and always forwards;
    /// a managed port answers from canonical state without a host call.
    pub fn battery_level(&self, port: usize) -> HostResult<u8> {
        if port > 0 {
            let registry = self.registry.read();
            if let Some(controller) = registry.port_controller(port) {
                return Ok(controller.state.battery_percent);
            }
        }
        self.host.battery_level(port)
    }

    pub fn touch_peek(&self, port: TouchPort, frames: &mut [TouchSample]) -> HostResult<usize> {
        let filled = self.host.touch_peek(port, frames)?;
        self.merge_touch(port, frames, filled);
        Ok(filled)
    }

    pub fn touch_read(&self, port: TouchPort, frames: &mut [TouchSample]) -> HostResult<usize> {
        let filled = self.host.touch_read(port, frames)?;
        self.merge_touch(port, frames, filled);
        Ok(filled)
    }

    pub fn touch_peek_region(
        &self,
        port: TouchPort,
        region: TouchRegion,
        frames: &mut [TouchSample],
    ) -> HostResult<usize> {
        let filled = self.host.touch_peek_region(port, region, frames)?;
        self.merge_touch(port, frames, filled);
        Ok(filled)
    }

    pub fn touch_read_region(
        &self,
        port: TouchPort,
        region: TouchRegion,
        frames: &mut [TouchSample],
    ) -> HostResult<usize> {
        let filled = self.host.touch_read_region(port, region, frames)?;
        self.merge_touch(port, frames, filled);
        Ok(filled)
    }

    pub fn motion_state(&self) -> HostResult<MotionSample> {
        let mut sample = self.host.motion_state()?;
        let registry = self.registry.read();
        if let Some(controller) = registry.by_index(0) {
            sample.acceleration = controller.state.motion.acceleration;
            sample.angular_velocity = controller.state.motion.angular_velocity;
        }
        Ok(sample)
    }

    fn merge_control(
        &self,
        port: usize,
        frames: &mut [CtrlSample],
        filled: usize,
        logic: ButtonLogic,
    ) {
        let state = {
            let registry = self.registry.read();
            match registry.port_controller(port) {
                Some(controller) => controller.state.control,
                None => return,
            }
        };

        // The host cannot report the system button itself; route it through
        // its emulation path so system UI still reacts.
        if state.pressed(buttons::SYSTEM) {
            self.host.set_button_emulation(port, buttons::SYSTEM);
        }

        if let Some(frames) = frames.get_mut(..filled) {
            merge_control_frames(frames, port, &state, logic);
        }
    }

    fn merge_touch(&self, port: TouchPort, frames: &mut [TouchSample], filled: usize) {
        // Only the front surface has a device counterpart; back-surface
        // queries stay host-only.
        if port != TouchPort::Front {
            return;
        }
        let touch = {
            let registry = self.registry.read();
            match registry.by_index(0) {
                Some(controller) => controller.state.touch,
                None => return,
            }
        };
        if let Some(frames) = frames.get_mut(..filled) {
            merge_touch_frames(frames, &touch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use parking_lot::Mutex;

    use openpad_device_types::{
        AXIS_NEUTRAL, ControlData, DeviceIdentity, TouchData, TouchPoint, Vec3,
    };
    use openpad_inject::port_kind;
    use openpad_registry::{Controller, Decoder};

    use crate::ports::HostError;
    use crate::worker::shared_registry;

    /// Host double with canned answers and recorded emulation calls.
    #[derive(Default)]
    struct FakeHost {
        ctrl_frame: CtrlSample,
        ctrl_filled: usize,
        touch_frame: TouchSample,
        touch_filled: usize,
        port_info: PortInfo,
        battery: u8,
        motion: MotionSample,
        fail: bool,
        battery_calls: Mutex<Vec<usize>>,
        emulation_calls: Mutex<Vec<(usize, u32)>>,
    }

    impl FakeHost {
        fn fill_ctrl(&self, frames: &mut [CtrlSample]) -> HostResult<usize> {
            if self.fail {
                return Err(HostError { code: 0x8034_0001 });
            }
            for frame in frames.iter_mut().take(self.ctrl_filled) {
                *frame = self.ctrl_frame;
            }
            Ok(self.ctrl_filled)
        }

        fn fill_touch(&self, frames: &mut [TouchSample]) -> HostResult<usize> {
            if self.fail {
                return Err(HostError { code: 0x8034_0002 });
            }
            for frame in frames.iter_mut().take(self.touch_filled) {
                *frame = self.touch_frame;
            }
            Ok(self.touch_filled)
        }
    }

    impl HostInputPort for FakeHost {
        fn peek_buffer_positive(
            &self,
            _port: usize,
            frames: &mut [CtrlSample],
        ) -> HostResult<usize> {
            self.fill_ctrl(frames)
        }
        fn read_buffer_positive(
            &self,
            _port: usize,
            frames: &mut [CtrlSample],
        ) -> HostResult<usize> {
            self.fill_ctrl(frames)
        }
        fn peek_buffer_negative(
            &self,
            _port: usize,
            frames: &mut [CtrlSample],
        ) -> HostResult<usize> {
            self.fill_ctrl(frames)
        }
        fn read_buffer_negative(
            &self,
            _port: usize,
            frames: &mut [CtrlSample],
        ) -> HostResult<usize> {
            self.fill_ctrl(frames)
        }
        fn peek_buffer_positive_ext(
            &self,
            _port: usize,
            frames: &mut [CtrlSample],
        ) -> HostResult<usize> {
            self.fill_ctrl(frames)
        }
        fn read_buffer_positive_ext(
            &self,
            _port: usize,
            frames: &mut [CtrlSample],
        ) -> HostResult<usize> {
            self.fill_ctrl(frames)
        }

        fn controller_port_info(&self) -> HostResult<PortInfo> {
            if self.fail {
                return Err(HostError { code: 0x8034_0003 });
            }
            Ok(self.port_info)
        }

        fn battery_level(&self, port: usize) -> HostResult<u8> {
            self.battery_calls.lock().push(port);
            Ok(self.battery)
        }

        fn touch_peek(&self, _port: TouchPort, frames: &mut [TouchSample]) -> HostResult<usize> {
            self.fill_touch(frames)
        }
        fn touch_read(&self, _port: TouchPort, frames: &mut [TouchSample]) -> HostResult<usize> {
            self.fill_touch(frames)
        }
        fn touch_peek_region(
            &self,
            _port: TouchPort,
            _region: TouchRegion,
            frames: &mut [TouchSample],
        ) -> HostResult<usize> {
            self.fill_touch(frames)
        }
        fn touch_read_region(
            &self,
            _port: TouchPort,
            _region: TouchRegion,
            frames: &mut [TouchSample],
        ) -> HostResult<usize> {
            self.fill_touch(frames)
        }

        fn motion_state(&self) -> HostResult<MotionSample> {
            Ok(self.motion)
        }

        fn set_button_emulation(&self, port: usize, buttons: u32) {
            self.emulation_calls.lock().push((port, buttons));
        }
    }

    fn bridge_with(host: FakeHost) -> (InputBridge, SharedRegistry, Arc<FakeHost>) {
        let registry = shared_registry();
        let host = Arc::new(host);
        let bridge = InputBridge::new(
            Arc::clone(&registry),
            Arc::clone(&host) as Arc<dyn HostInputPort>,
        );
        (bridge, registry, host)
    }

    fn attach_controller(registry: &SharedRegistry, control: ControlData) {
        let serial = u32::try_from(registry.read().live_count()).unwrap_or(0);
        let mut controller = Controller::new(
            DeviceIdentity::new(0xAA, serial),
            0x2DC8,
            0x5112,
            Decoder::Lite2,
        );
        controller.state.control = control;
        assert!(registry.write().allocate(controller).is_ok());
    }

    /// Rewrite the first live controller's state in place.
    fn mutate_slot_zero(registry: &SharedRegistry, mutate: impl FnOnce(&mut Controller)) {
        let mut reg = registry.write();
        let slot = reg.live().next().map(|(slot, _)| slot);
        assert!(slot.is_some());
        if let Some(slot) = slot
            && let Some(controller) = reg.get_mut(slot)
        {
            mutate(controller);
        }
    }

    #[test]
    fn test_port_one_frames_reset_before_merge() {
        let (bridge, registry, _) = bridge_with(FakeHost {
            // Stale host garbage that must not leak through on port 1.
            ctrl_frame: CtrlSample {
                buttons: 0xFFFF,
                left_x: 3,
                left_y: 250,
                right_x: 0,
                right_y: 255,
            },
            ctrl_filled: 2,
            ..FakeHost::default()
        });
        attach_controller(
            &registry,
            ControlData::new().with_buttons(buttons::CROSS).with_left_stick(200, 127),
        );

        let mut frames = [CtrlSample::default(); 4];
        let filled = bridge.peek_buffer_positive(1, &mut frames);
        assert_eq!(filled, Ok(2));
        for frame in &frames[..2] {
            assert_eq!(frame.buttons, buttons::CROSS);
            assert_eq!(frame.left_x, 200);
            assert_eq!(frame.left_y, AXIS_NEUTRAL);
        }
        // Beyond the filled count nothing was touched.
        assert_eq!(frames[2], CtrlSample::default());
    }

    #[test]
    fn test_port_zero_merge_is_additive() {
        let (bridge, registry, _) = bridge_with(FakeHost {
            ctrl_frame: CtrlSample {
                buttons: buttons::TRIANGLE,
                left_x: 200,
                left_y: AXIS_NEUTRAL,
                right_x: AXIS_NEUTRAL,
                right_y: AXIS_NEUTRAL,
            },
            ctrl_filled: 1,
            ..FakeHost::default()
        });
        attach_controller(
            &registry,
            ControlData::new().with_buttons(buttons::CROSS).with_left_stick(200, 127),
        );

        let mut frames = [CtrlSample::default(); 1];
        let filled = bridge.read_buffer_positive(0, &mut frames);
        assert_eq!(filled, Ok(1));
        assert_eq!(frames[0].buttons, buttons::TRIANGLE | buttons::CROSS);
        // 200 + 200 - 127 saturates at the byte range.
        assert_eq!(frames[0].left_x, 255);
        assert_eq!(frames[0].left_y, AXIS_NEUTRAL);
    }

    #[test]
    fn test_negative_logic_clears_pressed_bits() {
        let (bridge, registry, _) = bridge_with(FakeHost {
            ctrl_frame: CtrlSample::idle(ButtonLogic::Negative),
            ctrl_filled: 1,
            ..FakeHost::default()
        });
        attach_controller(&registry, ControlData::new().with_buttons(buttons::SQUARE));

        let mut frames = [CtrlSample::idle(ButtonLogic::Negative); 1];
        let filled = bridge.read_buffer_negative(1, &mut frames);
        assert_eq!(filled, Ok(1));
        assert_eq!(frames[0].buttons, !buttons::SQUARE);
    }

    #[test]
    fn test_system_press_routes_through_button_emulation() {
        let (bridge, registry, host) = bridge_with(FakeHost {
            ctrl_filled: 1,
            ..FakeHost::default()
        });
        attach_controller(&registry, ControlData::new().with_buttons(buttons::SYSTEM));

        let mut frames = [CtrlSample::default(); 1];
        assert!(bridge.peek_buffer_positive(1, &mut frames).is_ok());
        assert_eq!(
            host.emulation_calls.lock().as_slice(),
            &[(1, buttons::SYSTEM)]
        );

        // Release: no further emulation calls.
        mutate_slot_zero(&registry, |controller| {
            controller.state.control.buttons = 0;
        });
        assert!(bridge.peek_buffer_positive(1, &mut frames).is_ok());
        assert_eq!(host.emulation_calls.lock().len(), 1);
    }

    #[test]
    fn test_empty_port_passes_host_result_through() {
        let (bridge, _, host) = bridge_with(FakeHost {
            ctrl_frame: CtrlSample {
                buttons: buttons::CIRCLE,
                ..CtrlSample::default()
            },
            ctrl_filled: 1,
            ..FakeHost::default()
        });

        let mut frames = [CtrlSample::default(); 1];
        let filled = bridge.peek_buffer_positive(2, &mut frames);
        assert_eq!(filled, Ok(1));
        assert_eq!(frames[0].buttons, buttons::CIRCLE);
        assert!(host.emulation_calls.lock().is_empty());
    }

    #[test]
    fn test_host_error_passes_through_unmerged() {
        let (bridge, registry, _) = bridge_with(FakeHost {
            fail: true,
            ..FakeHost::default()
        });
        attach_controller(&registry, ControlData::new().with_buttons(buttons::CROSS));

        let mut frames = [CtrlSample::default(); 1];
        let result = bridge.read_buffer_positive(1, &mut frames);
        assert_eq!(result, Err(HostError { code: 0x8034_0001 }));
        assert_eq!(frames[0], CtrlSample::default());
    }

    #[test]
    fn test_port_info_spoofs_live_slots_only() {
        let (bridge, registry, _) = bridge_with(FakeHost::default());
        attach_controller(&registry, ControlData::new());
        attach_controller(&registry, ControlData::new());

        let info = bridge.controller_port_info();
        assert!(info.is_ok());
        if let Ok(info) = info {
            assert_eq!(info.ports[0], port_kind::NONE);
            assert_eq!(info.ports[1], port_kind::DUALSHOCK4);
            assert_eq!(info.ports[2], port_kind::DUALSHOCK4);
            assert_eq!(info.ports[3], port_kind::NONE);
            assert_eq!(info.ports[4], port_kind::NONE);
        }
    }

    #[test]
    fn test_battery_override_skips_host_call() {
        let (bridge, registry, host) = bridge_with(FakeHost {
            battery: 55,
            ..FakeHost::default()
        });
        attach_controller(&registry, ControlData::new());
        mutate_slot_zero(&registry, |controller| {
            controller.state.battery_percent = 30;
        });

        assert_eq!(bridge.battery_level(1), Ok(30));
        assert!(host.battery_calls.lock().is_empty());

        // Port 0 and unmanaged ports stay on the host gauge.
        assert_eq!(bridge.battery_level(0), Ok(55));
        assert_eq!(bridge.battery_level(2), Ok(55));
        assert_eq!(host.battery_calls.lock().as_slice(), &[0, 2]);
    }

    fn front_touch_state() -> TouchData {
        // DualShock 4 trackpad geometry, one contact near the center.
        let mut touch = TouchData {
            width: 1920,
            height: 942,
            dead_x: 60,
            dead_y: 45,
            ..TouchData::default()
        };
        touch.points[0] = TouchPoint {
            active: true,
            id: 0,
            x: 960,
            y: 471,
        };
        touch
    }

    #[test]
    fn test_front_touch_replaces_host_report() {
        let mut host_frame = TouchSample::default();
        host_frame.count = 1;
        host_frame.reports[0] = openpad_inject::TouchReport { id: 9, x: 5, y: 5 };

        let (bridge, registry, _) = bridge_with(FakeHost {
            touch_frame: host_frame,
            touch_filled: 1,
            ..FakeHost::default()
        });
        attach_controller(&registry, ControlData::new());
        mutate_slot_zero(&registry, |controller| {
            controller.state.touch = front_touch_state();
        });

        let mut frames = [TouchSample::default(); 1];
        let filled = bridge.touch_peek(TouchPort::Front, &mut frames);
        assert_eq!(filled, Ok(1));
        assert_eq!(frames[0].count, 1);
        assert_eq!(frames[0].reports[0].x, 960);
        assert_eq!(frames[0].reports[0].y, 540);
    }

    #[test]
    fn test_back_touch_left_alone() {
        let mut host_frame = TouchSample::default();
        host_frame.count = 1;
        host_frame.reports[0] = openpad_inject::TouchReport { id: 9, x: 5, y: 5 };

        let (bridge, registry, _) = bridge_with(FakeHost {
            touch_frame: host_frame,
            touch_filled: 1,
            ..FakeHost::default()
        });
        attach_controller(&registry, ControlData::new());
        mutate_slot_zero(&registry, |controller| {
            controller.state.touch = front_touch_state();
        });

        let mut frames = [TouchSample::default(); 1];
        let filled = bridge.touch_read(TouchPort::Back, &mut frames);
        assert_eq!(filled, Ok(1));
        assert_eq!(frames[0].reports[0].x, 5);
    }

    #[test]
    fn test_region_touch_merges_like_whole_screen() {
        let (bridge, registry, _) = bridge_with(FakeHost {
            touch_filled: 1,
            ..FakeHost::default()
        });
        attach_controller(&registry, ControlData::new());
        mutate_slot_zero(&registry, |controller| {
            controller.state.touch = front_touch_state();
        });

        let region = TouchRegion {
            x: 0,
            y: 0,
            width: 1920,
            height: 1080,
        };
        let mut frames = [TouchSample::default(); 1];
        let filled = bridge.touch_read_region(TouchPort::Front, region, &mut frames);
        assert_eq!(filled, Ok(1));
        assert_eq!(frames[0].count, 1);
        assert_eq!(frames[0].reports[0].x, 960);
    }

    #[test]
    fn test_idle_touch_leaves_host_report() {
        let mut host_frame = TouchSample::default();
        host_frame.count = 1;
        host_frame.reports[0] = openpad_inject::TouchReport { id: 2, x: 7, y: 8 };

        let (bridge, registry, _) = bridge_with(FakeHost {
            touch_frame: host_frame,
            touch_filled: 1,
            ..FakeHost::default()
        });
        attach_controller(&registry, ControlData::new());

        let mut frames = [TouchSample::default(); 1];
        let filled = bridge.touch_peek(TouchPort::Front, &mut frames);
        assert_eq!(filled, Ok(1));
        assert_eq!(frames[0].reports[0].x, 7);
    }

    #[test]
    fn test_motion_overwritten_from_slot_zero() {
        let (bridge, registry, _) = bridge_with(FakeHost {
            motion: MotionSample {
                acceleration: Vec3::new(9.0, 9.0, 9.0),
                angular_velocity: Vec3::new(9.0, 9.0, 9.0),
            },
            ..FakeHost::default()
        });
        attach_controller(&registry, ControlData::new());
        mutate_slot_zero(&registry, |controller| {
            controller.state.motion.acceleration = Vec3::new(1.0, 2.0, 3.0);
            controller.state.motion.angular_velocity = Vec3::new(4.0, 5.0, 6.0);
        });

        let sample = bridge.motion_state();
        assert!(sample.is_ok());
        if let Ok(sample) = sample {
            assert!((sample.acceleration.z - 3.0).abs() < f32::EPSILON);
            assert!((sample.angular_velocity.x - 4.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_motion_passthrough_without_device() {
        let (bridge, _, _) = bridge_with(FakeHost {
            motion: MotionSample {
                acceleration: Vec3::new(0.0, 0.0, 1.0),
                angular_velocity: Vec3::default(),
            },
            ..FakeHost::default()
        });
        let sample = bridge.motion_state();
        assert!(sample.is_ok());
        if let Ok(sample) = sample {
            assert!((sample.acceleration.z - 1.0).abs() < f32::EPSILON);
        }
    }
}
