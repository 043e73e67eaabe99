//! Per-device record and canonical state

use openpad_device_types::{ControlData, DeviceIdentity, MotionState, TouchData};

use crate::decoder::{DecodeOutcome, Decoder};

/// Battery percentage reported until a decoder learns better.
pub const FULL_BATTERY_PERCENT: u8 = 100;

/// Latest decoded state for one device.
///
/// Fully initialized to neutral before the first report arrives, so
/// injection never sees uninitialized axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceState {
    pub control: ControlData,
    pub touch: TouchData,
    pub motion: MotionState,
    pub battery_percent: u8,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            control: ControlData::default(),
            touch: TouchData::default(),
            motion: MotionState::default(),
            battery_percent: FULL_BATTERY_PERCENT,
        }
    }
}

/// One connected device: identity, decoder, and the state its reports
/// decode into.
#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    pub identity: DeviceIdentity,
    pub vendor_id: u16,
    pub product_id: u16,
    pub decoder: Decoder,
    pub state: DeviceState,
    /// Leading byte of the most recent report, for shape-change diagnostics.
    pub last_report_id: Option<u8>,
}

impl Controller {
    pub fn new(identity: DeviceIdentity, vendor_id: u16, product_id: u16, decoder: Decoder) -> Self {
        Self {
            identity,
            vendor_id,
            product_id,
            decoder,
            state: DeviceState::default(),
            last_report_id: None,
        }
    }

    /// Feed one raw input report through this device's decoder.
    ///
    /// On success the canonical state is rewritten wholesale; on any parse
    /// failure it is left exactly as it was.
    pub fn process_report(&mut self, frame: &[u8]) -> DecodeOutcome {
        self.decoder.process(frame, &mut self.state)
    }

    /// Record the frame's leading byte, returning the previous one when the
    /// shape changed.
    pub fn observe_report_id(&mut self, leading: u8) -> Option<Option<u8>> {
        let previous = self.last_report_id.replace(leading);
        if previous == Some(leading) {
            None
        } else {
            Some(previous)
        }
    }
}
