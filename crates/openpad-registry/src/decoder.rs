//! Decoder selection and dispatch
//!
//! One tagged variant per supported report protocol. Selection happens once
//! at connect time from the VID/PID pair; after that every report for the
//! device funnels through [`Decoder::process`], which owns the little
//! per-device protocol state some pads need (the Switch Pro standard-mode
//! latch). The protocol crates themselves stay pure.

use openpad_hid_common::ReportError;

use hid_dualshock4_protocol::Ds4InputReport;
use hid_eightbitdo_protocol::Lite2InputReport;
use hid_switch_pro_protocol::{SwitchProInputReport, standard_mode_request};

use crate::controller::DeviceState;

/// What a decode pass did with the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Canonical state was rewritten from the frame.
    Updated,
    /// Frame was unusable; state is untouched.
    Skipped { reason: ReportError },
    /// Frame was unusable and the device wants this payload written before
    /// it will produce usable reports. State is untouched.
    FollowUpWrite { payload: Vec<u8> },
}

/// Report decoder for one device, selected at connect time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoder {
    /// 8BitDo Lite 2.
    Lite2,
    /// Switch Pro Controller and compatible pads.
    SwitchPro {
        /// One-shot latch: the standard-mode request is sent at most once
        /// per connection, and never at connect.
        requested_standard_mode: bool,
    },
    /// Sony DualShock 4, both hardware revisions.
    DualShock4,
}

impl Decoder {
    /// Pick a decoder for a device identity. First match wins.
    pub fn identify(vendor_id: u16, product_id: u16) -> Option<Self> {
        // 8BitDo (0x2DC8)
        if hid_eightbitdo_protocol::is_lite2(vendor_id, product_id) {
            return Some(Self::Lite2);
        }

        // Nintendo (0x057E). Also covers Switch-compatible pads that clone
        // the Pro Controller identity, such as the 8BitDo Pro 3.
        if hid_switch_pro_protocol::is_switch_pro(vendor_id, product_id) {
            return Some(Self::SwitchPro {
                requested_standard_mode: false,
            });
        }

        // Sony (0x054C)
        if hid_dualshock4_protocol::is_dualshock4(vendor_id, product_id) {
            return Some(Self::DualShock4);
        }

        None
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Lite2 => "8BitDo Lite 2",
            Self::SwitchPro { .. } => "Switch Pro Controller",
            Self::DualShock4 => "DualShock 4",
        }
    }

    /// Decode one raw report into `state`.
    ///
    /// Unusable frames leave `state` untouched: either skipped outright or,
    /// for a Switch pad still in subcommand mode, answered with the one-shot
    /// standard-mode request.
    pub fn process(&mut self, frame: &[u8], state: &mut DeviceState) -> DecodeOutcome {
        match self {
            Self::Lite2 => match Lite2InputReport::parse(frame) {
                Ok(report) => {
                    state.control = report.control_data();
                    DecodeOutcome::Updated
                }
                Err(reason) => DecodeOutcome::Skipped { reason },
            },
            Self::SwitchPro {
                requested_standard_mode,
            } => match SwitchProInputReport::parse(frame) {
                Ok(report) => {
                    state.control = report.control_data();
                    if let Some(motion) = report.motion_state() {
                        state.motion = motion;
                    }
                    DecodeOutcome::Updated
                }
                Err(ReportError::UnrecognizedType { .. }) if !*requested_standard_mode => {
                    *requested_standard_mode = true;
                    DecodeOutcome::FollowUpWrite {
                        payload: standard_mode_request(),
                    }
                }
                Err(reason) => DecodeOutcome::Skipped { reason },
            },
            Self::DualShock4 => match Ds4InputReport::parse(frame) {
                Ok(report) => {
                    state.control = report.control_data();
                    if let Some(touch) = report.touch_data() {
                        state.touch = touch;
                    }
                    if let Some(motion) = report.motion_state() {
                        state.motion = motion;
                    }
                    if let Some(percent) = report.battery_percent {
                        state.battery_percent = percent;
                    }
                    DecodeOutcome::Updated
                }
                Err(reason) => DecodeOutcome::Skipped { reason },
            },
        }
    }
}
