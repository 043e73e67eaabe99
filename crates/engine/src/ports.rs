//! Port traits at the engine's boundaries
//!
//! Two collaborators are abstracted here: the transport that owns the
//! wireless link (events in, requests out) and the host input surface the
//! bridge augments. The service crate provides the production adapters;
//! tests script both.

use async_trait::async_trait;
use thiserror::Error;

use openpad_device_types::DeviceIdentity;
use openpad_inject::{CtrlSample, MotionSample, PortInfo, TouchSample};

/// One asynchronous transport event, keyed by device identity.
///
/// The transport guarantees per-device ordering: no event for a session can
/// arrive after that session's `Terminated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A device finished connecting at the transport level.
    Accepted {
        identity: DeviceIdentity,
        vendor_id: u16,
        product_id: u16,
    },
    /// The link to a device is gone.
    Terminated { identity: DeviceIdentity },
    /// A previously issued read request completed with a raw report.
    ReadReply {
        identity: DeviceIdentity,
        frame: Vec<u8>,
    },
    /// A previously issued write request completed.
    WriteReply { identity: DeviceIdentity },
    /// A previously issued feature request completed.
    FeatureReply { identity: DeviceIdentity },
    /// The transport's event queue overflowed and dropped events.
    Overflow { lost: usize },
}

/// Kind of request issued to a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Read,
    Write,
    Feature,
}

/// Failures from the transport request port.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("device {identity} is no longer connected")]
    DeviceGone { identity: DeviceIdentity },

    #[error("transport request failed: {reason}")]
    RequestFailed { reason: String },
}

/// Outgoing half of the transport: fire-and-forget requests.
///
/// A successful `request` only means the request was issued; the reply
/// arrives later as a [`TransportEvent`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a read, write, or feature request to a device. Read requests
    /// carry an empty payload.
    async fn request(
        &self,
        identity: DeviceIdentity,
        kind: RequestKind,
        payload: Vec<u8>,
    ) -> Result<(), TransportError>;

    /// Tear down the link to a device.
    async fn disconnect(&self, identity: DeviceIdentity) -> Result<(), TransportError>;
}

/// Host power management: called on every tick with real pad activity so
/// the host does not dim or sleep while someone plays on a paired pad.
pub trait KeepAwakePort: Send + Sync {
    fn power_tick(&self);
}

/// Host call failure, passed through to the bridge caller unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("host call failed: {code:#010X}")]
pub struct HostError {
    pub code: u32,
}

pub type HostResult<T> = Result<T, HostError>;

/// Which physical touch surface a touch query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPort {
    Front,
    Back,
}

/// Screen-space clip rectangle for region-restricted touch queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// The host's own polling surface, wrapped by [`crate::InputBridge`].
///
/// Every method mirrors a pre-existing host call: it fills caller-owned
/// frames and returns how many were filled. The bridge forwards the call,
/// then merges pad state into the successful result.
pub trait HostInputPort: Send + Sync {
    fn peek_buffer_positive(&self, port: usize, frames: &mut [CtrlSample]) -> HostResult<usize>;
    fn read_buffer_positive(&self, port: usize, frames: &mut [CtrlSample]) -> HostResult<usize>;
    fn peek_buffer_negative(&self, port: usize, frames: &mut [CtrlSample]) -> HostResult<usize>;
    fn read_buffer_negative(&self, port: usize, frames: &mut [CtrlSample]) -> HostResult<usize>;
    fn peek_buffer_positive_ext(&self, port: usize, frames: &mut [CtrlSample])
    -> HostResult<usize>;
    fn read_buffer_positive_ext(&self, port: usize, frames: &mut [CtrlSample])
    -> HostResult<usize>;

    fn controller_port_info(&self) -> HostResult<PortInfo>;
    fn battery_level(&self, port: usize) -> HostResult<u8>;

    fn touch_peek(&self, port: TouchPort, frames: &mut [TouchSample]) -> HostResult<usize>;
    fn touch_read(&self, port: TouchPort, frames: &mut [TouchSample]) -> HostResult<usize>;
    fn touch_peek_region(
        &self,
        port: TouchPort,
        region: TouchRegion,
        frames: &mut [TouchSample],
    ) -> HostResult<usize>;
    fn touch_read_region(
        &self,
        port: TouchPort,
        region: TouchRegion,
        frames: &mut [TouchSample],
    ) -> HostResult<usize>;

    fn motion_state(&self) -> HostResult<MotionSample>;

    /// Feed a button mask into the host's own button-emulation path, so
    /// system-level UI reacts to pad presses the host never saw itself.
    fn set_button_emulation(&self, port: usize, buttons: u32);
}
