//! The bridge worker: transport events in, decoded state out
//!
//! A single tokio task owns all registry mutation. It blocks only waiting
//! for the next transport event or a shutdown signal, and every event is
//! handled in one short step so pad-to-screen latency stays bounded by the
//! transport, not by this loop.

use std::io::Write;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, trace, warn};

use openpad_capture_format::DeltaLogger;
use openpad_device_types::{AXIS_NEUTRAL, DeviceIdentity};
use openpad_registry::{
    Controller, ControllerRegistry, DecodeOutcome, Decoder, DeviceState, MAX_CONTROLLERS, SlotId,
};

use crate::ports::{KeepAwakePort, RequestKind, Transport, TransportEvent};

/// Registry handle shared between the worker (writer) and the injection
/// facade (readers).
pub type SharedRegistry = Arc<RwLock<ControllerRegistry>>;

/// Fresh empty registry behind its lock.
pub fn shared_registry() -> SharedRegistry {
    Arc::new(RwLock::new(ControllerRegistry::new()))
}

/// Stick displacement from center past which a tick counts as activity.
const AXIS_WAKE_THRESHOLD: u8 = 20;

/// Hex preview length for reads with no controller behind them.
const ORPHAN_DUMP_LEN: usize = 16;

/// Which reply a slot is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Awaiting {
    #[default]
    None,
    Read,
    Write,
    Feature,
}

type CaptureSink = Box<dyn Write + Send>;

/// Event-loop worker driving the connection/report state machine.
pub struct BridgeWorker {
    registry: SharedRegistry,
    transport: Arc<dyn Transport>,
    keep_awake: Arc<dyn KeepAwakePort>,
    events: mpsc::Receiver<TransportEvent>,
    shutdown: watch::Receiver<bool>,
    capture: Option<DeltaLogger<CaptureSink>>,
    awaiting: [Awaiting; MAX_CONTROLLERS],
}

impl BridgeWorker {
    pub fn new(
        registry: SharedRegistry,
        transport: Arc<dyn Transport>,
        keep_awake: Arc<dyn KeepAwakePort>,
        events: mpsc::Receiver<TransportEvent>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            registry,
            transport,
            keep_awake,
            events,
            shutdown,
            capture: None,
            awaiting: [Awaiting::None; MAX_CONTROLLERS],
        }
    }

    /// Attach a raw delta capture log fed every read reply before decoding.
    pub fn with_capture_log(mut self, sink: CaptureSink) -> Self {
        self.capture = Some(DeltaLogger::new(sink));
        self
    }

    /// Run until shutdown is signaled or the event channel closes, then
    /// disconnect and release every live controller.
    pub async fn run(mut self) {
        info!("bridge worker started");
        loop {
            tokio::select! {
                // Drain queued events before honoring shutdown, so tests and
                // orderly teardowns never drop in-flight replies.
                biased;
                event = self.events.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => {
                        debug!("transport event channel closed");
                        break;
                    }
                },
                result = self.shutdown.changed() => {
                    if result.is_err() || *self.shutdown.borrow() {
                        debug!("shutdown signaled");
                        break;
                    }
                }
            }
        }
        self.teardown().await;
        info!("bridge worker stopped");
    }

    async fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Accepted {
                identity,
                vendor_id,
                product_id,
            } => self.on_accepted(identity, vendor_id, product_id).await,
            TransportEvent::Terminated { identity } => self.on_terminated(identity),
            TransportEvent::ReadReply { identity, frame } => {
                self.on_read_reply(identity, &frame).await;
            }
            TransportEvent::WriteReply { identity } => {
                self.on_request_reply(identity, "write").await;
            }
            TransportEvent::FeatureReply { identity } => {
                self.on_request_reply(identity, "feature").await;
            }
            TransportEvent::Overflow { lost } => {
                // Recovery is simply to keep draining; the transport resumes
                // normal delivery once its queue has room again.
                warn!(lost, "transport event queue overflowed");
            }
        }
    }

    async fn on_accepted(&mut self, identity: DeviceIdentity, vendor_id: u16, product_id: u16) {
        let slot = {
            let mut registry = self.registry.write();
            if let Some(existing) = registry.find(identity) {
                debug!(%identity, slot = %existing, "re-accept for live device");
                Some(existing)
            } else {
                match Decoder::identify(vendor_id, product_id) {
                    None => {
                        warn!(
                            %identity,
                            vendor_id = format_args!("{vendor_id:#06X}"),
                            product_id = format_args!("{product_id:#06X}"),
                            "no decoder for device, leaving it unmanaged"
                        );
                        None
                    }
                    Some(decoder) => {
                        info!(%identity, decoder = decoder.display_name(), "device accepted");
                        match registry
                            .allocate(Controller::new(identity, vendor_id, product_id, decoder))
                        {
                            Ok(slot) => Some(slot),
                            Err(error) => {
                                warn!(%identity, %error, "ignoring connection");
                                None
                            }
                        }
                    }
                }
            }
        };

        // Devices that never push unsolicited reports still must be polled,
        // so the first read goes out as part of accept handling.
        if let Some(slot) = slot {
            self.issue_request(slot, identity, RequestKind::Read, Vec::new())
                .await;
        }
    }

    fn on_terminated(&mut self, identity: DeviceIdentity) {
        let mut registry = self.registry.write();
        match registry.find(identity) {
            Some(slot) => {
                info!(%identity, %slot, "device disconnected");
                registry.release(slot);
                drop(registry);
                self.set_awaiting(slot, Awaiting::None);
                if let Some(capture) = self.capture.as_mut() {
                    capture.reset_slot(slot.index());
                }
            }
            None => debug!(%identity, "termination for unmanaged device"),
        }
    }

    async fn on_read_reply(&mut self, identity: DeviceIdentity, frame: &[u8]) {
        let decoded = {
            let mut registry = self.registry.write();
            let Some(slot) = registry.find(identity) else {
                drop(registry);
                self.log_orphan_read(identity, frame);
                return;
            };

            if let Some(capture) = self.capture.as_mut()
                && let Err(error) = capture.observe(slot.index(), frame)
            {
                warn!(%error, "capture log write failed");
            }

            let Some(controller) = registry.get_mut(slot) else {
                return;
            };

            if let Some(leading) = frame.first()
                && let Some(previous) = controller.observe_report_id(*leading)
            {
                debug!(
                    %slot,
                    report_id = format_args!("{leading:#04X}"),
                    previous = ?previous,
                    "report shape changed"
                );
            }

            let outcome = controller.process_report(frame);
            let active = tick_active(&controller.state);
            Some((slot, outcome, active))
        };

        let Some((slot, outcome, active)) = decoded else {
            return;
        };

        if active {
            self.keep_awake.power_tick();
        }

        match outcome {
            DecodeOutcome::FollowUpWrite { payload } => {
                debug!(%slot, "device requested a mode-setting write");
                self.issue_request(slot, identity, RequestKind::Write, payload)
                    .await;
            }
            other => {
                if let DecodeOutcome::Skipped { reason } = other {
                    trace!(%slot, %reason, "frame skipped");
                }
                // Re-arm the read immediately; a gap here would leave the
                // device unpolled forever.
                self.issue_request(slot, identity, RequestKind::Read, Vec::new())
                    .await;
            }
        }
    }

    async fn on_request_reply(&mut self, identity: DeviceIdentity, kind: &'static str) {
        // Write/feature requests only occur during device initialization;
        // their replies chain straight back into input polling.
        let slot = self.registry.read().find(identity);
        match slot {
            Some(slot) => {
                trace!(%identity, %slot, kind, "request reply");
                self.issue_request(slot, identity, RequestKind::Read, Vec::new())
                    .await;
            }
            None => debug!(%identity, kind, "request reply for unmanaged device"),
        }
    }

    async fn issue_request(
        &mut self,
        slot: SlotId,
        identity: DeviceIdentity,
        kind: RequestKind,
        payload: Vec<u8>,
    ) {
        match self.transport.request(identity, kind, payload).await {
            Ok(()) => self.set_awaiting(
                slot,
                match kind {
                    RequestKind::Read => Awaiting::Read,
                    RequestKind::Write => Awaiting::Write,
                    RequestKind::Feature => Awaiting::Feature,
                },
            ),
            Err(error) => {
                warn!(%identity, ?kind, %error, "transport request failed");
                self.set_awaiting(slot, Awaiting::None);
            }
        }
    }

    fn set_awaiting(&mut self, slot: SlotId, awaiting: Awaiting) {
        if let Some(entry) = self.awaiting.get_mut(slot.index()) {
            *entry = awaiting;
        }
    }

    fn log_orphan_read(&self, identity: DeviceIdentity, frame: &[u8]) {
        let preview: Vec<String> = frame
            .iter()
            .take(ORPHAN_DUMP_LEN)
            .map(|byte| format!("{byte:02X}"))
            .collect();
        debug!(%identity, bytes = preview.join(" "), "read reply with no controller");
    }

    async fn teardown(&mut self) {
        let live: Vec<(SlotId, DeviceIdentity)> = self
            .registry
            .read()
            .live()
            .map(|(slot, controller)| (slot, controller.identity))
            .collect();

        for (slot, identity) in &live {
            if let Err(error) = self.transport.disconnect(*identity).await {
                warn!(identity = %identity, %error, "disconnect on shutdown failed");
            }
            self.set_awaiting(*slot, Awaiting::None);
        }

        let mut registry = self.registry.write();
        for (slot, _) in live {
            registry.release(slot);
        }
    }
}

/// Whether a decoded tick shows real user input.
///
/// Quiet-idle ticks (no buttons, no touch, sticks within the wake
/// threshold of center) must not keep the host awake.
fn tick_active(state: &DeviceState) -> bool {
    state.control.buttons != 0
        || state.touch.any_active()
        || axis_moved(state.control.left_x)
        || axis_moved(state.control.left_y)
        || axis_moved(state.control.right_x)
        || axis_moved(state.control.right_y)
}

fn axis_moved(axis: u8) -> bool {
    let delta = i16::from(axis) - i16::from(AXIS_NEUTRAL) - 1;
    delta.unsigned_abs() > u16::from(AXIS_WAKE_THRESHOLD)
}
