//! Scripted collaborators and the bridge test rig

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use openpad_device_types::DeviceIdentity;
use openpad_inject::{ButtonLogic, CtrlSample, MotionSample, PortInfo, TouchSample};
use pad_bridge_engine::{
    BridgeWorker, HostInputPort, HostResult, InputBridge, KeepAwakePort, RequestKind,
    SharedRegistry, TouchPort, TouchRegion, Transport, TransportError, TransportEvent,
    shared_registry,
};

/// Transport double: every request the worker issues is recorded, none
/// fail.
#[derive(Default)]
pub struct ScriptedTransport {
    pub requests: Mutex<Vec<(DeviceIdentity, RequestKind, Vec<u8>)>>,
    pub disconnects: Mutex<Vec<DeviceIdentity>>,
}

impl ScriptedTransport {
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn reads_for(&self, identity: DeviceIdentity) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|(who, kind, _)| *who == identity && *kind == RequestKind::Read)
            .count()
    }

    /// Payloads of write requests issued to one device, in order.
    pub fn writes_for(&self, identity: DeviceIdentity) -> Vec<Vec<u8>> {
        self.requests
            .lock()
            .iter()
            .filter(|(who, kind, _)| *who == identity && *kind == RequestKind::Write)
            .map(|(_, _, payload)| payload.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn request(
        &self,
        identity: DeviceIdentity,
        kind: RequestKind,
        payload: Vec<u8>,
    ) -> Result<(), TransportError> {
        self.requests.lock().push((identity, kind, payload));
        Ok(())
    }

    async fn disconnect(&self, identity: DeviceIdentity) -> Result<(), TransportError> {
        self.disconnects.lock().push(identity);
        Ok(())
    }
}

#[derive(Default)]
pub struct TickCounter {
    ticks: AtomicUsize,
}

impl TickCounter {
    pub fn count(&self) -> usize {
        self.ticks.load(Ordering::SeqCst)
    }
}

impl KeepAwakePort for TickCounter {
    fn power_tick(&self) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }
}

/// Host double: every query succeeds with idle data, every buffer frame is
/// filled. Emulated button masks are recorded.
#[derive(Default)]
pub struct IdleHost {
    pub emulation_calls: Mutex<Vec<(usize, u32)>>,
}

impl IdleHost {
    fn fill(&self, frames: &mut [CtrlSample], logic: ButtonLogic) -> HostResult<usize> {
        for frame in frames.iter_mut() {
            *frame = CtrlSample::idle(logic);
        }
        Ok(frames.len())
    }
}

impl HostInputPort for IdleHost {
    fn peek_buffer_positive(&self, _port: usize, frames: &mut [CtrlSample]) -> HostResult<usize> {
        self.fill(frames, ButtonLogic::Positive)
    }
    fn read_buffer_positive(&self, _port: usize, frames: &mut [CtrlSample]) -> HostResult<usize> {
        self.fill(frames, ButtonLogic::Positive)
    }
    fn peek_buffer_negative(&self, _port: usize, frames: &mut [CtrlSample]) -> HostResult<usize> {
        self.fill(frames, ButtonLogic::Negative)
    }
    fn read_buffer_negative(&self, _port: usize, frames: &mut [CtrlSample]) -> HostResult<usize> {
        self.fill(frames, ButtonLogic::Negative)
    }
    fn peek_buffer_positive_ext(
        &self,
        _port: usize,
        frames: &mut [CtrlSample],
    ) -> HostResult<usize> {
        self.fill(frames, ButtonLogic::Positive)
    }
    fn read_buffer_positive_ext(
        &self,
        _port: usize,
        frames: &mut [CtrlSample],
    ) -> HostResult<usize> {
        self.fill(frames, ButtonLogic::Positive)
    }

    fn controller_port_info(&self) -> HostResult<PortInfo> {
        Ok(PortInfo::default())
    }

    fn battery_level(&self, _port: usize) -> HostResult<u8> {
        Ok(100)
    }

    fn touch_peek(&self, _port: TouchPort, frames: &mut [TouchSample]) -> HostResult<usize> {
        for frame in frames.iter_mut() {
            *frame = TouchSample::default();
        }
        Ok(frames.len())
    }
    fn touch_read(&self, port: TouchPort, frames: &mut [TouchSample]) -> HostResult<usize> {
        self.touch_peek(port, frames)
    }
    fn touch_peek_region(
        &self,
        port: TouchPort,
        _region: TouchRegion,
        frames: &mut [TouchSample],
    ) -> HostResult<usize> {
        self.touch_peek(port, frames)
    }
    fn touch_read_region(
        &self,
        port: TouchPort,
        _region: TouchRegion,
        frames: &mut [TouchSample],
    ) -> HostResult<usize> {
        self.touch_peek(port, frames)
    }

    fn motion_state(&self) -> HostResult<MotionSample> {
        Ok(MotionSample::default())
    }

    fn set_button_emulation(&self, port: usize, buttons: u32) {
        self.emulation_calls.lock().push((port, buttons));
    }
}

/// A running bridge worker plus everything a test needs to drive and
/// observe it.
pub struct BridgeRig {
    pub registry: SharedRegistry,
    pub transport: Arc<ScriptedTransport>,
    pub keep_awake: Arc<TickCounter>,
    pub host: Arc<IdleHost>,
    events: mpsc::Sender<TransportEvent>,
    shutdown: watch::Sender<bool>,
    worker: JoinHandle<()>,
}

impl BridgeRig {
    /// Start a rig without capture. Must run inside a tokio runtime.
    pub fn start() -> Self {
        Self::start_inner(None)
    }

    /// Start a rig with a raw report delta log attached.
    pub fn start_with_capture(sink: Box<dyn Write + Send>) -> Self {
        Self::start_inner(Some(sink))
    }

    fn start_inner(capture: Option<Box<dyn Write + Send>>) -> Self {
        let registry = shared_registry();
        let transport = Arc::new(ScriptedTransport::default());
        let keep_awake = Arc::new(TickCounter::default());
        let (events_tx, events_rx) = mpsc::channel(64);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut worker = BridgeWorker::new(
            Arc::clone(&registry),
            Arc::clone(&transport) as Arc<dyn Transport>,
            Arc::clone(&keep_awake) as Arc<dyn KeepAwakePort>,
            events_rx,
            shutdown_rx,
        );
        if let Some(sink) = capture {
            worker = worker.with_capture_log(sink);
        }
        let worker = tokio::spawn(worker.run());

        Self {
            registry,
            transport,
            keep_awake,
            host: Arc::new(IdleHost::default()),
            events: events_tx,
            shutdown: shutdown_tx,
            worker,
        }
    }

    /// The injection facade wired to this rig's registry and idle host.
    pub fn bridge(&self) -> InputBridge {
        InputBridge::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.host) as Arc<dyn HostInputPort>,
        )
    }

    pub async fn send(&self, event: TransportEvent) {
        assert!(self.events.send(event).await.is_ok());
    }

    pub async fn connect(&self, identity: DeviceIdentity, ids: (u16, u16)) {
        self.send(TransportEvent::Accepted {
            identity,
            vendor_id: ids.0,
            product_id: ids.1,
        })
        .await;
    }

    pub async fn deliver_report(&self, identity: DeviceIdentity, frame: Vec<u8>) {
        self.send(TransportEvent::ReadReply { identity, frame }).await;
    }

    pub async fn disconnect(&self, identity: DeviceIdentity) {
        self.send(TransportEvent::Terminated { identity }).await;
    }

    /// Signal shutdown and join the worker task.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        assert!(self.worker.await.is_ok());
    }
}

/// Poll until the worker has visibly processed what was sent, bounded at
/// one second.
pub async fn eventually(mut predicate: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    predicate()
}
