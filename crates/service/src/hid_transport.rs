//! `hidapi`-backed transport adapter
//!
//! One scanner thread discovers paired devices; each open device gets its
//! own thread that serializes read/write/feature commands against the
//! blocking `hidapi` handle. Replies and lifecycle changes flow to the
//! bridge worker as [`TransportEvent`]s; the engine never blocks on HID
//! I/O itself.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use hidapi::{HidApi, HidDevice};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use openpad_device_types::DeviceIdentity;
use openpad_registry::Decoder;
use pad_bridge_engine::{RequestKind, Transport, TransportError, TransportEvent};

/// Largest input report any supported device produces.
const READ_BUFFER_LEN: usize = 64;

/// Stable identity for a platform device: VID/PID in the high half, a CRC
/// of the serial number (or enumeration path for pads without one) in the
/// low half. Survives re-enumeration as long as the pairing does.
pub fn derive_identity(
    vendor_id: u16,
    product_id: u16,
    serial: Option<&str>,
    path: &str,
) -> DeviceIdentity {
    let msb = (u32::from(vendor_id) << 16) | u32::from(product_id);
    let tag = match serial {
        Some(serial) if !serial.is_empty() => serial,
        _ => path,
    };
    DeviceIdentity::new(msb, crc32fast::hash(tag.as_bytes()))
}

enum DeviceCommand {
    Read,
    Write(Vec<u8>),
    Feature(Vec<u8>),
    Disconnect,
}

type DeviceMap = Arc<Mutex<HashMap<DeviceIdentity, Sender<DeviceCommand>>>>;

/// Transport port over `hidapi`. Requests are queued to the owning device
/// thread; the scanner thread keeps the device map current.
pub struct HidTransport {
    devices: DeviceMap,
}

impl HidTransport {
    /// Start the scanner thread and return the request-side handle.
    pub fn spawn(
        events: mpsc::Sender<TransportEvent>,
        scan_interval: Duration,
        read_timeout_ms: i32,
    ) -> anyhow::Result<Arc<Self>> {
        let api = HidApi::new()?;
        let transport = Arc::new(Self {
            devices: Arc::new(Mutex::new(HashMap::new())),
        });
        let scanner = Arc::clone(&transport);
        thread::Builder::new()
            .name("hid-scan".into())
            .spawn(move || scanner.scan_loop(api, &events, scan_interval, read_timeout_ms))?;
        Ok(transport)
    }

    fn scan_loop(
        &self,
        mut api: HidApi,
        events: &mpsc::Sender<TransportEvent>,
        interval: Duration,
        read_timeout_ms: i32,
    ) {
        loop {
            if events.is_closed() {
                debug!("event receiver gone, stopping device scan");
                return;
            }
            if let Err(error) = api.refresh_devices() {
                warn!(%error, "device scan failed");
            }
            for info in api.device_list() {
                let vendor_id = info.vendor_id();
                let product_id = info.product_id();
                if Decoder::identify(vendor_id, product_id).is_none() {
                    continue;
                }
                let path = info.path().to_string_lossy().into_owned();
                let identity = derive_identity(vendor_id, product_id, info.serial_number(), &path);
                if self.devices.lock().contains_key(&identity) {
                    continue;
                }
                match info.open_device(&api) {
                    Ok(device) => {
                        self.attach(identity, vendor_id, product_id, device, events, read_timeout_ms);
                    }
                    Err(error) => warn!(%identity, %error, "opening device failed"),
                }
            }
            thread::sleep(interval);
        }
    }

    fn attach(
        &self,
        identity: DeviceIdentity,
        vendor_id: u16,
        product_id: u16,
        device: HidDevice,
        events: &mpsc::Sender<TransportEvent>,
        read_timeout_ms: i32,
    ) {
        let (commands_tx, commands_rx) = channel();
        self.devices.lock().insert(identity, commands_tx);

        let events = events.clone();
        let thread_events = events.clone();
        let devices = Arc::clone(&self.devices);
        let spawned = thread::Builder::new()
            .name(format!("hid-{identity}"))
            .spawn(move || {
                device_loop(identity, &device, &commands_rx, &thread_events, read_timeout_ms);
                devices.lock().remove(&identity);
                let _ = thread_events.blocking_send(TransportEvent::Terminated { identity });
            });

        match spawned {
            Ok(_) => {
                info!(%identity, vendor_id = format_args!("{vendor_id:#06X}"),
                    product_id = format_args!("{product_id:#06X}"), "device attached");
                // blocking_send: connects are rare, back-pressure is fine here.
                let _ = events.blocking_send(TransportEvent::Accepted {
                    identity,
                    vendor_id,
                    product_id,
                });
            }
            Err(error) => {
                warn!(%identity, %error, "spawning device thread failed");
                self.devices.lock().remove(&identity);
            }
        }
    }
}

/// Owns the blocking handle: one command in, one reply event out. Any HID
/// error ends the session; the caller emits `Terminated`.
fn device_loop(
    identity: DeviceIdentity,
    device: &HidDevice,
    commands: &Receiver<DeviceCommand>,
    events: &mpsc::Sender<TransportEvent>,
    read_timeout_ms: i32,
) {
    for command in commands.iter() {
        let reply = match command {
            DeviceCommand::Read => match read_report(device, commands, read_timeout_ms) {
                Ok(Some(frame)) => TransportEvent::ReadReply { identity, frame },
                Ok(None) => return,
                Err(error) => {
                    debug!(%identity, %error, "read failed");
                    return;
                }
            },
            DeviceCommand::Write(payload) => match device.write(&payload) {
                Ok(_) => TransportEvent::WriteReply { identity },
                Err(error) => {
                    debug!(%identity, %error, "write failed");
                    return;
                }
            },
            DeviceCommand::Feature(payload) => match device.send_feature_report(&payload) {
                Ok(()) => TransportEvent::FeatureReply { identity },
                Err(error) => {
                    debug!(%identity, %error, "feature report failed");
                    return;
                }
            },
            DeviceCommand::Disconnect => return,
        };
        if events.blocking_send(reply).is_err() {
            return;
        }
    }
}

/// Poll until a report arrives. `Ok(None)` means a disconnect command
/// arrived while waiting (only disconnects can overtake a pending read:
/// the worker keeps at most one request in flight per device).
fn read_report(
    device: &HidDevice,
    commands: &Receiver<DeviceCommand>,
    read_timeout_ms: i32,
) -> hidapi::HidResult<Option<Vec<u8>>> {
    let mut buffer = [0u8; READ_BUFFER_LEN];
    loop {
        let length = device.read_timeout(&mut buffer, read_timeout_ms)?;
        if length > 0 {
            let frame = buffer.get(..length).map(<[u8]>::to_vec);
            return Ok(Some(frame.unwrap_or_default()));
        }
        match commands.try_recv() {
            Ok(DeviceCommand::Disconnect) | Err(TryRecvError::Disconnected) => return Ok(None),
            Ok(_) => debug!("dropping command queued behind a pending read"),
            Err(TryRecvError::Empty) => {}
        }
    }
}

#[async_trait]
impl Transport for HidTransport {
    async fn request(
        &self,
        identity: DeviceIdentity,
        kind: RequestKind,
        payload: Vec<u8>,
    ) -> Result<(), TransportError> {
        let sender = self
            .devices
            .lock()
            .get(&identity)
            .cloned()
            .ok_or(TransportError::DeviceGone { identity })?;
        let command = match kind {
            RequestKind::Read => DeviceCommand::Read,
            RequestKind::Write => DeviceCommand::Write(payload),
            RequestKind::Feature => DeviceCommand::Feature(payload),
        };
        sender
            .send(command)
            .map_err(|_| TransportError::DeviceGone { identity })
    }

    async fn disconnect(&self, identity: DeviceIdentity) -> Result<(), TransportError> {
        match self.devices.lock().remove(&identity) {
            Some(sender) => {
                let _ = sender.send(DeviceCommand::Disconnect);
                Ok(())
            }
            None => Err(TransportError::DeviceGone { identity }),
        }
    }
}
