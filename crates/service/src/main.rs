//! OpenPad bridge daemon (padd)

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::sync::{mpsc, watch};
use tracing::{info, trace, warn};
use tracing_subscriber::EnvFilter;

use pad_bridge_engine::{BridgeWorker, KeepAwakePort, shared_registry};
use pad_bridge_service::{HidTransport, ServiceConfig};

#[derive(Debug, Parser)]
#[command(name = "padd", version, about = "Bridges wireless game pads into the host input path")]
struct Cli {
    /// JSON configuration file; defaults apply when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a raw report delta log here (overrides the config file).
    #[arg(long, value_name = "PATH")]
    capture_log: Option<PathBuf>,
}

/// Userspace stand-in for the platform's idle inhibitor.
struct ActivityTick;

impl KeepAwakePort for ActivityTick {
    fn power_tick(&self) {
        trace!("pad activity");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("padd=info,pad_bridge_service=info,pad_bridge_engine=info")
        }))
        .init();

    let cli = Cli::parse();
    let mut config = match cli.config.as_deref() {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };
    if cli.capture_log.is_some() {
        config.capture_log = cli.capture_log;
    }

    info!(version = env!("CARGO_PKG_VERSION"), "padd starting");

    let registry = shared_registry();
    let (events_tx, events_rx) = mpsc::channel(config.event_queue_depth);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let transport = HidTransport::spawn(
        events_tx,
        Duration::from_millis(config.scan_interval_ms),
        config.read_timeout_ms,
    )
    .context("starting HID transport")?;

    let mut worker = BridgeWorker::new(
        Arc::clone(&registry),
        transport,
        Arc::new(ActivityTick),
        events_rx,
        shutdown_rx,
    );
    if let Some(path) = config.capture_log.as_deref() {
        let sink = std::fs::File::create(path)
            .with_context(|| format!("creating capture log {}", path.display()))?;
        info!(path = %path.display(), "raw report capture enabled");
        worker = worker.with_capture_log(Box::new(sink));
    }
    let worker = tokio::spawn(worker.run());

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    info!("shutdown requested");
    if shutdown_tx.send(true).is_err() {
        warn!("bridge worker already stopped");
    }
    worker.await.context("joining bridge worker")?;

    info!("padd stopped");
    Ok(())
}
