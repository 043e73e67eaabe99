//! Daemon configuration
//!
//! A small JSON file; every field has a default so an absent or empty
//! config runs the daemon in its normal mode with capture disabled.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Append a raw report delta log here; absent disables capture.
    pub capture_log: Option<PathBuf>,
    /// Depth of the transport event queue feeding the bridge worker.
    pub event_queue_depth: usize,
    /// How often the transport rescans for newly paired devices.
    pub scan_interval_ms: u64,
    /// Per-read timeout on the device handle; reads retry until data
    /// arrives, this only bounds how quickly a disconnect is noticed.
    pub read_timeout_ms: i32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            capture_log: None,
            event_queue_depth: 64,
            scan_interval_ms: 1000,
            read_timeout_ms: 100,
        }
    }
}

impl ServiceConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}
