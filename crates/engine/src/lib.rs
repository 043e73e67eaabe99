//! OpenPad bridge engine
//!
//! Connects the two halves of the system:
//!
//! * the [`worker::BridgeWorker`] consumes asynchronous transport events
//!   (connect, disconnect, read/write/feature replies), drives report
//!   decoding, and keeps the read pipeline alive;
//! * the [`bridge::InputBridge`] wraps the host's own polling APIs and
//!   merges canonical pad state into every buffer they return.
//!
//! The worker is the sole writer of controller state; injection call sites
//! are readers. Both sides share the registry behind a `parking_lot`
//! read-write lock, and no guard is ever held across an await point.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod bridge;
pub mod ports;
pub mod worker;

pub use bridge::InputBridge;
pub use ports::*;
pub use worker::{BridgeWorker, SharedRegistry, shared_registry};
