//! Controller pool and decoder selection for OpenPad
//!
//! This crate owns the bookkeeping between the transport and the injection
//! layer: a fixed arena of controller slots, the VID/PID table that picks a
//! decoder at connect time, and the per-device canonical state each decode
//! rewrites.
//!
//! Slots are handed out as generational [`SlotId`]s. Releasing a slot bumps
//! its generation, so an id held across a disconnect can never observe the
//! next device that lands in the same slot.
//!
//! Nothing here does I/O and nothing here blocks; callers serialize access
//! however they like (the bridge worker wraps the registry in a lock shared
//! with the injection facade).

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]

pub mod controller;
pub mod decoder;
pub mod pool;

pub use controller::*;
pub use decoder::*;
pub use pool::*;

use thiserror::Error;

/// Errors from pool operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// Every slot holds a live controller. Recoverable: the caller keeps the
    /// transport connection open and simply manages no state for the device.
    #[error("controller pool exhausted: all {capacity} slots are live")]
    Exhausted { capacity: usize },
}
