//! End-to-end test harness for the OpenPad bridge
//!
//! Tests here run the real engine — worker task, registry, injection
//! facade — against scripted doubles for the two external collaborators:
//! the transport and the host polling surface. No hardware, no timers
//! beyond polling for the worker to settle.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod frames;
pub mod harness;
