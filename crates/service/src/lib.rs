//! Service-side glue for the `padd` daemon
//!
//! The interesting logic lives in the engine; this crate only provides the
//! pieces that touch the outside world: the JSON configuration file and the
//! `hidapi`-backed transport adapter.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod hid_transport;

pub use config::ServiceConfig;
pub use hid_transport::HidTransport;
