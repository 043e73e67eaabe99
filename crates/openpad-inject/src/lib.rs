//! Injection merge policy for OpenPad
//!
//! Pure functions that merge canonical pad state into the buffers host
//! polling APIs hand back to their callers. The bridge facade calls these
//! after the underlying host query succeeded; nothing here does I/O, touches
//! a registry, or can fail.
//!
//! Merge rules:
//!
//! * Controller buffers: logical ports 1 and up are reset to idle first
//!   (the host has nothing real to report there), port 0 is additive on top
//!   of whatever the host itself produced. Buttons OR in under positive
//!   logic and AND-NOT out under negative logic; axes compose additively
//!   around the 127 midpoint and clamp to the byte range.
//! * Touch buffers: when the device reports any active touch, the device's
//!   touches replace the host report, scaled from the device-native surface
//!   into host screen space.
//! * Motion queries: the device snapshot overwrites the host's.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod merge;
pub mod touch;
pub mod wire;

pub use merge::*;
pub use touch::*;
pub use wire::*;
