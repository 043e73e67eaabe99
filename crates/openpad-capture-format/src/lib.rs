//! Raw report delta capture for OpenPad
//!
//! When an unknown pad connects, the fastest way to map its protocol is to
//! watch which report bytes move when a button is pressed. This crate
//! encodes consecutive raw frames into a compact, line-oriented delta log
//! and parses it back for offline consumers (the interactive mapper lives
//! outside this workspace; the line format here is its boundary).
//!
//! One line per changed frame:
//!
//! ```text
//! id=01 b1=00 b2=00 b3=80 b4=7F b5=7F b6=80 b7=80 ch=[1:00>02,4:7F>FF]
//! ```
//!
//! * `id` — leading report byte of the new frame.
//! * `b1..b7` — the next seven payload bytes, present only when the
//!   compared window is at least eight bytes.
//! * `ch` — every changed byte index (decimal) with old and new value.
//!
//! The first frame per slot stores a baseline silently and identical frames
//! emit nothing, so an idle pad produces an empty log. Lines are
//! self-contained and independently parsable; the only other content a log
//! may carry is `#`-prefixed preamble comments.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod delta;
pub mod parse;

pub use delta::*;
pub use parse::*;

use thiserror::Error;

/// Failures when reading a capture line back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing `{field}` field")]
    MissingField { field: &'static str },

    #[error("invalid hex byte `{text}`")]
    InvalidHex { text: String },

    #[error("invalid change entry `{text}`")]
    InvalidChange { text: String },
}
