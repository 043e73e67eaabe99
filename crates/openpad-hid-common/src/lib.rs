//! Common report utilities for OpenPad protocol implementations
//!
//! Bounds-checked cursor parsing, report building, and the axis helpers the
//! per-device protocol crates share. Nothing here touches hardware.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod axis;
pub mod report_parser;

pub use axis::*;
pub use report_parser::*;

use thiserror::Error;

/// Decode failures a report decoder can hit.
///
/// Both variants are non-fatal by contract: callers skip the frame and keep
/// the previous canonical state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    #[error("report too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },

    #[error("unrecognized report type 0x{found:02X}")]
    UnrecognizedType { found: u8 },

    #[error("unexpected end of report data")]
    UnexpectedEnd,
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Reject frames shorter than `needed` with the standard error.
pub fn require_len(frame: &[u8], needed: usize) -> ReportResult<()> {
    if frame.len() < needed {
        return Err(ReportError::TooShort {
            needed,
            actual: frame.len(),
        });
    }
    Ok(())
}
