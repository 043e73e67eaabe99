//! Reading capture lines back
//!
//! Offline consumers (the mapper tool, tests) reconstruct delta records
//! from the text log. Every line is self-contained; order only matters for
//! replaying a session.

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// One changed byte inside a frame window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteChange {
    pub index: usize,
    pub old: u8,
    pub new: u8,
}

/// A parsed capture line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaRecord {
    /// Leading report byte of the frame that produced the line.
    pub report_id: u8,
    /// Payload bytes 1..=7, present when the compared window was >= 8 bytes.
    pub preview: Vec<u8>,
    /// Changed indices in ascending order.
    pub changes: Vec<ByteChange>,
}

/// True for lines a parser should skip: blanks and `#` preamble comments.
pub fn is_preamble(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Parse one capture line.
pub fn parse_line(line: &str) -> Result<DeltaRecord, ParseError> {
    let mut report_id = None;
    let mut preview = Vec::new();
    let mut changes = None;

    for token in line.split_whitespace() {
        if let Some(text) = token.strip_prefix("id=") {
            report_id = Some(parse_hex_byte(text)?);
        } else if let Some(rest) = token.strip_prefix('b') {
            if let Some((_, text)) = rest.split_once('=') {
                preview.push(parse_hex_byte(text)?);
            }
        } else if let Some(text) = token.strip_prefix("ch=") {
            changes = Some(parse_changes(text)?);
        }
    }

    Ok(DeltaRecord {
        report_id: report_id.ok_or(ParseError::MissingField { field: "id" })?,
        preview,
        changes: changes.ok_or(ParseError::MissingField { field: "ch" })?,
    })
}

/// Parse a whole log, skipping preamble lines.
pub fn parse_log(text: &str) -> Result<Vec<DeltaRecord>, ParseError> {
    text.lines()
        .filter(|line| !is_preamble(line))
        .map(parse_line)
        .collect()
}

fn parse_hex_byte(text: &str) -> Result<u8, ParseError> {
    u8::from_str_radix(text, 16).map_err(|_| ParseError::InvalidHex {
        text: text.to_owned(),
    })
}

fn parse_changes(text: &str) -> Result<Vec<ByteChange>, ParseError> {
    let body = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| ParseError::InvalidChange {
            text: text.to_owned(),
        })?;

    if body.is_empty() {
        return Ok(Vec::new());
    }

    body.split(',').map(parse_change_entry).collect()
}

fn parse_change_entry(entry: &str) -> Result<ByteChange, ParseError> {
    let invalid = || ParseError::InvalidChange {
        text: entry.to_owned(),
    };
    let (index, values) = entry.split_once(':').ok_or_else(invalid)?;
    let (old, new) = values.split_once('>').ok_or_else(invalid)?;
    Ok(ByteChange {
        index: index.parse().map_err(|_| invalid())?,
        old: parse_hex_byte(old)?,
        new: parse_hex_byte(new)?,
    })
}
