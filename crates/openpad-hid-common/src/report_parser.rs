//! Bounds-checked report parsing and building

use crate::{ReportError, ReportResult};

/// Cursor over a received report frame.
///
/// Borrows the frame: decoding runs once per transport event and must not
/// allocate. Every read is bounds-checked against the actual received
/// length, never the device's nominal report size.
pub struct ReportParser<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ReportParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn read_u8(&mut self) -> ReportResult<u8> {
        let value = self
            .data
            .get(self.position)
            .copied()
            .ok_or(ReportError::UnexpectedEnd)?;
        self.position += 1;
        Ok(value)
    }

    pub fn read_i8(&mut self) -> ReportResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16_le(&mut self) -> ReportResult<u16> {
        let lo = u16::from(self.read_u8()?);
        let hi = u16::from(self.read_u8()?);
        Ok(lo | (hi << 8))
    }

    pub fn read_i16_le(&mut self) -> ReportResult<i16> {
        Ok(self.read_u16_le()? as i16)
    }

    pub fn read_bytes(&mut self, count: usize) -> ReportResult<&'a [u8]> {
        let end = self
            .position
            .checked_add(count)
            .ok_or(ReportError::UnexpectedEnd)?;
        let chunk = self
            .data
            .get(self.position..end)
            .ok_or(ReportError::UnexpectedEnd)?;
        self.position = end;
        Ok(chunk)
    }

    pub fn read_array<const N: usize>(&mut self) -> ReportResult<[u8; N]> {
        let chunk = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        Ok(out)
    }

    pub fn peek_u8(&self) -> ReportResult<u8> {
        self.data
            .get(self.position)
            .copied()
            .ok_or(ReportError::UnexpectedEnd)
    }

    pub fn skip(&mut self, count: usize) {
        self.position = (self.position.saturating_add(count)).min(self.data.len());
    }

    pub fn seek(&mut self, position: usize) {
        self.position = position.min(self.data.len());
    }
}

/// Builder for outgoing request payloads.
pub struct ReportBuilder {
    buffer: Vec<u8>,
}

impl ReportBuilder {
    /// Zero-filled buffer of `len` bytes, to be patched at fixed offsets.
    pub fn zeroed(len: usize) -> Self {
        Self {
            buffer: vec![0u8; len],
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    pub fn write_u16_le(&mut self, value: u16) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(data);
        self
    }

    /// Overwrite a byte at a fixed offset; out-of-range offsets are ignored.
    pub fn set_u8(&mut self, offset: usize, value: u8) -> &mut Self {
        if let Some(slot) = self.buffer.get_mut(offset) {
            *slot = value;
        }
        self
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}
