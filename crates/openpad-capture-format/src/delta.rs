//! Delta-line encoding and the per-slot logger

use std::fmt::Write as _;
use std::io::{self, Write};

/// Bytes of each frame kept for comparison; reports longer than this only
/// have their head diffed.
pub const DELTA_WINDOW: usize = 64;

/// Slots the logger tracks; mirrors the controller registry capacity.
pub const MAX_LOG_SLOTS: usize = 4;

/// Baseline state for one slot: the previously observed frame head.
#[derive(Debug, Clone, Copy)]
pub struct SlotBaseline {
    has_last: bool,
    last: [u8; DELTA_WINDOW],
}

impl Default for SlotBaseline {
    fn default() -> Self {
        Self {
            has_last: false,
            last: [0; DELTA_WINDOW],
        }
    }
}

impl SlotBaseline {
    /// Compare a new frame against the baseline and advance it.
    ///
    /// Returns the encoded line when at least one byte inside the window
    /// changed. The first observation and identical frames return `None`.
    pub fn observe(&mut self, frame: &[u8]) -> Option<String> {
        if frame.is_empty() {
            return None;
        }
        let window = frame.len().min(DELTA_WINDOW);
        let head = frame.get(..window)?;

        if !self.has_last {
            // Baseline establishment: nothing to diff against yet.
            self.store(head);
            return None;
        }

        let line = encode_delta_line(self.last.get(..window)?, head)?;
        self.store(head);
        Some(line)
    }

    fn store(&mut self, head: &[u8]) {
        if let Some(dest) = self.last.get_mut(..head.len()) {
            dest.copy_from_slice(head);
        }
        self.has_last = true;
    }
}

/// Encode the delta between two equally sized frame heads.
///
/// Returns `None` when the heads are identical. The preview fields `b1..b7`
/// are included only when the window is at least eight bytes, so tiny
/// reports still produce valid lines.
pub fn encode_delta_line(previous: &[u8], current: &[u8]) -> Option<String> {
    let window = previous.len().min(current.len());
    let changed = previous
        .iter()
        .zip(current.iter())
        .take(window)
        .any(|(old, new)| old != new);
    if !changed {
        return None;
    }

    let mut line = String::with_capacity(96);
    let id = current.first()?;
    let _ = write!(line, "id={id:02X}");

    if window >= 8 {
        for (index, byte) in current.iter().enumerate().take(8).skip(1) {
            let _ = write!(line, " b{index}={byte:02X}");
        }
    }

    line.push_str(" ch=[");
    let mut first = true;
    for (index, (old, new)) in previous.iter().zip(current.iter()).take(window).enumerate() {
        if old == new {
            continue;
        }
        if !first {
            line.push(',');
        }
        let _ = write!(line, "{index}:{old:02X}>{new:02X}");
        first = false;
    }
    line.push(']');
    Some(line)
}

/// Per-slot delta logger over any line sink.
///
/// Owned by whoever sees raw frames before decoding (the bridge worker);
/// decoders never log. Entirely optional: steady-state operation does not
/// need it and a disabled logger costs one branch per frame.
#[derive(Debug)]
pub struct DeltaLogger<W: Write> {
    sink: W,
    slots: [SlotBaseline; MAX_LOG_SLOTS],
}

impl<W: Write> DeltaLogger<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            slots: [SlotBaseline::default(); MAX_LOG_SLOTS],
        }
    }

    /// Write a human-readable preamble comment. Parsers skip `#` lines.
    pub fn write_preamble(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.sink, "# {text}")
    }

    /// Feed one raw frame for a slot, appending a delta line if anything
    /// changed. Out-of-range slots and empty frames are ignored.
    pub fn observe(&mut self, slot: usize, frame: &[u8]) -> io::Result<()> {
        let Some(baseline) = self.slots.get_mut(slot) else {
            return Ok(());
        };
        if let Some(line) = baseline.observe(frame) {
            writeln!(self.sink, "{line}")?;
        }
        Ok(())
    }

    /// Drop the baseline for a slot so the next frame starts fresh.
    ///
    /// Called on disconnect: the next device in the slot must not diff
    /// against the previous device's last frame.
    pub fn reset_slot(&mut self, slot: usize) {
        if let Some(baseline) = self.slots.get_mut(slot) {
            *baseline = SlotBaseline::default();
        }
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
