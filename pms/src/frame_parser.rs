//! Locates the most recent PMS frame in a capture buffer.

use super::error::{DecodeError, DecodeErrorKind::*, DecodeResult};
use super::reading::Reading;

/// Start-of-frame marker ("BM").
pub const MARKER: [u8; 2] = [0x42, 0x4D];

/// Offset of the atmospheric PM1.0 field within a frame body.
pub const READING_OFFSET: usize = 8;

/// Body bytes needed to decode a `Reading`.
pub const READING_END: usize = READING_OFFSET + 6;

/// The bytes following a frame marker.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Buffer offset of the marker.
    pub offset: usize,
    /// Everything after the marker, up to the end of the buffer.
    pub body: &'a [u8],
}

/// Find the last frame in `buf`.
///
/// Only the final marker matters: earlier frames are stale, and whatever follows the final
/// marker is the newest data the capture tool has written so far.  The body may be incomplete
/// if the capture is still being appended to.
pub fn last_frame(buf: &[u8]) -> DecodeResult<Frame<'_>> {
    match buf.windows(MARKER.len()).rposition(|w| w == &MARKER[..]) {
        Some(offset) => Ok(Frame {
            offset,
            body: &buf[offset + MARKER.len()..],
        }),
        None => Err(DecodeError {
            kind: MarkerNotFound,
            offset: buf.len(),
        }),
    }
}

/// Read a big-endian u16 at `at`.  Callers check the bounds.
pub(crate) fn be_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([buf[at], buf[at + 1]])
}

impl<'a> Frame<'a> {
    /// Decode the atmospheric PM1.0, PM2.5 and PM10 concentrations.
    pub fn reading(&self) -> DecodeResult<Reading> {
        if self.body.len() < READING_END {
            return Err(DecodeError {
                kind: SegmentTooShort(self.body.len()),
                offset: self.offset,
            });
        }
        let b = self.body;
        Ok(Reading {
            pm1_0: be_u16(b, READING_OFFSET),
            pm2_5: be_u16(b, READING_OFFSET + 2),
            pm10: be_u16(b, READING_OFFSET + 4),
        })
    }
}

/// Decode the reading held by the last frame of `buf`.
pub fn last_reading(buf: &[u8]) -> DecodeResult<Reading> {
    last_frame(buf)?.reading()
}
