//! PMS error types.

use std::io;
use std::path::PathBuf;
use std::result;
use thiserror::Error;

/// A problem found while decoding a capture buffer.
///
/// Decode errors are never fatal to the poller; the cycle is reported as failed and the next
/// cycle re-reads the capture from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind}, offset: {offset:#x}")]
pub struct DecodeError {
    /// The type of error.
    pub kind: DecodeErrorKind,
    /// The buffer offset where the error was encountered.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    /// The buffer holds no frame marker at all.
    #[error("frame marker not found")]
    MarkerNotFound,
    /// The last frame ends before the requested fields.
    #[error("truncated frame: {0} bytes")]
    SegmentTooShort(usize),
    /// A hex capture contains something other than hex digits and whitespace.
    #[error("invalid hex character: {0:#x}")]
    InvalidHex(u8),
    /// The packet's length field is out of range.
    #[error("invalid packet length: {0}")]
    InvalidLength(u16),
    #[error("checksum mismatch: calculated {calculated:#06x}, received {received:#06x}")]
    ChecksumMismatch { calculated: u16, received: u16 },
}

pub type DecodeResult<T> = result::Result<T, DecodeError>;

/// Errors that end a polling run.
#[derive(Debug, Error)]
pub enum Error {
    /// The capture file could not be read.
    #[error("{}: {}", .path.display(), .source)]
    Capture {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The output log could not be appended to.
    #[error("{}: {}", .path.display(), .source)]
    Log {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Returned by a cycle handler to stop `Poller::run`.
    #[error("stopped")]
    Stop,
}

pub type Result<T> = result::Result<T, Error>;
