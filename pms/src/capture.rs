//! Capture files written by a serial terminal.

use super::error::{DecodeError, DecodeErrorKind::InvalidHex, DecodeResult, Error, Result};
use log::debug;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// How the capture tool stored the sensor's bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CaptureFormat {
    /// The raw byte stream.
    Binary,
    /// An ASCII hex dump; whitespace between digits is ignored.
    HexText,
}

impl Default for CaptureFormat {
    fn default() -> Self {
        CaptureFormat::Binary
    }
}

impl FromStr for CaptureFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "binary" | "bin" => Ok(CaptureFormat::Binary),
            "hex" => Ok(CaptureFormat::HexText),
            _ => Err(format!("unknown capture format: {}", s)),
        }
    }
}

/// Read the whole capture file.
pub fn read_capture(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Capture {
        path: path.to_path_buf(),
        source,
    })
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Convert a hex dump back into bytes.
///
/// A trailing unpaired digit is dropped: the capture tool may be half way through writing a
/// byte.  Error offsets refer to `text`.
pub fn decode_hex_text(text: &[u8]) -> DecodeResult<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len() / 2);
    let mut high = None;

    for (offset, c) in text.iter().enumerate() {
        if c.is_ascii_whitespace() {
            continue;
        }
        let nibble = hex_value(*c).ok_or(DecodeError {
            kind: InvalidHex(*c),
            offset,
        })?;
        match high.take() {
            Some(h) => out.push(h << 4 | nibble),
            None => high = Some(nibble),
        }
    }

    if high.is_some() {
        debug!("dropping unpaired trailing hex digit");
    }
    Ok(out)
}

#[test]
fn test_hex_value() {
    assert_eq!(Some(0x0), hex_value(b'0'));
    assert_eq!(Some(0xA), hex_value(b'a'));
    assert_eq!(Some(0xF), hex_value(b'F'));
    assert_eq!(None, hex_value(b'g'));
    assert_eq!(None, hex_value(b' '));
}
