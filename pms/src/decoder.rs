use super::capture::{decode_hex_text, CaptureFormat};
use super::error::DecodeResult;
use super::frame_parser::last_frame;
use super::packet::Packet;
use super::reading::Reading;
use log::debug;
use std::borrow::Cow;

/// How much of the last frame is validated before its fields are trusted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameCheck {
    /// Read the fields at their fixed offsets; nothing else is checked.
    Fixed,
    /// Require a complete packet with a valid length and checksum.
    Checksum,
}

impl Default for FrameCheck {
    fn default() -> Self {
        FrameCheck::Fixed
    }
}

/// Turns a capture buffer into the latest `Reading`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Decoder {
    pub format: CaptureFormat,
    pub check: FrameCheck,
}

impl Decoder {
    pub fn new(format: CaptureFormat, check: FrameCheck) -> Decoder {
        Decoder { format, check }
    }

    pub fn decode(&self, capture: &[u8]) -> DecodeResult<Reading> {
        let bytes = match self.format {
            CaptureFormat::Binary => Cow::Borrowed(capture),
            CaptureFormat::HexText => Cow::Owned(decode_hex_text(capture)?),
        };

        let frame = last_frame(&bytes)?;
        debug!(
            "last frame at {:#x}, {} body bytes",
            frame.offset,
            frame.body.len()
        );

        match self.check {
            FrameCheck::Fixed => frame.reading(),
            FrameCheck::Checksum => {
                let packet = Packet::parse(&frame)?;
                debug!("{:?}", packet);
                Ok(packet.atmospheric)
            }
        }
    }
}
