//! Full PMS5003-style packets: length prefix, twelve data words and a checksum.
//!
//! Layout, relative to the marker:
//!
//! | Offset  | Size | Field                                  |
//! |---------|------|----------------------------------------|
//! | 0       | 2    | marker `0x42 0x4D`                     |
//! | 2       | 2    | payload length, including the checksum |
//! | 4       | 6    | PM1.0/PM2.5/PM10, standard particle    |
//! | 10      | 6    | PM1.0/PM2.5/PM10, atmospheric          |
//! | 16      | 12   | particle counts per 0.1L of air        |
//! | 28      | 2    | reserved                               |
//! | 2 + len | 2    | checksum                               |

use super::error::{DecodeError, DecodeErrorKind::*, DecodeResult};
use super::frame_parser::{be_u16, Frame, MARKER};
use super::reading::Reading;

/// Largest packet the sensor emits, marker included.
pub const MAX_PACKET_LEN: usize = 32;

/// Smallest payload length that carries every data word.
pub const MIN_PAYLOAD_LEN: u16 = 28;

/// Particle counts per 0.1L of air, by minimum diameter.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ParticleCounts {
    pub um0_3: u16,
    pub um0_5: u16,
    pub um1_0: u16,
    pub um2_5: u16,
    pub um5_0: u16,
    pub um10: u16,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Packet {
    /// Concentrations for standard particles (CF=1).
    pub standard: Reading,
    /// Concentrations under atmospheric conditions.
    pub atmospheric: Reading,
    pub counts: ParticleCounts,
}

/// 16-bit wrapping sum of `bytes`.
pub fn checksum(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(0u16, |sum, b| sum.wrapping_add(u16::from(*b)))
}

fn words<const N: usize>(buf: &[u8], at: usize) -> [u16; N] {
    let mut out = [0; N];
    for (i, w) in out.iter_mut().enumerate() {
        *w = be_u16(buf, at + 2 * i);
    }
    out
}

impl Packet {
    /// Parse and validate the packet that starts at `frame`.
    ///
    /// All offsets in returned errors are the marker's buffer offset.
    pub fn parse(frame: &Frame) -> DecodeResult<Packet> {
        let err = |kind| DecodeError {
            kind,
            offset: frame.offset,
        };
        let body = frame.body;

        if body.len() < 2 {
            return Err(err(SegmentTooShort(body.len())));
        }

        let len = be_u16(body, 0);
        if len < MIN_PAYLOAD_LEN || MARKER.len() + 2 + len as usize > MAX_PACKET_LEN {
            return Err(err(InvalidLength(len)));
        }

        // The length covers the data words and the trailing checksum.
        let end = 2 + len as usize;
        if body.len() < end {
            return Err(err(SegmentTooShort(body.len())));
        }

        let calculated = checksum(&MARKER).wrapping_add(checksum(&body[..end - 2]));
        let received = be_u16(body, end - 2);
        if calculated != received {
            return Err(err(ChecksumMismatch {
                calculated,
                received,
            }));
        }

        let [pm1_0, pm2_5, pm10] = words::<3>(body, 2);
        let standard = Reading { pm1_0, pm2_5, pm10 };
        let [pm1_0, pm2_5, pm10] = words::<3>(body, 8);
        let atmospheric = Reading { pm1_0, pm2_5, pm10 };
        let [um0_3, um0_5, um1_0, um2_5, um5_0, um10] = words::<6>(body, 14);

        Ok(Packet {
            standard,
            atmospheric,
            counts: ParticleCounts {
                um0_3,
                um0_5,
                um1_0,
                um2_5,
                um5_0,
                um10,
            },
        })
    }

    /// Encode the packet the way the sensor transmits it.
    pub fn to_bytes(&self) -> [u8; MAX_PACKET_LEN] {
        let c = &self.counts;
        let data = [
            self.standard.pm1_0,
            self.standard.pm2_5,
            self.standard.pm10,
            self.atmospheric.pm1_0,
            self.atmospheric.pm2_5,
            self.atmospheric.pm10,
            c.um0_3,
            c.um0_5,
            c.um1_0,
            c.um2_5,
            c.um5_0,
            c.um10,
            0, // reserved
        ];

        let mut out = [0; MAX_PACKET_LEN];
        out[..2].copy_from_slice(&MARKER);
        out[2..4].copy_from_slice(&MIN_PAYLOAD_LEN.to_be_bytes());
        for (i, w) in data.iter().enumerate() {
            out[4 + 2 * i..6 + 2 * i].copy_from_slice(&w.to_be_bytes());
        }
        let sum = checksum(&out[..MAX_PACKET_LEN - 2]);
        out[MAX_PACKET_LEN - 2..].copy_from_slice(&sum.to_be_bytes());
        out
    }
}
