use pms::*;

fn sample() -> Packet {
    Packet {
        standard: Reading::new(11, 16, 18),
        atmospheric: Reading::new(8, 13, 17),
        counts: ParticleCounts {
            um0_3: 1887,
            um0_5: 560,
            um1_0: 95,
            um2_5: 6,
            um5_0: 2,
            um10: 1,
        },
    }
}

fn parse(buf: &[u8]) -> DecodeResult<Packet> {
    Packet::parse(&last_frame(buf)?)
}

// A packet captured from a PMS5003:
#[test]
fn captured_packet() {
    let buf = [
        0x42, 0x4D, 0x00, 0x1C, 0x00, 0x05, 0x00, 0x08, 0x00, 0x09, 0x00, 0x05, 0x00, 0x08, 0x00,
        0x09, 0x03, 0x1E, 0x00, 0xE4, 0x00, 0x2C, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x97, 0x00,
        0x02, 0xA2,
    ];
    let packet = parse(&buf).unwrap();
    assert_eq!(packet.standard, Reading::new(5, 8, 9));
    assert_eq!(packet.atmospheric, Reading::new(5, 8, 9));
    assert_eq!(packet.counts.um0_3, 798);
    assert_eq!(packet.counts.um0_5, 228);
    assert_eq!(packet.counts.um1_0, 44);
    assert_eq!(packet.counts.um2_5, 3);
    assert_eq!(packet.counts.um5_0, 0);
    assert_eq!(packet.counts.um10, 0);
}

// A built packet parses back, and its fixed-offset fields agree:
#[test]
fn built_packet() {
    let bytes = sample().to_bytes();
    assert_eq!(parse(&bytes), Ok(sample()));
    assert_eq!(last_reading(&bytes), Ok(sample().atmospheric));
}

// Corrupt one data byte:
#[test]
fn bad_checksum() {
    let mut bytes = sample().to_bytes();
    bytes[12] ^= 0x01;

    let good = sample().to_bytes();
    let received = u16::from_be_bytes([good[30], good[31]]);
    assert_eq!(
        parse(&bytes),
        Err(DecodeError {
            kind: DecodeErrorKind::ChecksumMismatch {
                calculated: received.wrapping_add(1),
                received,
            },
            offset: 0,
        })
    );
}

// Length fields outside of the sensor's packet size:
#[test]
fn bad_length() {
    for len in &[0u16, 2, 20, 29, 0xFFFF] {
        let mut bytes = sample().to_bytes();
        bytes[2..4].copy_from_slice(&len.to_be_bytes());
        assert_eq!(
            parse(&bytes).map_err(|e| e.kind),
            Err(DecodeErrorKind::InvalidLength(*len))
        );
    }
}

// A packet that is still being written:
#[test]
fn truncated() {
    let bytes = sample().to_bytes();
    assert_eq!(
        parse(&bytes[..20]).map_err(|e| e.kind),
        Err(DecodeErrorKind::SegmentTooShort(18))
    );
    assert_eq!(
        parse(&bytes[..3]).map_err(|e| e.kind),
        Err(DecodeErrorKind::SegmentTooShort(1))
    );
}

// Offsets are relative to the whole capture:
#[test]
fn offset_in_capture() {
    let mut buf = vec![0xAA; 7];
    buf.extend_from_slice(&sample().to_bytes()[..31]);
    assert_eq!(
        parse(&buf),
        Err(DecodeError {
            kind: DecodeErrorKind::SegmentTooShort(29),
            offset: 7,
        })
    );
}

#[test]
fn checksum_wraps() {
    assert_eq!(checksum(&[]), 0);
    assert_eq!(checksum(&[0x42, 0x4D]), 0x8F);
    assert_eq!(checksum(&[0xFF; 300]), ((0xFF * 300) % 0x10000) as u16);
}
