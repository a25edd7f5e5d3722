use pms::*;

fn sample() -> [u8; MAX_PACKET_LEN] {
    Packet {
        atmospheric: Reading::new(21, 37, 52),
        ..Packet::default()
    }
    .to_bytes()
}

fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn binary_fixed() {
    let decoder = Decoder::default();
    assert_eq!(decoder.decode(&sample()), Ok(Reading::new(21, 37, 52)));
}

// The fixed-offset decoder does not need the checksum or the reserved bytes:
#[test]
fn binary_fixed_partial_packet() {
    let decoder = Decoder::default();
    assert_eq!(decoder.decode(&sample()[..16]), Ok(Reading::new(21, 37, 52)));
}

#[test]
fn binary_checksum() {
    let decoder = Decoder::new(CaptureFormat::Binary, FrameCheck::Checksum);
    assert_eq!(decoder.decode(&sample()), Ok(Reading::new(21, 37, 52)));
    assert_eq!(
        decoder.decode(&sample()[..16]).map_err(|e| e.kind),
        Err(DecodeErrorKind::SegmentTooShort(14))
    );
}

// Hex dumps decode like the raw bytes they describe:
#[test]
fn hex_text() {
    let mut text = String::from("deadbeef\r\n");
    text.push_str(&hex_dump(&sample()));
    text.push('\n');

    for check in &[FrameCheck::Fixed, FrameCheck::Checksum] {
        let decoder = Decoder::new(CaptureFormat::HexText, *check);
        assert_eq!(
            decoder.decode(text.as_bytes()),
            Ok(Reading::new(21, 37, 52))
        );
    }
}

// A dangling digit at the end of a hex dump is ignored:
#[test]
fn hex_text_torn_write() {
    let text = format!("{}4", hex_dump(&sample()));
    let decoder = Decoder::new(CaptureFormat::HexText, FrameCheck::Checksum);
    assert_eq!(decoder.decode(text.as_bytes()), Ok(Reading::new(21, 37, 52)));
}

#[test]
fn hex_text_invalid_character() {
    let decoder = Decoder::new(CaptureFormat::HexText, FrameCheck::Fixed);
    assert_eq!(
        decoder.decode(b"42 4D 00 1C zz"),
        Err(DecodeError {
            kind: DecodeErrorKind::InvalidHex(b'z'),
            offset: 12,
        })
    );
}

#[test]
fn hex_text_without_marker() {
    let decoder = Decoder::new(CaptureFormat::HexText, FrameCheck::Fixed);
    assert_eq!(
        decoder.decode(b"00 11 22 33").map_err(|e| e.kind),
        Err(DecodeErrorKind::MarkerNotFound)
    );
}

#[test]
fn decode_hex() {
    assert_eq!(decode_hex_text(b"424D 001c\n"), Ok(vec![0x42, 0x4D, 0x00, 0x1C]));
    assert_eq!(decode_hex_text(b""), Ok(vec![]));
    assert_eq!(decode_hex_text(b"4 2"), Ok(vec![0x42]));
}

#[test]
fn capture_format_names() {
    assert_eq!("binary".parse::<CaptureFormat>(), Ok(CaptureFormat::Binary));
    assert_eq!("hex".parse::<CaptureFormat>(), Ok(CaptureFormat::HexText));
    assert!("ascii".parse::<CaptureFormat>().is_err());
}
