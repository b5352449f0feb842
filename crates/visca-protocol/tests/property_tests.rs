//! Property-based tests for the VISCA codec.
//!
//! These tests generate random positions, addresses and byte streams and
//! check that the codec invariants hold for every input.

use proptest::prelude::*;
use visca_core::DeviceAddress;
use visca_protocol::{
    Command, CommandCode, Frame, Response, StreamParser, combine_nibbles, split_frames,
    split_nibbles, try_split_nibbles,
};

/// Strategy for valid camera addresses (1-7).
fn valid_address() -> impl Strategy<Value = DeviceAddress> {
    (1u8..=7u8).prop_map(|raw| DeviceAddress::new(raw).unwrap())
}

/// Strategy for a nibble width and a value that fits in it.
fn value_with_width() -> impl Strategy<Value = (u32, usize)> {
    (1usize..=8).prop_flat_map(|count| {
        let max = if count == 8 {
            u32::MAX
        } else {
            (1u32 << (4 * count)) - 1
        };
        (0..=max, Just(count))
    })
}

/// Strategy for a stream of well-formed reply packets.
fn reply_stream() -> impl Strategy<Value = Vec<Vec<u8>>> {
    let packet = (1u8..=7, prop::collection::vec(0u8..0xFF, 1..=14)).prop_map(|(sender, body)| {
        let mut packet = vec![0x80 | (sender << 4)];
        packet.extend(body);
        packet.push(0xFF);
        packet
    });
    prop::collection::vec(packet, 0..8)
}

proptest! {
    /// Property: splitting then combining nibbles gives the value back.
    #[test]
    fn prop_nibble_roundtrip((value, count) in value_with_width()) {
        let nibbles = split_nibbles(value, count);

        prop_assert_eq!(nibbles.len(), count);
        prop_assert!(nibbles.iter().all(|&n| n <= 0x0F));
        prop_assert_eq!(combine_nibbles(&nibbles), value);
        prop_assert_eq!(try_split_nibbles(value, count).unwrap(), nibbles);
    }

    /// Property: truncation keeps exactly the low 4*count bits.
    #[test]
    fn prop_split_truncates(value in any::<u32>(), count in 0usize..8) {
        let mask = (1u32 << (4 * count)) - 1;
        prop_assert_eq!(combine_nibbles(&split_nibbles(value, count)), value & mask);
    }

    /// Property: an encoded command decodes to the address it was sent to.
    #[test]
    fn prop_encoded_header_decodes_to_address(address in valid_address()) {
        let bytes = Frame::encode(address, &Command::from(CommandCode::PowerOn));
        let frames = split_frames(&bytes);

        prop_assert_eq!(frames.len(), 1);
        prop_assert_eq!(frames[0].address(), Some(address));
    }

    /// Property: a camera reply header decodes to the sending camera.
    #[test]
    fn prop_reply_header_decodes_to_sender(address in valid_address()) {
        let header = 0x80 | (address.as_u8() << 4);
        let frames = split_frames(&[header, 0x41, 0xFF]);

        prop_assert_eq!(frames[0].address(), Some(address));
        prop_assert_eq!(frames[0].classify(), Response::Acknowledge);
    }

    /// Property: the stream parser yields the same frames however the input
    /// is chunked, and the same frames as the stateless splitter.
    #[test]
    fn prop_stream_parser_chunking(packets in reply_stream(), chunk in 1usize..6) {
        let raw: Vec<u8> = packets.concat();

        let mut parser = StreamParser::new();
        for piece in raw.chunks(chunk) {
            parser.feed(piece);
        }
        let parsed: Vec<Frame> = parser.drain_frames().collect();

        prop_assert_eq!(parsed.len(), packets.len());
        prop_assert_eq!(parsed, split_frames(&raw));
        prop_assert!(!parser.has_partial());
    }

    /// Property: classification never panics and errors are recognised only
    /// for their exact payloads.
    #[test]
    fn prop_classify_total(payload in prop::collection::vec(any::<u8>(), 0..16)) {
        let response = Response::classify(&payload);
        if response.is_error() {
            prop_assert!(payload == [0x60, 0x02] || payload == [0x61, 0x41]);
        }
    }
}

#[test]
fn pan_tilt_absolute_example() {
    let cmd = Command::pan_tilt_absolute(0x07, 0x07, 0x1234, 0x0001, 4, 4).unwrap();
    let bytes = Frame::encode(DeviceAddress::new(1).unwrap(), &cmd);

    assert_eq!(
        &bytes[..],
        &[
            0x81, 0x01, 0x06, 0x02, 0x07, 0x07, 0x01, 0x02, 0x03, 0x04, 0x00, 0x00, 0x00, 0x01,
            0xFF
        ]
    );
}
