use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use visca_core::{DeviceAddress, constants::TERMINATOR};

use crate::commands::Command;
use crate::response::Response;

/// Frame is one VISCA packet as it travels on the wire
///
/// A frame is a header byte, a payload and the `0xFF` terminator. Outbound
/// frames are built with [`Frame::encode`]; inbound bytes are cut into frames
/// with [`split_frames`] or, when replies may straddle two reads, with the
/// [`StreamParser`](crate::StreamParser).
///
/// # Wire Format
/// ```text
/// 81 01 04 00 02 FF      controller -> camera 1: power on
/// 90 41 FF               camera 1 -> controller: acknowledge
/// 90 51 FF               camera 1 -> controller: completion
/// 90 50 02 FF            camera 1 -> controller: inquiry reply "on"
/// ```
///
/// # Basic Usage
/// ```
/// use visca_protocol::{Command, CommandCode, Frame, Response};
/// use visca_core::DeviceAddress;
///
/// let address = DeviceAddress::new(1).unwrap();
/// let bytes = Frame::encode(address, &Command::from(CommandCode::PowerOn));
/// assert_eq!(&bytes[..], &[0x81, 0x01, 0x04, 0x00, 0x02, 0xFF]);
///
/// let frames = visca_protocol::split_frames(&[0x90, 0x50, 0x02, 0xFF]);
/// assert_eq!(frames[0].address(), Some(address));
/// assert_eq!(frames[0].classify(), Response::InquiryReply(vec![0x02]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Header byte as received
    header: u8,

    /// Bytes between header and terminator
    payload: Bytes,
}

impl Frame {
    /// Create a frame from a header byte and its payload (terminator excluded).
    pub fn new(header: u8, payload: Bytes) -> Self {
        Frame { header, payload }
    }

    /// Build a frame from a slice holding header and payload, without terminator.
    ///
    /// Returns `None` for slices too short to carry a payload.
    pub fn from_fragment(fragment: &[u8]) -> Option<Self> {
        match fragment {
            [header, payload @ ..] if !payload.is_empty() => {
                Some(Frame::new(*header, Bytes::copy_from_slice(payload)))
            }
            _ => None,
        }
    }

    /// Encode a command for `address` into wire bytes.
    ///
    /// The command template already carries its terminator, so this only
    /// prepends the header byte.
    pub fn encode(address: DeviceAddress, command: &Command) -> Bytes {
        let template = command.as_bytes();
        let mut buf = BytesMut::with_capacity(template.len() + 1);
        buf.put_u8(address.header_byte());
        buf.put_slice(template);
        buf.freeze()
    }

    /// Header byte as it appeared on the wire.
    pub fn header(&self) -> u8 {
        self.header
    }

    /// Camera address the header names, if any.
    pub fn address(&self) -> Option<DeviceAddress> {
        DeviceAddress::from_header(self.header)
    }

    /// Whether this frame came from (or is addressed to) `address`.
    pub fn is_from(&self, address: DeviceAddress) -> bool {
        self.address() == Some(address)
    }

    /// Payload bytes, header and terminator excluded.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Classify the payload.
    pub fn classify(&self) -> Response {
        Response::classify(&self.payload)
    }

    /// Full wire representation, terminator included.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.payload.len() + 2);
        buf.put_u8(self.header);
        buf.put_slice(&self.payload);
        buf.put_u8(TERMINATOR);
        buf.freeze()
    }
}

/// Split a buffer of concatenated packets into frames.
///
/// The buffer is cut on every `0xFF`. Empty fragments and fragments holding
/// only a header byte are dropped. A trailing fragment without its terminator
/// is treated like any other; this function keeps no state between calls.
///
/// ```
/// use visca_protocol::split_frames;
///
/// let frames = split_frames(&[0x81, 0x41, 0xFF, 0x81, 0x51, 0xFF]);
/// assert_eq!(frames.len(), 2);
/// assert_eq!(frames[0].payload(), &[0x41]);
/// assert_eq!(frames[1].payload(), &[0x51]);
/// ```
pub fn split_frames(raw: &[u8]) -> Vec<Frame> {
    raw.split(|&b| b == TERMINATOR)
        .filter_map(Frame::from_fragment)
        .collect()
}

/// Render bytes as space-separated hex, as used in log lines.
pub fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Frame[header={:02X}, payload='{}']",
            self.header,
            hex(&self.payload)
        )
    }
}
