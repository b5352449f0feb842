//! Stream parser for VISCA reply packets.
//!
//! A serial read returns whatever bytes happen to be in the driver buffer: a
//! partial packet, several packets, or the tail of one packet followed by the
//! head of the next. This module keeps the unterminated tail between reads so
//! a reply split across two polls is still seen as one frame.
//!
//! # Protocol Framing
//!
//! VISCA packets carry no start marker. A packet is every byte up to and
//! including the next `0xFF`; its first byte is the header:
//!
//! ```text
//! 90 50 02 FF 90 51 FF
//! └─ frame ─┘ └frame┘
//! ```
//!
//! On a complete, terminated buffer the parser yields exactly the frames
//! [`split_frames`](crate::split_frames) would, except that packets longer
//! than the 16-byte limit are dropped whole.
//!
//! # Usage
//!
//! ```
//! use visca_protocol::{Response, StreamParser};
//!
//! let mut parser = StreamParser::new();
//!
//! // Reply split across two serial reads
//! parser.feed(&[0x90, 0x50]);
//! assert!(parser.next_frame().is_none());
//! parser.feed(&[0x02, 0xFF]);
//!
//! let frame = parser.next_frame().unwrap();
//! assert_eq!(frame.classify(), Response::InquiryReply(vec![0x02]));
//! ```

use bytes::{Bytes, BytesMut};
use std::collections::VecDeque;
use visca_core::constants::{MAX_PACKET_LENGTH, TERMINATOR};

use crate::frame::Frame;

/// Longest payload a packet may carry (header and terminator excluded).
const MAX_PAYLOAD_LENGTH: usize = MAX_PACKET_LENGTH - 2;

/// Room for a handful of replies in one read.
const INITIAL_FRAME_QUEUE_CAPACITY: usize = 4;

/// State machine states for parsing VISCA packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Waiting for the header byte of the next packet.
    ///
    /// Stray terminators seen in this state are skipped.
    WaitingHeader,

    /// Reading payload bytes until the `0xFF` terminator.
    ReadingPayload,

    /// Dropping the rest of an oversized packet up to its terminator.
    Discarding,
}

/// Stateful stream parser for VISCA packets.
///
/// ```text
/// ┌──────────────┐  non-FF byte  ┌───────────────┐   FF byte   ┌─────────────┐
/// │WaitingHeader │──────────────>│ReadingPayload │────────────>│Frame ready  │
/// └──────────────┘               └───────────────┘             └─────────────┘
///   ^  ^   │ FF (skipped)               │ payload > 14 bytes          │
///   │  │   └──┘                         v                             │
///   │  │         FF byte        ┌───────────────┐                     │
///   │  └────────────────────────│  Discarding   │                     │
///   │                           └───────────────┘                     │
///   └─────────────────────────────────────────────────────────────────┘
/// ```
///
/// A header immediately followed by a terminator carries no payload and is
/// dropped, like [`split_frames`](crate::split_frames) does.
#[derive(Debug)]
pub struct StreamParser {
    /// Current state of the parser state machine.
    state: ParserState,

    /// Header byte of the packet being read.
    header: u8,

    /// Payload bytes read so far for the current packet.
    payload: BytesMut,

    /// Queue of complete frames ready for extraction.
    frames: VecDeque<Frame>,

    /// Fragments dropped for exceeding the packet length limit.
    overflows: usize,
}

impl StreamParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::WaitingHeader,
            header: 0,
            payload: BytesMut::with_capacity(MAX_PAYLOAD_LENGTH),
            frames: VecDeque::with_capacity(INITIAL_FRAME_QUEUE_CAPACITY),
            overflows: 0,
        }
    }

    /// Feed bytes read from the transport into the parser.
    ///
    /// Every packet completed by these bytes is queued; an unterminated tail
    /// is kept for the next call.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.step(byte);
        }
    }

    /// Extract the next complete frame, if any.
    pub fn next_frame(&mut self) -> Option<Frame> {
        self.frames.pop_front()
    }

    /// Returns current parser state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Returns number of frames ready for extraction.
    pub fn frames_available(&self) -> usize {
        self.frames.len()
    }

    /// Whether an unterminated packet is buffered or being dropped.
    pub fn has_partial(&self) -> bool {
        self.state != ParserState::WaitingHeader
    }

    /// Number of oversized fragments dropped since creation or the last clear.
    pub fn overflows(&self) -> usize {
        self.overflows
    }

    /// Discard buffered bytes and queued frames, and reset the state machine.
    ///
    /// ```
    /// use visca_protocol::{ParserState, StreamParser};
    ///
    /// let mut parser = StreamParser::new();
    /// parser.feed(&[0x90, 0x41, 0xFF, 0x90, 0x50]);
    /// parser.clear();
    ///
    /// assert_eq!(parser.state(), ParserState::WaitingHeader);
    /// assert_eq!(parser.frames_available(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.reset_for_next_frame();
        self.frames.clear();
        self.overflows = 0;
    }

    /// Returns an iterator that drains all currently queued frames.
    ///
    /// ```
    /// use visca_protocol::StreamParser;
    ///
    /// let mut parser = StreamParser::new();
    /// parser.feed(&[0x90, 0x41, 0xFF, 0x90, 0x51, 0xFF]);
    ///
    /// let frames: Vec<_> = parser.drain_frames().collect();
    /// assert_eq!(frames.len(), 2);
    /// assert_eq!(parser.frames_available(), 0);
    /// ```
    pub fn drain_frames(&mut self) -> DrainFrames<'_> {
        DrainFrames { parser: self }
    }

    fn step(&mut self, byte: u8) {
        match self.state {
            ParserState::WaitingHeader => {
                if byte != TERMINATOR {
                    self.header = byte;
                    self.state = ParserState::ReadingPayload;
                }
            }
            ParserState::ReadingPayload => {
                if byte == TERMINATOR {
                    self.finish_frame();
                } else if self.payload.len() == MAX_PAYLOAD_LENGTH {
                    self.overflows += 1;
                    self.payload.clear();
                    self.state = ParserState::Discarding;
                } else {
                    self.payload.extend_from_slice(&[byte]);
                }
            }
            ParserState::Discarding => {
                if byte == TERMINATOR {
                    self.reset_for_next_frame();
                }
            }
        }
    }

    fn finish_frame(&mut self) {
        if !self.payload.is_empty() {
            let payload: Bytes = self.payload.split().freeze();
            self.frames.push_back(Frame::new(self.header, payload));
        }
        self.reset_for_next_frame();
    }

    fn reset_for_next_frame(&mut self) {
        self.state = ParserState::WaitingHeader;
        self.header = 0;
        self.payload.clear();
    }
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator that drains frames from a [`StreamParser`].
///
/// Created by [`StreamParser::drain_frames`].
pub struct DrainFrames<'a> {
    parser: &'a mut StreamParser,
}

impl Iterator for DrainFrames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.next_frame()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.parser.frames_available();
        (len, Some(len))
    }
}

impl ExactSizeIterator for DrainFrames<'_> {
    fn len(&self) -> usize {
        self.parser.frames_available()
    }
}
