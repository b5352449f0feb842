//! Core constants for the VISCA protocol implementation.
//!
//! This module defines the protocol-level constants shared by every crate in
//! the workspace: framing bytes, reply codes, address limits, parameter ranges
//! and the default timing of a serial session.
//!
//! # Protocol Structure
//!
//! Every VISCA packet on the wire has the same shape:
//!
//! ```text
//! <HEADER> <PAYLOAD...> <TERMINATOR>
//!   0x8y     01 04 00 02     0xFF
//! ```
//!
//! Where:
//! - `HEADER` - `1sss rrrr`: sender address in bits 6-4, receiver in bits 3-0
//! - `PAYLOAD` - command (`01 ..`), inquiry (`09 ..`) or reply (`41`, `50 ..`)
//! - `TERMINATOR` - always `0xFF`
//!
//! A controller always sends with sender `0`, so a command for camera 1 starts
//! with `0x81`. Camera 1 answers with sender `1` and receiver `0`, so its
//! replies start with `0x90`.
//!
//! # Usage
//!
//! ```
//! use visca_core::constants::*;
//!
//! assert_eq!(TERMINATOR, 0xFF);
//!
//! fn validate_address(address: u8) -> bool {
//!     (MIN_ADDRESS..=MAX_ADDRESS).contains(&address)
//! }
//! assert!(validate_address(7));
//! assert!(!validate_address(8));
//!
//! use std::time::Duration;
//! let timeout = Duration::from_millis(DEFAULT_REPLY_TIMEOUT_MS);
//! assert_eq!(timeout.as_secs(), 2);
//! ```

// ============================================================================
// Framing
// ============================================================================

/// Packet terminator. Every command, inquiry and reply ends with this byte.
pub const TERMINATOR: u8 = 0xFF;

/// Base value of a header byte (bit 7 set).
///
/// A command header is `HEADER_BASE + receiver address`.
pub const HEADER_BASE: u8 = 0x80;

/// Mask selecting the receiver address nibble of a header byte.
pub const RECEIVER_MASK: u8 = 0x0F;

/// Mask selecting the sender address bits of a header byte (after shifting).
pub const SENDER_MASK: u8 = 0x07;

/// Maximum length of a VISCA packet, header and terminator included.
///
/// Used by the stream parser to drop runaway fragments on a noisy line.
pub const MAX_PACKET_LENGTH: usize = 16;

// ============================================================================
// Addressing
// ============================================================================

/// Lowest camera address on the bus.
pub const MIN_ADDRESS: u8 = 1;

/// Highest camera address on the bus.
///
/// The sender field of a header is three bits wide, and address 0 is the
/// controller, which leaves seven cameras per line.
pub const MAX_ADDRESS: u8 = 7;

/// Address used when a session is not told otherwise.
pub const DEFAULT_ADDRESS: u8 = 1;

// ============================================================================
// Reply codes
// ============================================================================

/// First payload byte of an acknowledge reply (`y0 41 FF`).
pub const REPLY_ACK: u8 = 0x41;

/// First payload byte of a completion reply (`y0 51 FF`).
pub const REPLY_COMPLETION: u8 = 0x51;

/// First payload byte of an inquiry reply (`y0 50 ... FF`).
pub const REPLY_INQUIRY: u8 = 0x50;

/// Payload of a syntax error reply (`y0 60 02 FF`).
pub const REPLY_SYNTAX_ERROR: [u8; 2] = [0x60, 0x02];

/// Payload of a command-not-executable reply (`y0 61 41 FF`).
pub const REPLY_NOT_EXECUTABLE: [u8; 2] = [0x61, 0x41];

// ============================================================================
// Parameter ranges
// ============================================================================

/// Highest speed accepted by the variable zoom commands.
pub const MAX_ZOOM_SPEED: u8 = 0x07;

/// Highest speed accepted by the pan/tilt drive commands.
pub const MAX_PAN_TILT_SPEED: u8 = 0x18;

/// Pan/tilt speed used when the caller does not pick one.
pub const DEFAULT_PAN_TILT_SPEED: u8 = 0x07;

/// Highest absolute zoom or focus position (full tele / near end).
pub const MAX_LENS_POSITION: u32 = 0x4000;

/// Highest preset slot number.
pub const MAX_PRESET_SLOT: u8 = 0x7F;

/// Number of nibbles carried by an absolute zoom or focus position.
pub const LENS_POSITION_NIBBLES: usize = 4;

/// Number of nibbles carried by a direct exposure or colour register value.
pub const REGISTER_NIBBLES: usize = 2;

/// Default nibble width of a pan position.
pub const DEFAULT_PAN_NIBBLES: usize = 4;

/// Default nibble width of a tilt position.
pub const DEFAULT_TILT_NIBBLES: usize = 4;

/// Widest position a `u32` can carry, in nibbles.
pub const MAX_POSITION_NIBBLES: usize = 8;

/// Characters per title line.
pub const TITLE_LINE_LENGTH: usize = 10;

/// Number of title lines the overlay supports.
pub const TITLE_LINES: usize = 2;

// ============================================================================
// Session timing
// ============================================================================

/// Time a transaction waits for a qualifying reply (milliseconds).
pub const DEFAULT_REPLY_TIMEOUT_MS: u64 = 2000;

/// Sleep between transport polls while waiting for a reply (milliseconds).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Settling delay honoured after every write (milliseconds).
///
/// Some cameras drop a command that arrives too soon after the previous one.
pub const DEFAULT_COMMAND_DELAY_MS: u64 = 100;

// ============================================================================
// Serial line
// ============================================================================

/// Default serial baud rate for VISCA over RS-232/RS-422.
pub const DEFAULT_BAUD_RATE: u32 = 9600;
