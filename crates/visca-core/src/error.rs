//! Error types for VISCA protocol values.
//!
//! These errors cover everything that can go wrong before a byte reaches the
//! wire or after a reply has been read: invalid addresses, out-of-range
//! parameters and replies that are too short to decode. Transport failures and
//! device-side refusals live in the crates that own those concerns.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Address outside the 1-7 range of a VISCA bus.
    #[error("Invalid device address: {address} (must be 1-7)")]
    InvalidAddress { address: u8 },

    /// A command parameter the catalog refuses to encode.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// A value that does not fit the nibble width it must be encoded in.
    #[error("Value {value:#x} does not fit in {nibbles} nibbles")]
    ValueOutOfRange { value: u32, nibbles: usize },

    /// Bytes that cannot form a VISCA packet.
    #[error("Malformed frame: {message}")]
    MalformedFrame { message: String },

    /// An inquiry reply too short or otherwise impossible to decode.
    #[error("Malformed reply: {message}")]
    MalformedReply { message: String },
}

impl Error {
    /// Create a new invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create a new malformed frame error.
    pub fn malformed_frame(message: impl Into<String>) -> Self {
        Self::MalformedFrame {
            message: message.into(),
        }
    }

    /// Create a new malformed reply error.
    pub fn malformed_reply(message: impl Into<String>) -> Self {
        Self::MalformedReply {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
