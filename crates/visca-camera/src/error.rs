//! Error types for camera sessions.
//!
//! Device-side rejections, timeouts, codec errors and transport failures all
//! surface through [`CameraError`]. Unrecognized replies and replies from
//! other cameras on the bus are never errors; the engine logs and skips them.

use visca_core::DeviceAddress;
use visca_hardware::TransportError;

/// Result type alias for camera operations.
pub type Result<T> = std::result::Result<T, CameraError>;

/// Errors that can occur while talking to a camera.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    /// No qualifying reply arrived before the session timeout.
    ///
    /// Recoverable: the caller may retry.
    #[error("No reply within {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The camera could not parse the packet (`60 02`).
    #[error("Camera {address} reported a syntax error")]
    SyntaxError { address: DeviceAddress },

    /// The camera refused the command in its current state (`61 41`).
    #[error("Camera {address} cannot execute the command now")]
    NotExecutable { address: DeviceAddress },

    /// Invalid parameter, malformed reply or other codec error.
    #[error(transparent)]
    Protocol(#[from] visca_core::Error),

    /// The line failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl CameraError {
    /// Create a new timeout error.
    pub fn timeout(duration_ms: u64) -> Self {
        Self::Timeout { duration_ms }
    }

    /// Create a new syntax error for `address`.
    pub fn syntax_error(address: DeviceAddress) -> Self {
        Self::SyntaxError { address }
    }

    /// Create a new not-executable error for `address`.
    pub fn not_executable(address: DeviceAddress) -> Self {
        Self::NotExecutable { address }
    }

    /// Create a malformed-reply error.
    pub fn malformed_reply(message: impl Into<String>) -> Self {
        Self::Protocol(visca_core::Error::malformed_reply(message))
    }

    /// Whether this is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether the camera itself rejected the request.
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::SyntaxError { .. } | Self::NotExecutable { .. })
    }
}
