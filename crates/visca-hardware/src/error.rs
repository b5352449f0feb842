//! Error types for transport operations.
//!
//! This module defines the failures a byte transport can report: a closed
//! line, a port that cannot be opened or configured, and plain I/O errors.

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur while moving bytes to or from a camera line.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The line is not connected or has been closed.
    #[error("Transport disconnected: {device}")]
    Disconnected { device: String },

    /// Port configuration was rejected.
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    /// Error reported by the serial port driver.
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }
}
