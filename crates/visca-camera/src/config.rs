//! Session and camera configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use visca_core::{
    DeviceAddress,
    constants::{
        DEFAULT_COMMAND_DELAY_MS, DEFAULT_PAN_NIBBLES, DEFAULT_POLL_INTERVAL_MS,
        DEFAULT_REPLY_TIMEOUT_MS, DEFAULT_TILT_NIBBLES, MAX_POSITION_NIBBLES,
    },
};

/// Timing and logging of a transaction engine
///
/// # Example
///
/// ```
/// use visca_camera::SessionConfig;
/// use std::time::Duration;
///
/// let config = SessionConfig::default()
///     .with_timeout(Duration::from_millis(500))
///     .with_diagnostics(true);
///
/// assert_eq!(config.poll_interval, Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long an inquiry waits for a qualifying reply
    pub timeout: Duration,

    /// Sleep between transport polls while waiting
    pub poll_interval: Duration,

    /// Settling delay after every write
    pub command_delay: Duration,

    /// Log outbound frames and unrecognized replies at higher levels
    pub diagnostics: bool,
}

impl SessionConfig {
    /// Set the reply timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the poll interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set the post-write settling delay.
    pub fn with_command_delay(mut self, command_delay: Duration) -> Self {
        self.command_delay = command_delay;
        self
    }

    /// Turn diagnostic logging on or off.
    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Timeout in whole milliseconds, as reported in errors and logs.
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_REPLY_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            command_delay: Duration::from_millis(DEFAULT_COMMAND_DELAY_MS),
            diagnostics: false,
        }
    }
}

/// Per-camera settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Address of the camera on the bus
    pub address: DeviceAddress,

    /// Width of a pan position, in nibbles
    pub pan_nibbles: usize,

    /// Width of a tilt position, in nibbles
    pub tilt_nibbles: usize,
}

impl CameraConfig {
    pub fn new(address: DeviceAddress) -> Self {
        Self {
            address,
            ..Default::default()
        }
    }

    /// Set the pan and tilt position widths.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` for a width of 0 or above 8.
    pub fn with_position_widths(
        mut self,
        pan_nibbles: usize,
        tilt_nibbles: usize,
    ) -> visca_core::Result<Self> {
        for (what, width) in [("pan", pan_nibbles), ("tilt", tilt_nibbles)] {
            if width == 0 || width > MAX_POSITION_NIBBLES {
                return Err(visca_core::Error::invalid_parameter(format!(
                    "{what} width must be 1-{MAX_POSITION_NIBBLES} nibbles, got {width}"
                )));
            }
        }
        self.pan_nibbles = pan_nibbles;
        self.tilt_nibbles = tilt_nibbles;
        Ok(self)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            address: DeviceAddress::default(),
            pan_nibbles: DEFAULT_PAN_NIBBLES,
            tilt_nibbles: DEFAULT_TILT_NIBBLES,
        }
    }
}
