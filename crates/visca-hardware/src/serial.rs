//! Serial port transport.
//!
//! VISCA cameras are daisy-chained on an RS-232 or RS-422 line running 8N1
//! without flow control, usually at 9600 baud.

use serde::{Deserialize, Serialize};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::{ErrorKind, Read, Write};
use std::time::Duration;
use tracing::{debug, trace};

use crate::error::{Result, TransportError};
use crate::traits::Transport;
use crate::types::{TransportInfo, TransportKind};

/// Serial line configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Port path (e.g. "/dev/ttyUSB0", "COM3").
    pub path: String,

    /// Line speed in bits per second.
    pub baud_rate: u32,

    /// Timeout of a single blocking read or write (milliseconds).
    pub io_timeout_ms: u64,
}

impl SerialConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set the baud rate.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the per-operation I/O timeout.
    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Check the configuration before opening a port.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::ConfigurationError` for an empty path or a
    /// zero baud rate.
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(TransportError::configuration("serial port path is empty"));
        }
        if self.baud_rate == 0 {
            return Err(TransportError::configuration("baud rate must be positive"));
        }
        Ok(())
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            path: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            io_timeout_ms: 100,
        }
    }
}

/// Transport over a local serial port.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    config: SerialConfig,
}

impl SerialTransport {
    /// Open the port described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the port cannot
    /// be opened.
    pub fn open(config: SerialConfig) -> Result<Self> {
        config.validate()?;

        let port = serialport::new(&config.path, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_millis(config.io_timeout_ms))
            .open()?;

        debug!(path = %config.path, baud = config.baud_rate, "Serial port opened");

        Ok(Self { port, config })
    }

    /// Configuration the port was opened with.
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }
}

impl Transport for SerialTransport {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        trace!(len = bytes.len(), "Serial write");
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        let waiting = self.port.bytes_to_read()?;
        Ok(usize::try_from(waiting).unwrap_or(usize::MAX))
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.port.read(buf) {
            Ok(read) => {
                trace!(len = read, "Serial read");
                Ok(read)
            }
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn info(&self) -> TransportInfo {
        TransportInfo::new(self.config.path.clone(), TransportKind::Serial)
            .with_baud_rate(self.config.baud_rate)
    }
}

impl std::fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Names of the serial ports present on this machine.
///
/// # Errors
///
/// Returns an error if the platform port enumeration fails.
pub fn available_ports() -> Result<Vec<String>> {
    Ok(serialport::available_ports()?
        .into_iter()
        .map(|port| port.port_name)
        .collect())
}
