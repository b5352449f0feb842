//! Types describing a transport.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of line a transport drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum TransportKind {
    /// RS-232 / RS-422 serial port.
    Serial,

    /// In-memory line used for tests and dry runs.
    Mock,
}

/// Transport information.
///
/// Reported by [`Transport::info`](crate::Transport::info) and included in
/// session logs and the CLI's status output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportInfo {
    /// Device name (e.g. "/dev/ttyUSB0", "Mock VISCA line").
    pub name: String,

    /// Kind of line.
    pub kind: TransportKind,

    /// Configured baud rate, for serial lines.
    pub baud_rate: Option<u32>,
}

impl TransportInfo {
    pub fn new(name: impl Into<String>, kind: TransportKind) -> Self {
        Self {
            name: name.into(),
            kind,
            baud_rate: None,
        }
    }

    /// Set the baud rate.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = Some(baud_rate);
        self
    }
}

impl fmt::Display for TransportInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.baud_rate {
            Some(baud) => write!(f, "{} ({:?}, {} baud)", self.name, self.kind, baud),
            None => write!(f, "{} ({:?})", self.name, self.kind),
        }
    }
}
