//! Transport abstraction layer for VISCA camera control.
//!
//! This crate moves raw bytes between a controller and a VISCA line. It sits
//! below the protocol codec and above the operating system: everything that
//! knows about packets, addresses or replies lives in the crates above.
//!
//! # Design Philosophy
//!
//! - **Blocking**: a VISCA line is half-duplex and slow; one session drives
//!   one transport from one thread, polling for replies.
//! - **Object-safe**: [`Transport`] can be used as `Box<dyn Transport>`.
//! - **Error-aware**: all operations return [`Result<T>`][error::Result] with
//!   a [`TransportError`] describing the failure.
//!
//! # Transports
//!
//! - [`SerialTransport`]: a local RS-232/RS-422 port, opened through the
//!   `serialport` crate.
//! - [`MockTransport`](mock::MockTransport): an in-memory line with a
//!   scripting handle, for tests and dry runs.
//!
//! ```no_run
//! use visca_hardware::{SerialConfig, SerialTransport, Transport};
//!
//! fn main() -> visca_hardware::Result<()> {
//!     let mut port = SerialTransport::open(SerialConfig::new("/dev/ttyUSB0"))?;
//!     port.write_all(&[0x81, 0x01, 0x04, 0x00, 0x02, 0xFF])?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod mock;
pub mod serial;
pub mod traits;
pub mod types;

pub use error::{Result, TransportError};
pub use serial::{SerialConfig, SerialTransport, available_ports};
pub use traits::Transport;
pub use types::{TransportInfo, TransportKind};
