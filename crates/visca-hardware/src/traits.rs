//! Transport trait definition.
//!
//! A transport is the byte-level link between a controller and a VISCA
//! line. It knows nothing about packets: it writes whole buffers, reports how
//! many bytes are waiting, and hands them over on request. Framing, address
//! filtering and reply matching happen above it, in the transaction engine.
//!
//! All methods are blocking. A transport is driven by a single session at a
//! time, so it only needs to be `Send` to move between threads.

use crate::error::Result;
use crate::types::TransportInfo;

/// Byte transport to a VISCA line.
///
/// # Object Safety
///
/// The trait is object safe, so sessions can hold `Box<dyn Transport>` when
/// the line type is picked at runtime:
///
/// ```
/// use visca_hardware::{Transport, mock::MockTransport};
///
/// let (mock, _handle) = MockTransport::new();
/// let transport: Box<dyn Transport> = Box::new(mock);
/// assert_eq!(transport.info().name, "Mock VISCA line");
/// ```
pub trait Transport: Send {
    /// Write every byte of `bytes` to the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is closed or the write fails.
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Number of bytes that can be read without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is closed.
    fn bytes_available(&mut self) -> Result<usize>;

    /// Read up to `buf.len()` bytes, returning how many were read.
    ///
    /// Returns `Ok(0)` when nothing arrives before the transport's own read
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is closed or the read fails.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Description of the line.
    fn info(&self) -> TransportInfo;

    /// Read whatever is waiting on the line without blocking.
    ///
    /// Returns an empty vector when nothing is waiting.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`bytes_available`](Self::bytes_available) and
    /// [`read`](Self::read).
    fn read_available(&mut self) -> Result<Vec<u8>> {
        let waiting = self.bytes_available()?;
        if waiting == 0 {
            return Ok(Vec::new());
        }

        let mut buf = vec![0u8; waiting];
        let read = self.read(&mut buf)?;
        buf.truncate(read);
        Ok(buf)
    }

    /// Read and drop everything currently waiting, returning the byte count.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`read_available`](Self::read_available).
    fn discard_input(&mut self) -> Result<usize> {
        let mut discarded = 0;
        loop {
            let chunk = self.read_available()?;
            if chunk.is_empty() {
                return Ok(discarded);
            }
            discarded += chunk.len();
        }
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_all(bytes)
    }

    fn bytes_available(&mut self) -> Result<usize> {
        (**self).bytes_available()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }

    fn info(&self) -> TransportInfo {
        (**self).info()
    }

    fn read_available(&mut self) -> Result<Vec<u8>> {
        (**self).read_available()
    }

    fn discard_input(&mut self) -> Result<usize> {
        (**self).discard_input()
    }
}
