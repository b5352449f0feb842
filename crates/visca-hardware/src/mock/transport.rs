//! Mock transport for testing and development.
//!
//! This module provides an in-memory VISCA line that can be scripted from a
//! test: queue bytes the "camera" will send, register canned replies for
//! specific requests, and inspect everything the controller wrote.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

use crate::{
    Result, TransportError,
    traits::Transport,
    types::{TransportInfo, TransportKind},
};

/// Mock transport for testing and development.
///
/// Inbound bytes are queued as chunks, and every read hands out at most one
/// chunk. A reply queued as two chunks therefore reaches the controller in
/// two separate polls, the way a slow serial line splits it.
///
/// # Examples
///
/// ```
/// use visca_hardware::{Transport, mock::MockTransport};
///
/// let (mut line, handle) = MockTransport::new();
///
/// // Camera 1 acknowledges and completes whatever power-on it receives
/// handle.respond_to(
///     &[0x81, 0x01, 0x04, 0x00, 0x02, 0xFF],
///     [vec![0x90, 0x41, 0xFF], vec![0x90, 0x51, 0xFF]],
/// );
///
/// line.write_all(&[0x81, 0x01, 0x04, 0x00, 0x02, 0xFF]).unwrap();
/// assert_eq!(line.read_available().unwrap(), vec![0x90, 0x41, 0xFF]);
/// assert_eq!(line.read_available().unwrap(), vec![0x90, 0x51, 0xFF]);
/// assert_eq!(handle.written().len(), 1);
/// ```
#[derive(Debug)]
pub struct MockTransport {
    state: Arc<Mutex<LineState>>,
    name: String,
}

impl MockTransport {
    /// Create a new mock line with the default name.
    ///
    /// Returns a tuple of (MockTransport, MockTransportHandle) where the
    /// handle scripts and inspects the line.
    pub fn new() -> (Self, MockTransportHandle) {
        Self::with_name("Mock VISCA line")
    }

    /// Create a new mock line with a custom name.
    pub fn with_name(name: impl Into<String>) -> (Self, MockTransportHandle) {
        let state = Arc::new(Mutex::new(LineState::default()));

        let line = Self {
            state: Arc::clone(&state),
            name: name.into(),
        };
        let handle = MockTransportHandle { state };

        (line, handle)
    }

    fn lock(&self) -> MutexGuard<'_, LineState> {
        lock(&self.state)
    }

    fn check_connected(&self, state: &LineState) -> Result<()> {
        if state.connected {
            Ok(())
        } else {
            Err(TransportError::disconnected(self.name.clone()))
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new().0
    }
}

impl Transport for MockTransport {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let mut state = self.lock();
        self.check_connected(&state)?;

        trace!(len = bytes.len(), "Mock write");
        state.written.push(bytes.to_vec());

        let replies: Vec<Vec<u8>> = state
            .responders
            .iter()
            .filter(|r| r.request == bytes)
            .flat_map(|r| r.replies.iter().cloned())
            .collect();
        state.inbound.extend(replies);

        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        let state = self.lock();
        self.check_connected(&state)?;
        Ok(state.inbound.front().map_or(0, Vec::len))
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut state = self.lock();
        self.check_connected(&state)?;

        let Some(mut chunk) = state.inbound.pop_front() else {
            return Ok(0);
        };

        let read = chunk.len().min(buf.len());
        buf[..read].copy_from_slice(&chunk[..read]);
        if read < chunk.len() {
            state.inbound.push_front(chunk.split_off(read));
        }

        trace!(len = read, "Mock read");
        Ok(read)
    }

    fn info(&self) -> TransportInfo {
        TransportInfo::new(self.name.clone(), TransportKind::Mock)
    }
}

/// Canned replies written back when a request matches exactly.
#[derive(Debug, Clone)]
struct Responder {
    request: Vec<u8>,
    replies: Vec<Vec<u8>>,
}

#[derive(Debug)]
struct LineState {
    /// Chunks waiting to be read, one chunk per read
    inbound: VecDeque<Vec<u8>>,

    /// Every buffer written, in order
    written: Vec<Vec<u8>>,

    responders: Vec<Responder>,

    connected: bool,
}

impl Default for LineState {
    fn default() -> Self {
        Self {
            inbound: VecDeque::new(),
            written: Vec::new(),
            responders: Vec::new(),
            connected: true,
        }
    }
}

fn lock(state: &Mutex<LineState>) -> MutexGuard<'_, LineState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle for scripting and inspecting a mock line.
///
/// Clones share the same line.
#[derive(Debug, Clone)]
pub struct MockTransportHandle {
    state: Arc<Mutex<LineState>>,
}

impl MockTransportHandle {
    /// Queue bytes for the controller to read, as one chunk.
    pub fn push_inbound(&self, bytes: impl Into<Vec<u8>>) {
        let bytes = bytes.into();
        if !bytes.is_empty() {
            lock(&self.state).inbound.push_back(bytes);
        }
    }

    /// Queue several chunks, each delivered by a separate read.
    pub fn push_chunks<I, B>(&self, chunks: I)
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        for chunk in chunks {
            self.push_inbound(chunk);
        }
    }

    /// Queue `replies` every time the controller writes exactly `request`.
    ///
    /// Each reply is delivered as its own chunk.
    pub fn respond_to<I, B>(&self, request: &[u8], replies: I)
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        let replies = replies
            .into_iter()
            .map(Into::into)
            .filter(|reply: &Vec<u8>| !reply.is_empty())
            .collect();

        lock(&self.state).responders.push(Responder {
            request: request.to_vec(),
            replies,
        });
    }

    /// Remove every registered responder.
    pub fn clear_responders(&self) {
        lock(&self.state).responders.clear();
    }

    /// Every buffer written by the controller, in order.
    pub fn written(&self) -> Vec<Vec<u8>> {
        lock(&self.state).written.clone()
    }

    /// Last buffer written by the controller.
    pub fn last_written(&self) -> Option<Vec<u8>> {
        lock(&self.state).written.last().cloned()
    }

    /// Forget the recorded writes.
    pub fn clear_written(&self) {
        lock(&self.state).written.clear();
    }

    /// Bytes queued and not yet read.
    pub fn pending_inbound(&self) -> usize {
        lock(&self.state).inbound.iter().map(Vec::len).sum()
    }

    /// Close the line; every later operation fails with `Disconnected`.
    pub fn disconnect(&self) {
        lock(&self.state).connected = false;
    }

    /// Reopen a closed line.
    pub fn reconnect(&self) {
        lock(&self.state).connected = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_hands_out_one_chunk_per_call() {
        let (mut line, handle) = MockTransport::new();
        handle.push_chunks([vec![0x90, 0x50], vec![0x02, 0xFF]]);

        assert_eq!(line.bytes_available().unwrap(), 2);
        assert_eq!(line.read_available().unwrap(), vec![0x90, 0x50]);
        assert_eq!(line.read_available().unwrap(), vec![0x02, 0xFF]);
        assert!(line.read_available().unwrap().is_empty());
    }

    #[test]
    fn test_short_buffer_keeps_rest_of_chunk() {
        let (mut line, handle) = MockTransport::new();
        handle.push_inbound(vec![0x90, 0x41, 0xFF]);

        let mut buf = [0u8; 2];
        assert_eq!(line.read(&mut buf).unwrap(), 2);
        assert_eq!(buf, [0x90, 0x41]);
        assert_eq!(line.read_available().unwrap(), vec![0xFF]);
    }

    #[test]
    fn test_responder_fires_on_exact_match_only() {
        let (mut line, handle) = MockTransport::new();
        handle.respond_to(&[0x81, 0x09, 0x04, 0x00, 0xFF], [vec![0x90, 0x50, 0x02, 0xFF]]);

        line.write_all(&[0x82, 0x09, 0x04, 0x00, 0xFF]).unwrap();
        assert_eq!(handle.pending_inbound(), 0);

        line.write_all(&[0x81, 0x09, 0x04, 0x00, 0xFF]).unwrap();
        assert_eq!(line.read_available().unwrap(), vec![0x90, 0x50, 0x02, 0xFF]);

        // Responders stay armed
        line.write_all(&[0x81, 0x09, 0x04, 0x00, 0xFF]).unwrap();
        assert_eq!(handle.pending_inbound(), 4);
    }

    #[test]
    fn test_written_is_recorded() {
        let (mut line, handle) = MockTransport::new();
        line.write_all(&[0x81, 0x01, 0xFF]).unwrap();
        line.write_all(&[0x81, 0x02, 0xFF]).unwrap();

        assert_eq!(handle.written().len(), 2);
        assert_eq!(handle.last_written(), Some(vec![0x81, 0x02, 0xFF]));

        handle.clear_written();
        assert!(handle.written().is_empty());
    }

    #[test]
    fn test_discard_input() {
        let (mut line, handle) = MockTransport::new();
        handle.push_chunks([vec![0x90, 0x41, 0xFF], vec![0x90, 0x51, 0xFF]]);

        assert_eq!(line.discard_input().unwrap(), 6);
        assert_eq!(handle.pending_inbound(), 0);
    }

    #[test]
    fn test_disconnect() {
        let (mut line, handle) = MockTransport::with_name("line 2");
        handle.disconnect();

        let err = line.write_all(&[0x81, 0x01, 0xFF]).unwrap_err();
        assert!(matches!(err, TransportError::Disconnected { ref device } if device == "line 2"));
        assert!(line.bytes_available().is_err());

        handle.reconnect();
        assert!(line.bytes_available().is_ok());
    }

    #[test]
    fn test_info() {
        let (line, _handle) = MockTransport::new();
        let info = line.info();

        assert_eq!(info.kind, TransportKind::Mock);
        assert_eq!(info.baud_rate, None);
    }
}
