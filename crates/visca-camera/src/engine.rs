//! Blocking request/reply engine for one VISCA line.
//!
//! The engine owns the transport and drives one transaction at a time:
//!
//! ```text
//! Sent ──> Waiting ──> Resolved(reply)
//!             │
//!             └──────> TimedOut
//! ```
//!
//! - **Sent**: stale input is drained, the frame is written, and the
//!   settling delay is honoured.
//! - **Waiting**: the transport is polled. Frames from other cameras are
//!   skipped, the rest are classified. With nothing to read, the engine
//!   sleeps for the poll interval.
//! - **Resolved**: an inquiry resolves on its inquiry reply; [`execute`]
//!   resolves on completion. Syntax and not-executable replies resolve with
//!   the matching error.
//! - **TimedOut**: nothing qualifying arrived in time.
//!
//! Every method takes `&mut self`, so one engine can never have two
//! transactions in flight. Cameras sharing a bus share one engine and are
//! named per call.
//!
//! The engine never retries.
//!
//! [`execute`]: TransactionEngine::execute

use std::thread;
use std::time::Instant;
use tracing::{debug, trace, warn};
use visca_core::DeviceAddress;
use visca_hardware::{Transport, TransportInfo};
use visca_protocol::{Command, Frame, Response, StreamParser, hex};

use crate::config::SessionConfig;
use crate::error::{CameraError, Result};

/// Reply that ends a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    InquiryReply,
    Completion,
}

impl Expect {
    fn accepts(self, response: &Response) -> bool {
        match self {
            Expect::InquiryReply => response.is_inquiry_reply(),
            Expect::Completion => *response == Response::Completion,
        }
    }
}

/// Transaction engine over a [`Transport`]
///
/// # Example
///
/// ```
/// use visca_camera::{SessionConfig, TransactionEngine};
/// use visca_core::DeviceAddress;
/// use visca_hardware::mock::MockTransport;
/// use visca_protocol::{Command, InquiryCode};
/// use std::time::Duration;
///
/// let (line, handle) = MockTransport::new();
/// handle.respond_to(&[0x81, 0x09, 0x04, 0x00, 0xFF], [vec![0x90, 0x50, 0x02, 0xFF]]);
///
/// let config = SessionConfig::default().with_command_delay(Duration::ZERO);
/// let mut engine = TransactionEngine::with_config(line, config);
///
/// let camera = DeviceAddress::new(1).unwrap();
/// let result = engine.inquire(camera, &Command::from(InquiryCode::Power)).unwrap();
/// assert_eq!(result, vec![0x02]);
/// ```
#[derive(Debug)]
pub struct TransactionEngine<T: Transport> {
    transport: T,
    parser: StreamParser,
    config: SessionConfig,
}

impl<T: Transport> TransactionEngine<T> {
    /// Create an engine with the default session timing.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, SessionConfig::default())
    }

    pub fn with_config(transport: T, config: SessionConfig) -> Self {
        debug!(
            transport = %transport.info(),
            timeout_ms = config.timeout_ms(),
            "Transaction engine ready"
        );
        Self {
            transport,
            parser: StreamParser::new(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Turn diagnostic logging on or off for the rest of the session.
    pub fn set_diagnostics(&mut self, diagnostics: bool) {
        self.config.diagnostics = diagnostics;
    }

    pub fn diagnostics(&self) -> bool {
        self.config.diagnostics
    }

    /// Description of the underlying line.
    pub fn transport_info(&self) -> TransportInfo {
        self.transport.info()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Write `command` to `address` without waiting for a reply.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Transport` if the write fails.
    pub fn send(&mut self, address: DeviceAddress, command: &Command) -> Result<()> {
        self.discard_stale_input()?;

        let bytes = Frame::encode(address, command);
        if self.config.diagnostics {
            debug!(address = %address, bytes = %hex(&bytes), "Sending frame");
        } else {
            trace!(address = %address, bytes = %hex(&bytes), "Sending frame");
        }

        self.transport.write_all(&bytes)?;

        if !self.config.command_delay.is_zero() {
            thread::sleep(self.config.command_delay);
        }
        Ok(())
    }

    /// Send an inquiry and wait for its reply.
    ///
    /// Returns the result bytes of the inquiry reply (the bytes after `0x50`).
    /// Acknowledge and completion replies are skipped.
    ///
    /// # Errors
    ///
    /// - `CameraError::Timeout` if no inquiry reply arrives in time
    /// - `CameraError::SyntaxError` / `CameraError::NotExecutable` if the
    ///   camera rejects the request
    /// - `CameraError::Transport` if the line fails
    pub fn inquire(&mut self, address: DeviceAddress, command: &Command) -> Result<Vec<u8>> {
        self.send(address, command)?;
        match self.await_reply(address, Expect::InquiryReply)? {
            Response::InquiryReply(result) => Ok(result),
            other => Err(CameraError::malformed_reply(format!(
                "expected an inquiry reply, got {other}"
            ))),
        }
    }

    /// Send a command and wait until the camera reports completion.
    ///
    /// # Errors
    ///
    /// Same as [`inquire`](Self::inquire).
    pub fn execute(&mut self, address: DeviceAddress, command: &Command) -> Result<()> {
        self.send(address, command)?;
        self.await_reply(address, Expect::Completion).map(|_| ())
    }

    /// Drop bytes left over from earlier transactions.
    fn discard_stale_input(&mut self) -> Result<()> {
        let queued = self.parser.frames_available();
        let partial = self.parser.has_partial();
        self.parser.clear();

        let discarded = self.transport.discard_input()?;
        if discarded > 0 || queued > 0 || partial {
            trace!(
                bytes = discarded,
                frames = queued,
                partial,
                "Discarded stale input"
            );
        }
        Ok(())
    }

    fn await_reply(&mut self, address: DeviceAddress, expect: Expect) -> Result<Response> {
        let started = Instant::now();
        let deadline = started + self.config.timeout;

        loop {
            let chunk = self.transport.read_available()?;
            if !chunk.is_empty() {
                trace!(bytes = %hex(&chunk), "Read");
                self.parser.feed(&chunk);
                if let Some(response) = self.take_reply(address, expect)? {
                    trace!(
                        address = %address,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Transaction resolved"
                    );
                    return Ok(response);
                }
            }

            let now = Instant::now();
            if now >= deadline {
                debug!(
                    address = %address,
                    timeout_ms = self.config.timeout_ms(),
                    "Timed out waiting for reply"
                );
                return Err(CameraError::timeout(self.config.timeout_ms()));
            }

            if chunk.is_empty() {
                thread::sleep(self.config.poll_interval.min(deadline - now));
            }
        }
    }

    /// Walk the queued frames until one ends the transaction.
    fn take_reply(&mut self, address: DeviceAddress, expect: Expect) -> Result<Option<Response>> {
        while let Some(frame) = self.parser.next_frame() {
            if !frame.is_from(address) {
                trace!(header = frame.header(), "Skipping frame for another device");
                continue;
            }

            let response = frame.classify();
            match response {
                Response::SyntaxError => {
                    warn!(address = %address, "Camera reported a syntax error");
                    return Err(CameraError::syntax_error(address));
                }
                Response::NotExecutable => {
                    warn!(address = %address, "Camera cannot execute the command");
                    return Err(CameraError::not_executable(address));
                }
                _ if expect.accepts(&response) => return Ok(Some(response)),
                Response::Other(ref bytes) => {
                    if self.config.diagnostics {
                        warn!(address = %address, bytes = %hex(bytes), "Unrecognized reply");
                    } else {
                        trace!(address = %address, bytes = %hex(bytes), "Unrecognized reply");
                    }
                }
                _ => trace!(address = %address, reply = %response, "Skipping reply"),
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use visca_hardware::mock::{MockTransport, MockTransportHandle};
    use visca_protocol::{CommandCode, InquiryCode};

    const POWER_INQUIRY: [u8; 5] = [0x81, 0x09, 0x04, 0x00, 0xFF];

    fn engine(timeout_ms: u64) -> (TransactionEngine<MockTransport>, MockTransportHandle) {
        let (line, handle) = MockTransport::new();
        let config = SessionConfig::default()
            .with_timeout(Duration::from_millis(timeout_ms))
            .with_poll_interval(Duration::from_millis(2))
            .with_command_delay(Duration::ZERO);
        (TransactionEngine::with_config(line, config), handle)
    }

    fn camera(raw: u8) -> DeviceAddress {
        DeviceAddress::new(raw).unwrap()
    }

    fn power() -> Command {
        Command::from(InquiryCode::Power)
    }

    #[test]
    fn test_send_writes_one_frame() {
        let (mut engine, handle) = engine(50);
        engine
            .send(camera(1), &Command::from(CommandCode::PowerOn))
            .unwrap();

        assert_eq!(
            handle.written(),
            vec![vec![0x81, 0x01, 0x04, 0x00, 0x02, 0xFF]]
        );
    }

    #[test]
    fn test_inquire_skips_ack_and_completion() {
        let (mut engine, handle) = engine(200);
        handle.respond_to(
            &POWER_INQUIRY,
            [
                vec![0x90, 0x41, 0xFF],
                vec![0x90, 0x51, 0xFF],
                vec![0x90, 0x50, 0x03, 0xFF],
            ],
        );

        assert_eq!(engine.inquire(camera(1), &power()).unwrap(), vec![0x03]);
    }

    #[test]
    fn test_inquire_with_only_ack_times_out() {
        let (mut engine, handle) = engine(30);
        handle.respond_to(&POWER_INQUIRY, [vec![0x90, 0x41, 0xFF, 0x90, 0x51, 0xFF]]);

        let err = engine.inquire(camera(1), &power()).unwrap_err();
        assert!(matches!(err, CameraError::Timeout { duration_ms: 30 }));
    }

    #[test]
    fn test_timeout_honours_deadline() {
        let (mut engine, _handle) = engine(40);

        let started = Instant::now();
        let err = engine.inquire(camera(1), &power()).unwrap_err();

        assert!(err.is_timeout());
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn test_device_errors_resolve() {
        let (mut engine, handle) = engine(200);
        handle.respond_to(&POWER_INQUIRY, [vec![0x90, 0x60, 0x02, 0xFF]]);

        let err = engine.inquire(camera(1), &power()).unwrap_err();
        assert!(matches!(err, CameraError::SyntaxError { address } if address == camera(1)));

        handle.clear_responders();
        handle.respond_to(&POWER_INQUIRY, [vec![0x90, 0x61, 0x41, 0xFF]]);

        let err = engine.inquire(camera(1), &power()).unwrap_err();
        assert!(matches!(err, CameraError::NotExecutable { .. }));
    }

    #[test]
    fn test_unrecognized_reply_is_skipped() {
        let (mut engine, handle) = engine(200);
        engine.set_diagnostics(true);
        handle.respond_to(
            &POWER_INQUIRY,
            [vec![0x90, 0x7E, 0x01, 0xFF], vec![0x90, 0x50, 0x02, 0xFF]],
        );

        assert_eq!(engine.inquire(camera(1), &power()).unwrap(), vec![0x02]);
    }

    #[test]
    fn test_execute_waits_for_completion() {
        let (mut engine, handle) = engine(200);
        let home = [0x81, 0x01, 0x06, 0x04, 0xFF];
        handle.respond_to(&home, [vec![0x90, 0x41, 0xFF], vec![0x90, 0x51, 0xFF]]);

        engine
            .execute(camera(1), &Command::from(CommandCode::Home))
            .unwrap();
        assert_eq!(handle.pending_inbound(), 0);
    }

    #[test]
    fn test_transport_failure_surfaces() {
        let (mut engine, handle) = engine(50);
        handle.disconnect();

        let err = engine.inquire(camera(1), &power()).unwrap_err();
        assert!(matches!(err, CameraError::Transport(_)));
    }

    #[test]
    fn test_diagnostics_toggle() {
        let (mut engine, _handle) = engine(50);
        assert!(!engine.diagnostics());
        engine.set_diagnostics(true);
        assert!(engine.diagnostics());
        assert!(engine.config().diagnostics);
    }
}
