//! Common test utilities for camera integration tests.
//!
//! Sessions built here use short timeouts and no settling delay so the
//! whole suite runs in well under a second.

#![allow(dead_code)]

use std::time::Duration;
use visca_camera::{Camera, CameraConfig, SessionConfig, TransactionEngine};
use visca_core::DeviceAddress;
use visca_hardware::mock::{MockTransport, MockTransportHandle};
use visca_protocol::{Command, Frame};

/// Timeout used by every test session.
pub const TEST_TIMEOUT_MS: u64 = 60;

pub fn address(raw: u8) -> DeviceAddress {
    DeviceAddress::new(raw).unwrap()
}

pub fn test_session() -> SessionConfig {
    SessionConfig::default()
        .with_timeout(Duration::from_millis(TEST_TIMEOUT_MS))
        .with_poll_interval(Duration::from_millis(2))
        .with_command_delay(Duration::ZERO)
}

pub fn engine_on_mock_line() -> (TransactionEngine<MockTransport>, MockTransportHandle) {
    let (line, handle) = MockTransport::new();
    (TransactionEngine::with_config(line, test_session()), handle)
}

pub fn camera_on_mock_line(raw: u8) -> (Camera<MockTransport>, MockTransportHandle) {
    let (line, handle) = MockTransport::new();
    let camera = Camera::with_session(line, CameraConfig::new(address(raw)), test_session());
    (camera, handle)
}

/// Wire bytes the controller writes for `command` to camera `raw`.
pub fn request(raw: u8, command: impl Into<Command>) -> Vec<u8> {
    Frame::encode(address(raw), &command.into()).to_vec()
}

/// A reply packet from camera `raw` carrying `payload`.
pub fn reply(raw: u8, payload: &[u8]) -> Vec<u8> {
    let mut packet = vec![0x80 | (raw << 4)];
    packet.extend_from_slice(payload);
    packet.push(0xFF);
    packet
}

/// An inquiry reply from camera `raw` with `result` bytes after `0x50`.
pub fn inquiry_reply(raw: u8, result: &[u8]) -> Vec<u8> {
    let mut payload = vec![0x50];
    payload.extend_from_slice(result);
    reply(raw, &payload)
}
