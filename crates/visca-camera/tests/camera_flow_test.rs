//! Integration tests for camera sessions over a mock line.
//!
//! These tests drive the full path: accessor → catalog → frame codec →
//! transport → stream parser → classifier → decoder.

mod common;

use common::{
    TEST_TIMEOUT_MS, address, camera_on_mock_line, engine_on_mock_line, inquiry_reply, reply,
    request,
};
use rstest::rstest;
use std::time::{Duration, Instant};
use visca_camera::CameraError;
use visca_core::{PanTilt, VersionInfo, WhiteBalance};
use visca_protocol::{Command, CommandCode, InquiryCode, Register};

// ============================================================================
// Timeouts
// ============================================================================

#[test]
fn inquiry_on_silent_line_times_out() {
    let (mut camera, _handle) = camera_on_mock_line(1);

    let started = Instant::now();
    let err = camera.get_power().unwrap_err();

    assert!(matches!(err, CameraError::Timeout { duration_ms } if duration_ms == TEST_TIMEOUT_MS));
    assert!(started.elapsed() >= Duration::from_millis(TEST_TIMEOUT_MS));
}

#[test]
fn ack_and_completion_alone_do_not_answer_an_inquiry() {
    let (mut camera, handle) = camera_on_mock_line(1);
    handle.respond_to(
        &request(1, InquiryCode::Power),
        [reply(1, &[0x41]), reply(1, &[0x51])],
    );

    assert!(camera.get_power().unwrap_err().is_timeout());
}

// ============================================================================
// Addressing
// ============================================================================

#[test]
fn replies_from_other_cameras_are_ignored() {
    let (mut camera, handle) = camera_on_mock_line(1);
    handle.respond_to(
        &request(1, InquiryCode::Power),
        [inquiry_reply(2, &[0x03]), inquiry_reply(1, &[0x02])],
    );

    assert_eq!(camera.get_power().unwrap(), Some(true));
}

#[test]
fn reply_for_another_camera_only_times_out() {
    let (mut camera, handle) = camera_on_mock_line(1);
    handle.respond_to(&request(1, InquiryCode::Power), [inquiry_reply(2, &[0x02])]);

    assert!(camera.get_power().unwrap_err().is_timeout());
}

#[test]
fn one_engine_serves_several_cameras() {
    let (mut engine, handle) = engine_on_mock_line();
    handle.respond_to(
        &request(1, InquiryCode::Preset),
        [inquiry_reply(3, &[0x09]), inquiry_reply(1, &[0x01])],
    );
    handle.respond_to(
        &request(3, InquiryCode::Preset),
        [inquiry_reply(1, &[0x01]), inquiry_reply(3, &[0x09])],
    );

    let preset = Command::from(InquiryCode::Preset);
    assert_eq!(engine.inquire(address(1), &preset).unwrap(), vec![0x01]);
    assert_eq!(engine.inquire(address(3), &preset).unwrap(), vec![0x09]);
}

// ============================================================================
// Decoding
// ============================================================================

#[rstest]
#[case(0x02, Some(true))]
#[case(0x03, Some(false))]
#[case(0x00, None)]
#[case(0x7F, None)]
fn power_reply_decodes_to_tri_state(#[case] byte: u8, #[case] expected: Option<bool>) {
    let (mut camera, handle) = camera_on_mock_line(1);
    handle.respond_to(&request(1, InquiryCode::Power), [inquiry_reply(1, &[byte])]);

    assert_eq!(camera.get_power().unwrap(), expected);
}

#[rstest]
#[case(0x01, Some(true))]
#[case(0x00, Some(false))]
#[case(0x02, None)]
fn pan_reverse_reply_decodes(#[case] byte: u8, #[case] expected: Option<bool>) {
    let (mut camera, handle) = camera_on_mock_line(1);
    handle.respond_to(&request(1, InquiryCode::PanReverse), [inquiry_reply(1, &[byte])]);

    assert_eq!(camera.get_pan_reverse().unwrap(), expected);
}

#[test]
fn wide_mode_is_on_only_for_02() {
    let (mut camera, handle) = camera_on_mock_line(1);
    handle.respond_to(&request(1, InquiryCode::WideMode), [inquiry_reply(1, &[0x03])]);
    assert!(!camera.get_wide_mode().unwrap());

    handle.clear_responders();
    handle.respond_to(&request(1, InquiryCode::WideMode), [inquiry_reply(1, &[0x02])]);
    assert!(camera.get_wide_mode().unwrap());
}

#[test]
fn enumerations_decode_known_and_unknown_codes() {
    let (mut camera, handle) = camera_on_mock_line(1);
    handle.respond_to(&request(1, InquiryCode::WhiteBalance), [inquiry_reply(1, &[0x05])]);
    assert_eq!(camera.get_white_balance().unwrap(), Some(WhiteBalance::Manual));

    handle.clear_responders();
    handle.respond_to(&request(1, InquiryCode::WhiteBalance), [inquiry_reply(1, &[0x09])]);
    assert_eq!(camera.get_white_balance().unwrap(), None);
}

#[test]
fn register_reply_decodes_two_nibbles() {
    let (mut camera, handle) = camera_on_mock_line(1);
    handle.respond_to(
        &request(1, Command::register_inquiry(Register::RedGain)),
        [inquiry_reply(1, &[0x00, 0x00, 0x03, 0x0C])],
    );

    assert_eq!(camera.get_red_gain().unwrap(), 0x3C);
}

#[test]
fn short_register_reply_is_malformed() {
    let (mut camera, handle) = camera_on_mock_line(1);
    handle.respond_to(
        &request(1, Command::register_inquiry(Register::Gain)),
        [inquiry_reply(1, &[0x00, 0x00])],
    );

    let err = camera.get_gain().unwrap_err();
    assert!(matches!(
        err,
        CameraError::Protocol(visca_core::Error::MalformedReply { .. })
    ));
}

#[test]
fn pan_tilt_round_trip() {
    let (mut camera, handle) = camera_on_mock_line(1);
    let target = PanTilt {
        pan: 0x1234,
        tilt: 0x0001,
    };

    camera.move_to(target, 0x07, 0x07).unwrap();
    let written = handle.last_written().unwrap();
    assert_eq!(
        written,
        vec![
            0x81, 0x01, 0x06, 0x02, 0x07, 0x07, 0x01, 0x02, 0x03, 0x04, 0x00, 0x00, 0x00, 0x01,
            0xFF
        ]
    );

    // The camera reports back the nibbles it was sent
    handle.respond_to(
        &request(1, InquiryCode::PanTilt),
        [inquiry_reply(1, &written[6..14])],
    );
    assert_eq!(camera.get_pan_tilt().unwrap(), target);
}

#[test]
fn version_and_preset_decode() {
    let (mut camera, handle) = camera_on_mock_line(2);
    handle.respond_to(
        &request(2, InquiryCode::Version),
        [inquiry_reply(2, &[0x00, 0x20, 0x04, 0x63, 0x01, 0x10, 0x02])],
    );
    handle.respond_to(&request(2, InquiryCode::Preset), [inquiry_reply(2, &[0x07])]);

    assert_eq!(
        camera.get_version().unwrap(),
        VersionInfo {
            vendor: 0x20,
            model: 0xA3,
            rom: 0x20,
            sockets: 2,
        }
    );
    assert_eq!(camera.get_preset().unwrap(), 7);
}

// ============================================================================
// Line behaviour
// ============================================================================

#[test]
fn reply_split_across_reads_is_reassembled() {
    let (mut camera, handle) = camera_on_mock_line(1);
    handle.respond_to(
        &request(1, Command::register_inquiry(Register::Iris)),
        [vec![0x90, 0x50], vec![0x00, 0x00, 0x01], vec![0x0F, 0xFF]],
    );

    assert_eq!(camera.get_iris().unwrap(), 0x1F);
}

#[test]
fn oversized_packet_tail_does_not_answer_an_inquiry() {
    let (mut camera, handle) = camera_on_mock_line(1);

    // A garbled packet whose tail looks like a power reply from camera 1
    let mut garbled = vec![0x90];
    garbled.extend(std::iter::repeat_n(0x01, 15));
    garbled.extend([0x90, 0x50, 0x02, 0xFF]);
    handle.respond_to(
        &request(1, InquiryCode::Power),
        [garbled, inquiry_reply(1, &[0x03])],
    );

    assert_eq!(camera.get_power().unwrap(), Some(false));
}

#[test]
fn stale_input_is_discarded_before_a_request() {
    let (mut camera, handle) = camera_on_mock_line(1);

    // Left over from an earlier, abandoned inquiry
    handle.push_chunks([inquiry_reply(1, &[0x03]), vec![0x90, 0x50]]);
    handle.respond_to(&request(1, InquiryCode::Power), [inquiry_reply(1, &[0x02])]);

    assert_eq!(camera.get_power().unwrap(), Some(true));
}

#[test]
fn device_errors_surface() {
    let (mut camera, handle) = camera_on_mock_line(1);
    handle.respond_to(&request(1, InquiryCode::Tally), [reply(1, &[0x60, 0x02])]);
    handle.respond_to(&request(1, InquiryCode::Autofocus), [reply(1, &[0x61, 0x41])]);

    assert!(matches!(
        camera.get_tally().unwrap_err(),
        CameraError::SyntaxError { .. }
    ));
    assert!(matches!(
        camera.get_autofocus().unwrap_err(),
        CameraError::NotExecutable { .. }
    ));
}

#[test]
fn execute_returns_on_completion() {
    let (mut camera, handle) = camera_on_mock_line(1);
    handle.respond_to(
        &request(1, CommandCode::Home),
        [reply(1, &[0x41]), reply(1, &[0x51])],
    );

    camera.execute(&Command::from(CommandCode::Home)).unwrap();
}

// ============================================================================
// Setters
// ============================================================================

#[test]
fn one_push_white_balance_sends_mode_then_trigger() {
    let (mut camera, handle) = camera_on_mock_line(1);
    camera.set_white_balance(WhiteBalance::OnePush).unwrap();

    assert_eq!(
        handle.written(),
        vec![
            vec![0x81, 0x01, 0x04, 0x35, 0x03, 0xFF],
            vec![0x81, 0x01, 0x04, 0x10, 0x05, 0xFF],
        ]
    );
}

#[test]
fn other_white_balance_modes_send_one_frame() {
    let (mut camera, handle) = camera_on_mock_line(1);
    camera.set_white_balance(WhiteBalance::Indoor).unwrap();

    assert_eq!(handle.written(), vec![vec![0x81, 0x01, 0x04, 0x35, 0x01, 0xFF]]);
}

#[test]
fn setters_do_not_wait_for_replies() {
    let (mut camera, handle) = camera_on_mock_line(1);

    let started = Instant::now();
    camera.set_power(true).unwrap();
    camera.preset_store(3).unwrap();
    camera.set_tally(false).unwrap();

    assert!(started.elapsed() < Duration::from_millis(TEST_TIMEOUT_MS));
    assert_eq!(handle.written().len(), 3);
}

#[test]
fn invalid_parameters_are_rejected_before_writing() {
    let (mut camera, handle) = camera_on_mock_line(1);

    assert!(camera.preset_recall(0x80).is_err());
    assert!(camera.zoom_tele_at(8).is_err());
    assert!(camera.zoom_to(0x4001).is_err());
    assert!(camera.zoom_to_fraction(1.5).is_err());
    assert!(camera.set_red_gain(0x100).is_err());
    assert!(
        camera
            .move_direction(visca_core::Direction::Left, 0x19, 0x01)
            .is_err()
    );

    assert!(handle.written().is_empty());
}

#[test]
fn disconnected_line_is_a_transport_error() {
    let (mut camera, handle) = camera_on_mock_line(1);
    handle.disconnect();

    assert!(matches!(
        camera.set_power(true).unwrap_err(),
        CameraError::Transport(_)
    ));
}
