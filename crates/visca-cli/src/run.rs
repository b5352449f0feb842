//! Subcommand dispatch.

use anyhow::{Context, Result, anyhow, bail};
use tracing::info;
use visca_camera::Camera;
use visca_core::PanTilt;
use visca_hardware::Transport;
use visca_protocol::Command as ViscaCommand;

use crate::cli::{Command, FocusAction, PowerAction, PresetAction, ZoomAction, parse_hex_bytes};
use crate::output::Outcome;

/// Run one subcommand against an open camera.
///
/// `Command::Ports` never reaches this point; it needs no line.
pub fn run_on<T: Transport>(camera: &mut Camera<T>, command: Command) -> Result<Outcome> {
    match command {
        Command::Ports => bail!("`ports` does not talk to a camera"),

        Command::Power { action } => match action {
            PowerAction::On => done(camera.set_power(true)),
            PowerAction::Off => done(camera.set_power(false)),
            PowerAction::Status => Ok(Outcome::Power(camera.get_power()?)),
        },

        Command::Zoom(action) => done(match action {
            ZoomAction::In { speed: None } => camera.zoom_tele(),
            ZoomAction::In { speed: Some(speed) } => camera.zoom_tele_at(speed),
            ZoomAction::Out { speed: None } => camera.zoom_wide(),
            ZoomAction::Out { speed: Some(speed) } => camera.zoom_wide_at(speed),
            ZoomAction::Stop => camera.zoom_stop(),
            ZoomAction::To { fraction } => camera.zoom_to_fraction(fraction),
        }),

        Command::Focus(action) => done(match action {
            FocusAction::Near => camera.focus_near(),
            FocusAction::Far => camera.focus_far(),
            FocusAction::Stop => camera.focus_stop(),
            FocusAction::Auto => camera.set_autofocus(true),
            FocusAction::Manual => camera.set_autofocus(false),
            FocusAction::OnePush => camera.focus_one_push(),
            FocusAction::Infinity => camera.focus_infinity(),
            FocusAction::To { fraction } => camera.focus_to_fraction(fraction),
        }),

        Command::Move { direction, speed } => done(camera.move_direction(direction, speed, speed)),
        Command::Stop => done(camera.stop()),
        Command::MoveTo { pan, tilt, speed } => {
            done(camera.move_to(PanTilt { pan, tilt }, speed, speed))
        }
        Command::Home => done(camera.home()),
        Command::Reset => done(camera.reset()),
        Command::Position => Ok(Outcome::Position(camera.get_pan_tilt()?)),

        Command::Preset(action) => match action {
            PresetAction::Recall { slot } => done(camera.preset_recall(slot)),
            PresetAction::Store { slot } => done(camera.preset_store(slot)),
            PresetAction::Clear { slot } => done(camera.preset_clear(slot)),
            PresetAction::Current => Ok(Outcome::Preset(camera.get_preset()?)),
        },

        Command::Version => Ok(Outcome::Version(camera.get_version()?)),

        Command::Get { register } => Ok(Outcome::Register {
            register,
            value: camera.get_register(register)?,
        }),
        Command::Set { register, value } => done(camera.set_register(register, value)),

        Command::WhiteBalance { mode } => done(camera.set_white_balance(mode)),

        Command::Title {
            text,
            blink,
            column,
            row,
        } => done(camera.set_title(&text, column, row, blink)),
        Command::TitleClear => done(camera.clear_title()),

        Command::Raw { bytes, wait } => {
            let template = parse_hex_bytes(&bytes).map_err(|e| anyhow!(e))?;
            let command = ViscaCommand::custom(&template).context("invalid raw command")?;
            info!(command = %command, "Sending raw command");

            if command.is_inquiry() {
                Ok(Outcome::Reply(camera.inquire(&command)?))
            } else if wait {
                done(camera.execute(&command))
            } else {
                done(camera.send(&command))
            }
        }
    }
}

fn done(result: visca_camera::Result<()>) -> Result<Outcome> {
    result?;
    Ok(Outcome::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::time::Duration;
    use visca_camera::{CameraConfig, SessionConfig};
    use visca_hardware::mock::{MockTransport, MockTransportHandle};

    use crate::cli::Cli;

    fn camera() -> (Camera<MockTransport>, MockTransportHandle) {
        let (line, handle) = MockTransport::new();
        let session = SessionConfig::default()
            .with_timeout(Duration::from_millis(50))
            .with_poll_interval(Duration::from_millis(2))
            .with_command_delay(Duration::ZERO);
        (
            Camera::with_session(line, CameraConfig::default(), session),
            handle,
        )
    }

    fn command(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("visca").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_power_status() {
        let (mut camera, handle) = camera();
        handle.respond_to(&[0x81, 0x09, 0x04, 0x00, 0xFF], [vec![0x90, 0x50, 0x03, 0xFF]]);

        let outcome = run_on(&mut camera, command(&["power", "status"])).unwrap();
        assert_eq!(outcome, Outcome::Power(Some(false)));
    }

    #[test]
    fn test_move_to_writes_absolute_position() {
        let (mut camera, handle) = camera();

        let outcome = run_on(&mut camera, command(&["move-to", "0x1234", "1", "--speed", "5"]));
        assert_eq!(outcome.unwrap(), Outcome::Done);
        assert_eq!(
            handle.last_written().unwrap(),
            vec![
                0x81, 0x01, 0x06, 0x02, 0x05, 0x05, 0x01, 0x02, 0x03, 0x04, 0x00, 0x00, 0x00,
                0x01, 0xFF
            ]
        );
    }

    #[test]
    fn test_get_register() {
        let (mut camera, handle) = camera();
        handle.respond_to(
            &[0x81, 0x09, 0x04, 0x4B, 0xFF],
            [vec![0x90, 0x50, 0x00, 0x00, 0x01, 0x0F, 0xFF]],
        );

        let outcome = run_on(&mut camera, command(&["get", "iris"])).unwrap();
        assert_eq!(
            outcome,
            Outcome::Register {
                register: visca_protocol::Register::Iris,
                value: 0x1F
            }
        );
    }

    #[test]
    fn test_raw_inquiry_prints_result() {
        let (mut camera, handle) = camera();
        handle.respond_to(&[0x81, 0x09, 0x04, 0x47, 0xFF], [vec![0x90, 0x50, 0x01, 0x02, 0xFF]]);

        let outcome = run_on(&mut camera, command(&["raw", "09", "04", "47"])).unwrap();
        assert_eq!(outcome, Outcome::Reply(vec![0x01, 0x02]));
    }

    #[test]
    fn test_raw_command_is_sent_as_is() {
        let (mut camera, handle) = camera();

        run_on(&mut camera, command(&["raw", "01040002"])).unwrap();
        assert_eq!(
            handle.last_written().unwrap(),
            vec![0x81, 0x01, 0x04, 0x00, 0x02, 0xFF]
        );
    }

    #[test]
    fn test_inquiry_timeout_is_an_error() {
        let (mut camera, _handle) = camera();

        let err = run_on(&mut camera, command(&["version"])).unwrap_err();
        assert!(err.to_string().contains("No reply within 50ms"));
    }

    #[test]
    fn test_invalid_preset_writes_nothing() {
        let (mut camera, handle) = camera();

        assert!(run_on(&mut camera, command(&["preset", "recall", "200"])).is_err());
        assert!(handle.written().is_empty());
    }
}
