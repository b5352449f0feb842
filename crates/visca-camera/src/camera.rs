//! Typed camera control.
//!
//! [`Camera`] wraps a [`TransactionEngine`] and one camera's settings. It
//! turns each queryable register into a `get_*`/`set_*` pair: getters send
//! the register's inquiry and decode the reply, setters only write.
//!
//! ```
//! use visca_camera::{Camera, CameraConfig, SessionConfig};
//! use visca_hardware::mock::MockTransport;
//! use std::time::Duration;
//!
//! let (line, handle) = MockTransport::new();
//! handle.respond_to(&[0x81, 0x09, 0x04, 0x00, 0xFF], [vec![0x90, 0x50, 0x02, 0xFF]]);
//!
//! let session = SessionConfig::default().with_command_delay(Duration::ZERO);
//! let mut camera = Camera::with_session(line, CameraConfig::default(), session);
//!
//! assert_eq!(camera.get_power().unwrap(), Some(true));
//! camera.set_power(false).unwrap();
//! assert_eq!(handle.last_written().unwrap(), vec![0x81, 0x01, 0x04, 0x00, 0x03, 0xFF]);
//! ```

use tracing::debug;
use visca_core::{
    AutoExposure, DeviceAddress, Direction, Error, PanTilt, PictureEffect, VersionInfo,
    WhiteBalance,
    constants::{MAX_LENS_POSITION, TITLE_LINE_LENGTH, TITLE_LINES},
};
use visca_hardware::Transport;
use visca_protocol::{Adjust, Command, CommandCode, InquiryCode, Register, map_range};

use crate::config::{CameraConfig, SessionConfig};
use crate::decode;
use crate::engine::TransactionEngine;
use crate::error::Result;

/// Pick one of two fixed commands by a boolean.
fn toggle(on: bool, when_on: CommandCode, when_off: CommandCode) -> Command {
    Command::from(if on { when_on } else { when_off })
}

/// Map a 0.0-1.0 fraction onto the lens range, truncating toward wide.
fn lens_position(fraction: f64, what: &str) -> visca_core::Result<u32> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(Error::invalid_parameter(format!(
            "{what} fraction must be 0.0-1.0, got {fraction}"
        )));
    }
    let position = map_range(fraction, 0.0, 1.0, 0.0, f64::from(MAX_LENS_POSITION));
    Ok(position.trunc() as u32)
}

macro_rules! register_accessors {
    ($($register:ident => $get:ident, $set:ident;)+) => {
        $(
            #[doc = concat!("Current value of the `", stringify!($register), "` register.")]
            pub fn $get(&mut self) -> Result<u32> {
                self.get_register(Register::$register)
            }

            #[doc = concat!("Set the `", stringify!($register), "` register (0-0xFF).")]
            pub fn $set(&mut self, value: u32) -> Result<()> {
                self.set_register(Register::$register, value)
            }
        )+
    };
}

/// One camera on a VISCA line
#[derive(Debug)]
pub struct Camera<T: Transport> {
    engine: TransactionEngine<T>,
    config: CameraConfig,
}

impl<T: Transport> Camera<T> {
    /// Create a camera with default session timing.
    pub fn new(transport: T, config: CameraConfig) -> Self {
        Self::with_engine(TransactionEngine::new(transport), config)
    }

    pub fn with_session(transport: T, config: CameraConfig, session: SessionConfig) -> Self {
        Self::with_engine(TransactionEngine::with_config(transport, session), config)
    }

    pub fn with_engine(engine: TransactionEngine<T>, config: CameraConfig) -> Self {
        Self { engine, config }
    }

    pub fn address(&self) -> DeviceAddress {
        self.config.address
    }

    /// Point this handle at another camera on the same line.
    pub fn set_address(&mut self, address: DeviceAddress) {
        self.config.address = address;
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn engine(&self) -> &TransactionEngine<T> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TransactionEngine<T> {
        &mut self.engine
    }

    /// Give the engine back.
    pub fn into_engine(self) -> TransactionEngine<T> {
        self.engine
    }

    pub fn set_diagnostics(&mut self, diagnostics: bool) {
        self.engine.set_diagnostics(diagnostics);
    }

    // ------------------------------------------------------------------------
    // Raw access
    // ------------------------------------------------------------------------

    /// Write a command without waiting.
    pub fn send(&mut self, command: &Command) -> Result<()> {
        self.engine.send(self.config.address, command)
    }

    /// Send an inquiry and return its result bytes.
    pub fn inquire(&mut self, command: &Command) -> Result<Vec<u8>> {
        self.engine.inquire(self.config.address, command)
    }

    /// Send a command and wait for completion.
    pub fn execute(&mut self, command: &Command) -> Result<()> {
        self.engine.execute(self.config.address, command)
    }

    fn send_code(&mut self, code: CommandCode) -> Result<()> {
        self.send(&Command::from(code))
    }

    fn inquire_code(&mut self, code: InquiryCode) -> Result<Vec<u8>> {
        self.inquire(&Command::from(code))
    }

    // ------------------------------------------------------------------------
    // On/off registers
    // ------------------------------------------------------------------------

    /// Power state; `None` when the reply is neither on nor off.
    pub fn get_power(&mut self) -> Result<Option<bool>> {
        Ok(decode::on_off(&self.inquire_code(InquiryCode::Power)?))
    }

    pub fn set_power(&mut self, on: bool) -> Result<()> {
        self.send(&toggle(on, CommandCode::PowerOn, CommandCode::PowerOff))
    }

    pub fn get_autofocus(&mut self) -> Result<Option<bool>> {
        Ok(decode::on_off(&self.inquire_code(InquiryCode::Autofocus)?))
    }

    pub fn set_autofocus(&mut self, on: bool) -> Result<()> {
        self.send(&toggle(on, CommandCode::AutofocusOn, CommandCode::AutofocusOff))
    }

    pub fn get_image_flip(&mut self) -> Result<Option<bool>> {
        Ok(decode::on_off(&self.inquire_code(InquiryCode::ImageFlip)?))
    }

    pub fn set_image_flip(&mut self, on: bool) -> Result<()> {
        self.send(&toggle(on, CommandCode::FlipOn, CommandCode::FlipOff))
    }

    pub fn get_tally(&mut self) -> Result<Option<bool>> {
        Ok(decode::on_off(&self.inquire_code(InquiryCode::Tally)?))
    }

    pub fn set_tally(&mut self, on: bool) -> Result<()> {
        self.send(&toggle(on, CommandCode::TallyOn, CommandCode::TallyOff))
    }

    pub fn get_pan_reverse(&mut self) -> Result<Option<bool>> {
        Ok(decode::reversed(&self.inquire_code(InquiryCode::PanReverse)?))
    }

    pub fn set_pan_reverse(&mut self, reversed: bool) -> Result<()> {
        self.send(&toggle(
            reversed,
            CommandCode::PanReverseOn,
            CommandCode::PanReverseOff,
        ))
    }

    pub fn get_tilt_reverse(&mut self) -> Result<Option<bool>> {
        Ok(decode::reversed(&self.inquire_code(InquiryCode::TiltReverse)?))
    }

    pub fn set_tilt_reverse(&mut self, reversed: bool) -> Result<()> {
        self.send(&toggle(
            reversed,
            CommandCode::TiltReverseOn,
            CommandCode::TiltReverseOff,
        ))
    }

    pub fn get_wide_mode(&mut self) -> Result<bool> {
        Ok(decode::flag(&self.inquire_code(InquiryCode::WideMode)?))
    }

    pub fn set_wide_mode(&mut self, on: bool) -> Result<()> {
        self.send(&toggle(on, CommandCode::WideOn, CommandCode::WideOff))
    }

    pub fn get_backlight(&mut self) -> Result<bool> {
        Ok(decode::flag(&self.inquire_code(InquiryCode::Backlight)?))
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<()> {
        self.send(&toggle(on, CommandCode::BacklightOn, CommandCode::BacklightOff))
    }

    // Write-only

    pub fn set_image_reverse(&mut self, on: bool) -> Result<()> {
        self.send(&toggle(on, CommandCode::ReverseOn, CommandCode::ReverseOff))
    }

    pub fn set_freeze(&mut self, on: bool) -> Result<()> {
        self.send(&toggle(on, CommandCode::FreezeOn, CommandCode::FreezeOff))
    }

    pub fn set_preset_freeze(&mut self, on: bool) -> Result<()> {
        self.send(&toggle(
            on,
            CommandCode::PresetFreezeOn,
            CommandCode::PresetFreezeOff,
        ))
    }

    // ------------------------------------------------------------------------
    // Modes
    // ------------------------------------------------------------------------

    pub fn get_white_balance(&mut self) -> Result<Option<WhiteBalance>> {
        let result = self.inquire_code(InquiryCode::WhiteBalance)?;
        Ok(decode::mode_byte(&result).and_then(WhiteBalance::from_u8))
    }

    /// Set the white balance mode.
    ///
    /// [`WhiteBalance::OnePush`] also sends the one-push trigger once the
    /// settling delay after the mode change has passed.
    pub fn set_white_balance(&mut self, mode: WhiteBalance) -> Result<()> {
        self.send(&Command::white_balance(mode))?;
        if mode == WhiteBalance::OnePush {
            debug!(address = %self.config.address, "Triggering one-push white balance");
            self.send_code(CommandCode::WhiteBalanceTrigger)?;
        }
        Ok(())
    }

    /// Re-run the one-push white balance calibration.
    pub fn white_balance_trigger(&mut self) -> Result<()> {
        self.send_code(CommandCode::WhiteBalanceTrigger)
    }

    pub fn get_auto_exposure(&mut self) -> Result<Option<AutoExposure>> {
        let result = self.inquire_code(InquiryCode::AutoExposure)?;
        Ok(decode::mode_byte(&result).and_then(AutoExposure::from_u8))
    }

    pub fn set_auto_exposure(&mut self, mode: AutoExposure) -> Result<()> {
        self.send(&Command::auto_exposure(mode))
    }

    pub fn get_picture_effect(&mut self) -> Result<Option<PictureEffect>> {
        let result = self.inquire_code(InquiryCode::PictureEffect)?;
        Ok(decode::mode_byte(&result).and_then(PictureEffect::from_u8))
    }

    pub fn set_picture_effect(&mut self, effect: PictureEffect) -> Result<()> {
        self.send(&Command::picture_effect(effect))
    }

    /// Select the video output format (model-specific code).
    pub fn set_video_system(&mut self, system: u8) -> Result<()> {
        self.send(&Command::video_system(system)?)
    }

    // ------------------------------------------------------------------------
    // Exposure and colour registers
    // ------------------------------------------------------------------------

    /// Current value of `register`.
    ///
    /// # Errors
    ///
    /// Returns a malformed-reply error if the reply carries fewer than four
    /// result bytes.
    pub fn get_register(&mut self, register: Register) -> Result<u32> {
        decode::register(&self.inquire(&Command::register_inquiry(register))?)
    }

    /// Set `register` directly.
    pub fn set_register(&mut self, register: Register, value: u32) -> Result<()> {
        self.send(&Command::register_direct(register, value)?)
    }

    /// Reset, raise or lower `register` by one step.
    pub fn adjust_register(&mut self, register: Register, adjust: Adjust) -> Result<()> {
        self.send(&Command::register_adjust(register, adjust))
    }

    register_accessors! {
        RedGain => get_red_gain, set_red_gain;
        BlueGain => get_blue_gain, set_blue_gain;
        Shutter => get_shutter, set_shutter;
        Iris => get_iris, set_iris;
        Gain => get_gain, set_gain;
        Brightness => get_brightness, set_brightness;
        ExposureCompensation => get_exposure_compensation, set_exposure_compensation;
        Aperture => get_aperture, set_aperture;
    }

    // ------------------------------------------------------------------------
    // Zoom and focus
    // ------------------------------------------------------------------------

    pub fn zoom_tele(&mut self) -> Result<()> {
        self.send_code(CommandCode::ZoomTele)
    }

    pub fn zoom_wide(&mut self) -> Result<()> {
        self.send_code(CommandCode::ZoomWide)
    }

    pub fn zoom_stop(&mut self) -> Result<()> {
        self.send_code(CommandCode::ZoomStop)
    }

    /// Zoom toward tele at `speed` (0-7).
    pub fn zoom_tele_at(&mut self, speed: u8) -> Result<()> {
        self.send(&Command::zoom_tele_variable(speed)?)
    }

    /// Zoom toward wide at `speed` (0-7).
    pub fn zoom_wide_at(&mut self, speed: u8) -> Result<()> {
        self.send(&Command::zoom_wide_variable(speed)?)
    }

    /// Move the zoom lens to an absolute position (0-0x4000).
    pub fn zoom_to(&mut self, position: u32) -> Result<()> {
        self.send(&Command::zoom_direct(position)?)
    }

    /// Move the zoom lens to a fraction of its range (0.0 wide, 1.0 tele).
    pub fn zoom_to_fraction(&mut self, fraction: f64) -> Result<()> {
        let position = lens_position(fraction, "zoom")?;
        self.zoom_to(position)
    }

    pub fn focus_far(&mut self) -> Result<()> {
        self.send_code(CommandCode::FocusFar)
    }

    pub fn focus_near(&mut self) -> Result<()> {
        self.send_code(CommandCode::FocusNear)
    }

    pub fn focus_stop(&mut self) -> Result<()> {
        self.send_code(CommandCode::FocusStop)
    }

    pub fn focus_infinity(&mut self) -> Result<()> {
        self.send_code(CommandCode::FocusInfinity)
    }

    /// Run a single autofocus pass.
    pub fn focus_one_push(&mut self) -> Result<()> {
        self.send_code(CommandCode::FocusOnePush)
    }

    /// Move the focus lens to an absolute position (0-0x4000).
    pub fn focus_to(&mut self, position: u32) -> Result<()> {
        self.send(&Command::focus_direct(position)?)
    }

    /// Move the focus lens to a fraction of its range.
    pub fn focus_to_fraction(&mut self, fraction: f64) -> Result<()> {
        let position = lens_position(fraction, "focus")?;
        self.focus_to(position)
    }

    /// Move both lenses in one command.
    pub fn zoom_focus_to(&mut self, zoom: u32, focus: u32) -> Result<()> {
        self.send(&Command::zoom_focus_direct(zoom, focus)?)
    }

    // ------------------------------------------------------------------------
    // Pan / tilt
    // ------------------------------------------------------------------------

    /// Start moving in `direction`; the head keeps going until stopped.
    pub fn move_direction(
        &mut self,
        direction: Direction,
        pan_speed: u8,
        tilt_speed: u8,
    ) -> Result<()> {
        self.send(&Command::pan_tilt_drive(direction, pan_speed, tilt_speed)?)
    }

    pub fn stop(&mut self) -> Result<()> {
        self.send_code(CommandCode::MoveStop)
    }

    pub fn home(&mut self) -> Result<()> {
        self.send_code(CommandCode::Home)
    }

    pub fn reset(&mut self) -> Result<()> {
        self.send_code(CommandCode::Reset)
    }

    /// Move to an absolute position using the configured position widths.
    pub fn move_to(&mut self, position: PanTilt, pan_speed: u8, tilt_speed: u8) -> Result<()> {
        let command = Command::pan_tilt_absolute(
            pan_speed,
            tilt_speed,
            position.pan,
            position.tilt,
            self.config.pan_nibbles,
            self.config.tilt_nibbles,
        )?;
        self.send(&command)
    }

    pub fn get_pan_tilt(&mut self) -> Result<PanTilt> {
        let result = self.inquire_code(InquiryCode::PanTilt)?;
        decode::pan_tilt(&result, self.config.pan_nibbles, self.config.tilt_nibbles)
    }

    pub fn mount_up(&mut self) -> Result<()> {
        self.send_code(CommandCode::MountUp)
    }

    pub fn mount_down(&mut self) -> Result<()> {
        self.send_code(CommandCode::MountDown)
    }

    // ------------------------------------------------------------------------
    // Presets
    // ------------------------------------------------------------------------

    pub fn get_preset(&mut self) -> Result<u8> {
        decode::preset(&self.inquire_code(InquiryCode::Preset)?)
    }

    pub fn preset_recall(&mut self, slot: u8) -> Result<()> {
        self.send(&Command::preset_recall(slot)?)
    }

    pub fn preset_store(&mut self, slot: u8) -> Result<()> {
        self.send(&Command::preset_store(slot)?)
    }

    pub fn preset_clear(&mut self, slot: u8) -> Result<()> {
        self.send(&Command::preset_clear(slot)?)
    }

    // ------------------------------------------------------------------------
    // Identification
    // ------------------------------------------------------------------------

    pub fn get_version(&mut self) -> Result<VersionInfo> {
        decode::version(&self.inquire_code(InquiryCode::Version)?)
    }

    // ------------------------------------------------------------------------
    // Menu
    // ------------------------------------------------------------------------

    pub fn menu_show(&mut self) -> Result<()> {
        self.send_code(CommandCode::MenuShow)
    }

    pub fn menu_hide(&mut self) -> Result<()> {
        self.send_code(CommandCode::MenuHide)
    }

    pub fn menu_back(&mut self) -> Result<()> {
        self.send_code(CommandCode::MenuBack)
    }

    pub fn menu_ok(&mut self) -> Result<()> {
        self.send_code(CommandCode::MenuOk)
    }

    /// Cancel the command running in the camera's socket.
    pub fn cancel(&mut self) -> Result<()> {
        self.send_code(CommandCode::Cancel)
    }

    // ------------------------------------------------------------------------
    // Title overlay
    // ------------------------------------------------------------------------

    /// Show `text` as the title overlay.
    ///
    /// Up to 20 ASCII characters: the first ten go on line one, the rest on
    /// line two. The sequence is clear, position/blink, both lines, then on.
    ///
    /// # Errors
    ///
    /// Rejects non-ASCII or over-long text before anything is written.
    pub fn set_title(
        &mut self,
        text: &str,
        h_position: u8,
        v_position: u8,
        blink: bool,
    ) -> Result<()> {
        if !text.is_ascii() {
            return Err(Error::invalid_parameter("Title text must be ASCII").into());
        }
        let max = TITLE_LINE_LENGTH * TITLE_LINES;
        if text.len() > max {
            return Err(Error::invalid_parameter(format!(
                "Title must be at most {max} characters, got {}",
                text.len()
            ))
            .into());
        }

        let (first, second) = text.split_at(text.len().min(TITLE_LINE_LENGTH));
        let commands = [
            Command::from(CommandCode::TitleClear),
            Command::title_parameters(h_position, v_position, blink)?,
            Command::title_line(0, first)?,
            Command::title_line(1, second)?,
            Command::from(CommandCode::TitleOn),
        ];

        for command in &commands {
            self.send(command)?;
        }
        Ok(())
    }

    pub fn clear_title(&mut self) -> Result<()> {
        self.send_code(CommandCode::TitleClear)
    }
}
