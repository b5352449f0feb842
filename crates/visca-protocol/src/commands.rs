//! Command and inquiry catalog for the VISCA protocol.
//!
//! This module holds every byte template the library can put on the wire.
//! Templates never include the header byte; [`Frame::encode`](crate::Frame::encode)
//! adds it when the command is sent. Every template ends with the `0xFF`
//! terminator.
//!
//! # Catalog Layout
//!
//! The catalog has three parts:
//!
//! - [`CommandCode`]: fixed actuator commands (`01 ..`), looked up by name
//! - [`InquiryCode`]: fixed register inquiries (`09 ..`), looked up by name
//! - [`Command`] builders: templates with holes filled at call time
//!   (speeds, preset slots, nibble-packed positions and register values)
//!
//! Exposure and colour registers share one shape, so they are described once
//! by [`Register`] and expanded into reset/up/down/direct/inquiry templates.
//!
//! # Wire Format Examples
//!
//! ```text
//! 01 04 00 02 FF                 Power on
//! 01 04 07 2p FF                 Zoom tele, speed p (0-7)
//! 01 06 01 VV WW 01 03 FF        Pan left, pan speed VV, tilt speed WW
//! 01 04 47 0p 0q 0r 0s FF        Zoom direct, position pqrs
//! 09 04 00 FF                    Power inquiry
//! ```
//!
//! # Usage Examples
//!
//! ```
//! use visca_protocol::{Command, CommandCode, InquiryCode, Register};
//!
//! // Fixed templates by name
//! let cmd = CommandCode::parse("power-on").unwrap();
//! assert_eq!(cmd.template(), &[0x01, 0x04, 0x00, 0x02, 0xFF]);
//! assert_eq!(InquiryCode::Power.template(), &[0x09, 0x04, 0x00, 0xFF]);
//!
//! // Parameterized templates
//! let zoom = Command::zoom_tele_variable(3).unwrap();
//! assert_eq!(zoom.as_bytes(), &[0x01, 0x04, 0x07, 0x23, 0xFF]);
//!
//! let gain = Command::register_direct(Register::RedGain, 0x3C).unwrap();
//! assert_eq!(gain.as_bytes(), &[0x01, 0x04, 0x43, 0x00, 0x00, 0x03, 0x0C, 0xFF]);
//!
//! // Out-of-range parameters are refused
//! assert!(Command::zoom_tele_variable(8).is_err());
//! ```
//!
//! The tables are `'static` data: immutable and shareable between any number
//! of sessions without synchronization.

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::fmt;
use visca_core::{
    AutoExposure, Direction, Error, PictureEffect, Result, WhiteBalance,
    constants::{
        LENS_POSITION_NIBBLES, MAX_LENS_POSITION, MAX_PACKET_LENGTH, MAX_PAN_TILT_SPEED,
        MAX_POSITION_NIBBLES, MAX_PRESET_SLOT, MAX_ZOOM_SPEED, REGISTER_NIBBLES, TERMINATOR,
        TITLE_LINE_LENGTH, TITLE_LINES,
    },
};

use crate::frame::hex;
use crate::nibble::{split_nibbles, try_split_nibbles};

/// First payload byte of an inquiry.
pub const CATEGORY_INQUIRY: u8 = 0x09;

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident => $wire:literal, [$($byte:literal),+ $(,)?] ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        $vis enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Every entry of the table, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Byte template, terminator included, header excluded.
            #[must_use]
            pub const fn template(self) -> &'static [u8] {
                match self {
                    $( $name::$variant => &[$($byte),+] ),+
                }
            }

            /// Stable name used for lookup and logging.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }

            /// Look up an entry by name.
            ///
            /// # Errors
            /// Returns `Error::InvalidParameter` for names not in the table.
            pub fn parse(name: &str) -> Result<Self> {
                match name.trim() {
                    $( $wire => Ok($name::$variant), )+
                    _ => Err(Error::invalid_parameter(format!(
                        concat!("Unknown ", stringify!($name), ": {}"),
                        name
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                $name::parse(s)
            }
        }

        impl From<$name> for Command {
            fn from(code: $name) -> Self {
                Command::from_static(code.template())
            }
        }
    };
}

catalog! {
    /// Fixed actuator commands.
    pub enum CommandCode {
        PowerOn => "power-on", [0x01, 0x04, 0x00, 0x02, 0xFF],
        PowerOff => "power-off", [0x01, 0x04, 0x00, 0x03, 0xFF],
        Cancel => "cancel", [0x21, 0xFF],

        ZoomTele => "zoom-tele", [0x01, 0x04, 0x07, 0x02, 0xFF],
        ZoomWide => "zoom-wide", [0x01, 0x04, 0x07, 0x03, 0xFF],
        ZoomStop => "zoom-stop", [0x01, 0x04, 0x07, 0x00, 0xFF],

        FocusStop => "focus-stop", [0x01, 0x04, 0x08, 0x00, 0xFF],
        FocusFar => "focus-far", [0x01, 0x04, 0x08, 0x02, 0xFF],
        FocusNear => "focus-near", [0x01, 0x04, 0x08, 0x03, 0xFF],
        FocusInfinity => "focus-infinity", [0x01, 0x04, 0x18, 0x02, 0xFF],
        FocusOnePush => "focus-one-push", [0x01, 0x04, 0x18, 0x01, 0xFF],
        AutofocusOn => "autofocus-on", [0x01, 0x04, 0x38, 0x02, 0xFF],
        AutofocusOff => "autofocus-off", [0x01, 0x04, 0x38, 0x03, 0xFF],

        MoveStop => "move-stop", [0x01, 0x06, 0x01, 0x01, 0x01, 0x03, 0x03, 0xFF],
        Home => "home", [0x01, 0x06, 0x04, 0xFF],
        Reset => "reset", [0x01, 0x06, 0x05, 0xFF],

        MountUp => "mount-up", [0x01, 0x04, 0xA4, 0x02, 0xFF],
        MountDown => "mount-down", [0x01, 0x04, 0xA4, 0x04, 0xFF],
        FlipOn => "flip-on", [0x01, 0x04, 0x66, 0x02, 0xFF],
        FlipOff => "flip-off", [0x01, 0x04, 0x66, 0x03, 0xFF],
        ReverseOn => "reverse-on", [0x01, 0x04, 0x61, 0x02, 0xFF],
        ReverseOff => "reverse-off", [0x01, 0x04, 0x61, 0x03, 0xFF],
        FreezeOn => "freeze-on", [0x01, 0x04, 0x62, 0x02, 0xFF],
        FreezeOff => "freeze-off", [0x01, 0x04, 0x62, 0x03, 0xFF],
        PresetFreezeOn => "preset-freeze-on", [0x01, 0x04, 0x62, 0x22, 0xFF],
        PresetFreezeOff => "preset-freeze-off", [0x01, 0x04, 0x62, 0x23, 0xFF],
        WideOn => "wide-on", [0x01, 0x04, 0x60, 0x02, 0xFF],
        WideOff => "wide-off", [0x01, 0x04, 0x60, 0x00, 0xFF],
        BacklightOn => "backlight-on", [0x01, 0x04, 0x33, 0x02, 0xFF],
        BacklightOff => "backlight-off", [0x01, 0x04, 0x33, 0x03, 0xFF],

        WhiteBalanceTrigger => "white-balance-trigger", [0x01, 0x04, 0x10, 0x05, 0xFF],

        TallyOn => "tally-on", [0x01, 0x7E, 0x01, 0x0A, 0x00, 0x02, 0xFF],
        TallyOff => "tally-off", [0x01, 0x7E, 0x01, 0x0A, 0x00, 0x03, 0xFF],

        MenuShow => "menu-show", [0x01, 0x06, 0x06, 0x02, 0xFF],
        MenuHide => "menu-hide", [0x01, 0x06, 0x06, 0x03, 0xFF],
        MenuBack => "menu-back", [0x01, 0x06, 0x06, 0x10, 0xFF],
        MenuOk => "menu-ok", [0x01, 0x7E, 0x01, 0x02, 0x00, 0x01, 0xFF],

        PanReverseOn => "pan-reverse-on", [0x01, 0x7E, 0x01, 0x06, 0x00, 0x01, 0xFF],
        PanReverseOff => "pan-reverse-off", [0x01, 0x7E, 0x01, 0x06, 0x00, 0x00, 0xFF],
        TiltReverseOn => "tilt-reverse-on", [0x01, 0x7E, 0x01, 0x09, 0x00, 0x01, 0xFF],
        TiltReverseOff => "tilt-reverse-off", [0x01, 0x7E, 0x01, 0x09, 0x00, 0x00, 0xFF],

        TitleClear => "title-clear", [0x01, 0x7E, 0x01, 0x13, 0x00, 0xFF],
        TitleOn => "title-on", [0x01, 0x7E, 0x01, 0x13, 0x02, 0xFF],
    }
}

catalog! {
    /// Fixed register inquiries.
    pub enum InquiryCode {
        Power => "power", [0x09, 0x04, 0x00, 0xFF],
        Autofocus => "autofocus", [0x09, 0x04, 0x38, 0xFF],
        PictureEffect => "picture-effect", [0x09, 0x04, 0x63, 0xFF],
        Preset => "preset", [0x09, 0x04, 0x3F, 0xFF],
        Tally => "tally", [0x09, 0x7E, 0x01, 0x0A, 0xFF],
        WhiteBalance => "white-balance", [0x09, 0x04, 0x35, 0xFF],
        AutoExposure => "auto-exposure", [0x09, 0x04, 0x39, 0xFF],
        ImageFlip => "image-flip", [0x09, 0x04, 0x66, 0xFF],
        PanReverse => "pan-reverse", [0x09, 0x7E, 0x01, 0x06, 0xFF],
        TiltReverse => "tilt-reverse", [0x09, 0x7E, 0x01, 0x09, 0xFF],
        PanTilt => "pan-tilt", [0x09, 0x06, 0x12, 0xFF],
        Version => "version", [0x09, 0x00, 0x02, 0xFF],
        WideMode => "wide-mode", [0x09, 0x04, 0x60, 0xFF],
        Backlight => "backlight", [0x09, 0x04, 0x33, 0xFF],
    }
}

/// Exposure and colour registers with relative and direct control
///
/// Each register has a relative code (`01 04 XX 00/02/03` for reset/up/down)
/// and a direct code used both to set (`01 04 YY 00 00 0p 0q`) and to query
/// (`09 04 YY`) its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Register {
    RedGain,
    BlueGain,
    Shutter,
    Iris,
    Gain,
    Brightness,
    ExposureCompensation,
    Aperture,
}

impl Register {
    pub const ALL: &'static [Register] = &[
        Register::RedGain,
        Register::BlueGain,
        Register::Shutter,
        Register::Iris,
        Register::Gain,
        Register::Brightness,
        Register::ExposureCompensation,
        Register::Aperture,
    ];

    /// Code used by the reset/up/down commands.
    #[must_use]
    pub const fn relative_code(self) -> u8 {
        match self {
            Register::RedGain => 0x03,
            Register::BlueGain => 0x04,
            Register::Shutter => 0x0A,
            Register::Iris => 0x0B,
            Register::Gain => 0x0C,
            Register::Brightness => 0x0D,
            Register::ExposureCompensation => 0x0E,
            Register::Aperture => 0x02,
        }
    }

    /// Code used by the direct set command and the inquiry.
    #[must_use]
    pub const fn direct_code(self) -> u8 {
        match self {
            Register::RedGain => 0x43,
            Register::BlueGain => 0x44,
            Register::Shutter => 0x4A,
            Register::Iris => 0x4B,
            Register::Gain => 0x4C,
            Register::Brightness => 0x4D,
            Register::ExposureCompensation => 0x4E,
            Register::Aperture => 0x42,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Register::RedGain => "red-gain",
            Register::BlueGain => "blue-gain",
            Register::Shutter => "shutter",
            Register::Iris => "iris",
            Register::Gain => "gain",
            Register::Brightness => "brightness",
            Register::ExposureCompensation => "exposure",
            Register::Aperture => "aperture",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Register {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Register::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| Error::invalid_parameter(format!("Unknown register: {s}")))
    }
}

/// Relative adjustment of a [`Register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    Reset,
    Up,
    Down,
}

impl Adjust {
    const fn code(self) -> u8 {
        match self {
            Adjust::Reset => 0x00,
            Adjust::Up => 0x02,
            Adjust::Down => 0x03,
        }
    }
}

/// A complete byte template ready to be framed and sent
///
/// Commands come from the fixed tables ([`CommandCode`], [`InquiryCode`]),
/// from the validating builders below, or from [`Command::custom`] for raw
/// passthrough. A `Command` always ends with exactly one `0xFF`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    bytes: Bytes,
}

impl Command {
    /// Wrap a static template from the catalog.
    fn from_static(template: &'static [u8]) -> Self {
        Command {
            bytes: Bytes::from_static(template),
        }
    }

    /// Assemble a template from a prefix and data bytes, adding the terminator.
    fn assemble(prefix: &[u8], data: &[u8]) -> Self {
        let mut buf = BytesMut::with_capacity(prefix.len() + data.len() + 1);
        buf.put_slice(prefix);
        buf.put_slice(data);
        buf.put_u8(TERMINATOR);
        Command {
            bytes: buf.freeze(),
        }
    }

    /// Wrap caller-supplied bytes (header excluded) as a command.
    ///
    /// A missing terminator is appended. The bytes must not contain `0xFF`
    /// anywhere else, and the framed packet must fit in 16 bytes.
    ///
    /// # Errors
    /// Returns `Error::MalformedFrame` for empty input, an embedded
    /// terminator, or an oversized packet.
    ///
    /// ```
    /// use visca_protocol::Command;
    ///
    /// let cmd = Command::custom(&[0x01, 0x04, 0x00, 0x02]).unwrap();
    /// assert_eq!(cmd.as_bytes(), &[0x01, 0x04, 0x00, 0x02, 0xFF]);
    ///
    /// assert!(Command::custom(&[]).is_err());
    /// assert!(Command::custom(&[0x01, 0xFF, 0x02]).is_err());
    /// ```
    pub fn custom(bytes: &[u8]) -> Result<Self> {
        let body = match bytes {
            [body @ .., last] if *last == TERMINATOR => body,
            body => body,
        };
        if body.is_empty() {
            return Err(Error::malformed_frame("Command has no payload"));
        }
        if body.contains(&TERMINATOR) {
            return Err(Error::malformed_frame(format!(
                "Command contains an embedded terminator: {}",
                hex(bytes)
            )));
        }
        // header + body + terminator
        if body.len() + 2 > MAX_PACKET_LENGTH {
            return Err(Error::malformed_frame(format!(
                "Command is {} bytes, packets are limited to {MAX_PACKET_LENGTH}",
                body.len() + 2
            )));
        }
        Ok(Command::assemble(body, &[]))
    }

    /// Template bytes, terminator included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether this template is an inquiry (`09 ..`).
    pub fn is_inquiry(&self) -> bool {
        self.bytes.first() == Some(&CATEGORY_INQUIRY)
    }

    // ------------------------------------------------------------------------
    // Zoom / focus
    // ------------------------------------------------------------------------

    /// Zoom toward tele at `speed` (0-7).
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if `speed` is above 7.
    pub fn zoom_tele_variable(speed: u8) -> Result<Self> {
        let speed = check_zoom_speed(speed)?;
        Ok(Command::assemble(&[0x01, 0x04, 0x07], &[0x20 + speed]))
    }

    /// Zoom toward wide at `speed` (0-7).
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if `speed` is above 7.
    pub fn zoom_wide_variable(speed: u8) -> Result<Self> {
        let speed = check_zoom_speed(speed)?;
        Ok(Command::assemble(&[0x01, 0x04, 0x07], &[0x30 + speed]))
    }

    /// Move the zoom lens to an absolute position (0-0x4000).
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if `position` is above 0x4000.
    pub fn zoom_direct(position: u32) -> Result<Self> {
        let nibbles = lens_nibbles(position, "zoom")?;
        Ok(Command::assemble(&[0x01, 0x04, 0x47], &nibbles))
    }

    /// Move the focus lens to an absolute position (0-0x4000).
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if `position` is above 0x4000.
    pub fn focus_direct(position: u32) -> Result<Self> {
        let nibbles = lens_nibbles(position, "focus")?;
        Ok(Command::assemble(&[0x01, 0x04, 0x48], &nibbles))
    }

    /// Move zoom and focus lenses together to absolute positions.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if either position is above 0x4000.
    pub fn zoom_focus_direct(zoom: u32, focus: u32) -> Result<Self> {
        let mut data = lens_nibbles(zoom, "zoom")?;
        data.extend(lens_nibbles(focus, "focus")?);
        Ok(Command::assemble(&[0x01, 0x04, 0x47], &data))
    }

    // ------------------------------------------------------------------------
    // Pan / tilt
    // ------------------------------------------------------------------------

    /// Drive pan/tilt in `direction` at the given speeds (0-0x18).
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if a speed is above 0x18.
    pub fn pan_tilt_drive(direction: Direction, pan_speed: u8, tilt_speed: u8) -> Result<Self> {
        let pan_speed = check_pan_tilt_speed(pan_speed)?;
        let tilt_speed = check_pan_tilt_speed(tilt_speed)?;
        let (pan_dir, tilt_dir) = direction.drive_bytes();
        Ok(Command::assemble(
            &[0x01, 0x06, 0x01],
            &[pan_speed, tilt_speed, pan_dir, tilt_dir],
        ))
    }

    /// Move pan/tilt to an absolute position.
    ///
    /// `pan_nibbles` and `tilt_nibbles` are the position widths of the camera
    /// model (4 each on most cameras).
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` for a speed above 0x18 or a width of
    /// 0 or more than 8 nibbles, and `Error::ValueOutOfRange` for a position
    /// that does not fit its width.
    pub fn pan_tilt_absolute(
        pan_speed: u8,
        tilt_speed: u8,
        pan: u32,
        tilt: u32,
        pan_nibbles: usize,
        tilt_nibbles: usize,
    ) -> Result<Self> {
        let pan_speed = check_pan_tilt_speed(pan_speed)?;
        let tilt_speed = check_pan_tilt_speed(tilt_speed)?;
        check_position_width(pan_nibbles, "pan")?;
        check_position_width(tilt_nibbles, "tilt")?;

        let mut data = vec![pan_speed, tilt_speed];
        data.extend(try_split_nibbles(pan, pan_nibbles)?);
        data.extend(try_split_nibbles(tilt, tilt_nibbles)?);

        let command = Command::assemble(&[0x01, 0x06, 0x02], &data);
        if command.bytes.len() + 1 > MAX_PACKET_LENGTH {
            return Err(Error::invalid_parameter(format!(
                "Pan/tilt widths {pan_nibbles}+{tilt_nibbles} do not fit in one packet"
            )));
        }
        Ok(command)
    }

    // ------------------------------------------------------------------------
    // Presets
    // ------------------------------------------------------------------------

    /// Recall the position stored in preset `slot`.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if `slot` is above 0x7F.
    pub fn preset_recall(slot: u8) -> Result<Self> {
        Ok(Command::assemble(&[0x01, 0x04, 0x3F, 0x02], &[check_slot(slot)?]))
    }

    /// Store the current position in preset `slot`.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if `slot` is above 0x7F.
    pub fn preset_store(slot: u8) -> Result<Self> {
        Ok(Command::assemble(&[0x01, 0x04, 0x3F, 0x01], &[check_slot(slot)?]))
    }

    /// Clear preset `slot`.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if `slot` is above 0x7F.
    pub fn preset_clear(slot: u8) -> Result<Self> {
        Ok(Command::assemble(&[0x01, 0x04, 0x3F, 0x00], &[check_slot(slot)?]))
    }

    // ------------------------------------------------------------------------
    // Modes
    // ------------------------------------------------------------------------

    pub fn white_balance(mode: WhiteBalance) -> Self {
        Command::assemble(&[0x01, 0x04, 0x35], &[mode.to_u8()])
    }

    pub fn auto_exposure(mode: AutoExposure) -> Self {
        Command::assemble(&[0x01, 0x04, 0x39], &[mode.to_u8()])
    }

    pub fn picture_effect(effect: PictureEffect) -> Self {
        Command::assemble(&[0x01, 0x04, 0x63], &[effect.to_u8()])
    }

    /// Select the camera's video output format.
    ///
    /// The meaning of `system` is model-specific.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if `system` is above 0x7F.
    pub fn video_system(system: u8) -> Result<Self> {
        let system = check_data_byte(system, "video system")?;
        Ok(Command::assemble(&[0x01, 0x06, 0x35, 0x00], &[system]))
    }

    // ------------------------------------------------------------------------
    // Registers
    // ------------------------------------------------------------------------

    /// Reset, raise or lower a register by one step.
    pub fn register_adjust(register: Register, adjust: Adjust) -> Self {
        Command::assemble(&[0x01, 0x04, register.relative_code()], &[adjust.code()])
    }

    /// Set a register to `value` (two nibbles, 0-0xFF).
    ///
    /// # Errors
    /// Returns `Error::ValueOutOfRange` if `value` is above 0xFF.
    pub fn register_direct(register: Register, value: u32) -> Result<Self> {
        let nibbles = try_split_nibbles(value, REGISTER_NIBBLES)?;
        Ok(Command::assemble(
            &[0x01, 0x04, register.direct_code(), 0x00, 0x00],
            &nibbles,
        ))
    }

    /// Inquiry for a register's current value.
    pub fn register_inquiry(register: Register) -> Self {
        Command::assemble(&[0x09, 0x04, register.direct_code()], &[])
    }

    // ------------------------------------------------------------------------
    // Title overlay
    // ------------------------------------------------------------------------

    /// Title position and blink setting.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if a position is above 0x7F.
    pub fn title_parameters(h_position: u8, v_position: u8, blink: bool) -> Result<Self> {
        let h = check_data_byte(h_position, "title horizontal position")?;
        let v = check_data_byte(v_position, "title vertical position")?;
        Ok(Command::assemble(
            &[0x01, 0x7E, 0x01, 0x10],
            &[h, v, u8::from(blink), 0, 0, 0, 0, 0, 0, 0],
        ))
    }

    /// One line of title text, padded with zero bytes to 10 characters.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` for a line other than 0 or 1, or text
    /// that is not ASCII or longer than 10 characters.
    pub fn title_line(line: usize, text: &str) -> Result<Self> {
        if line >= TITLE_LINES {
            return Err(Error::invalid_parameter(format!(
                "Title line must be below {TITLE_LINES}, got {line}"
            )));
        }
        if !text.is_ascii() {
            return Err(Error::invalid_parameter("Title text must be ASCII"));
        }
        if text.len() > TITLE_LINE_LENGTH {
            return Err(Error::invalid_parameter(format!(
                "Title line must be at most {TITLE_LINE_LENGTH} characters, got {}",
                text.len()
            )));
        }

        let mut chars = [0u8; TITLE_LINE_LENGTH];
        chars[..text.len()].copy_from_slice(text.as_bytes());
        let selector = 0x11 + line as u8;
        Ok(Command::assemble(&[0x01, 0x7E, 0x01, selector], &chars))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex(&self.bytes))
    }
}

fn check_zoom_speed(speed: u8) -> Result<u8> {
    if speed > MAX_ZOOM_SPEED {
        return Err(Error::invalid_parameter(format!(
            "Zoom speed must be 0-{MAX_ZOOM_SPEED}, got {speed}"
        )));
    }
    Ok(speed)
}

fn check_pan_tilt_speed(speed: u8) -> Result<u8> {
    if speed > MAX_PAN_TILT_SPEED {
        return Err(Error::invalid_parameter(format!(
            "Pan/tilt speed must be 0-{MAX_PAN_TILT_SPEED:#04x}, got {speed:#04x}"
        )));
    }
    Ok(speed)
}

fn check_slot(slot: u8) -> Result<u8> {
    if slot > MAX_PRESET_SLOT {
        return Err(Error::invalid_parameter(format!(
            "Preset slot must be 0-{MAX_PRESET_SLOT}, got {slot}"
        )));
    }
    Ok(slot)
}

fn check_data_byte(value: u8, what: &str) -> Result<u8> {
    if value > 0x7F {
        return Err(Error::invalid_parameter(format!(
            "{what} must be 0x00-0x7F, got {value:#04x}"
        )));
    }
    Ok(value)
}

fn check_position_width(nibbles: usize, what: &str) -> Result<()> {
    if nibbles == 0 || nibbles > MAX_POSITION_NIBBLES {
        return Err(Error::invalid_parameter(format!(
            "{what} width must be 1-{MAX_POSITION_NIBBLES} nibbles, got {nibbles}"
        )));
    }
    Ok(())
}

fn lens_nibbles(position: u32, what: &str) -> Result<Vec<u8>> {
    if position > MAX_LENS_POSITION {
        return Err(Error::invalid_parameter(format!(
            "{what} position must be 0-{MAX_LENS_POSITION:#06x}, got {position:#x}"
        )));
    }
    Ok(split_nibbles(position, LENS_POSITION_NIBBLES))
}
