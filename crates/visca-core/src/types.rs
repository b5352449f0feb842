use crate::{
    Result,
    constants::{HEADER_BASE, MAX_ADDRESS, MIN_ADDRESS, RECEIVER_MASK, SENDER_MASK},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Camera address on a VISCA bus (1-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DeviceAddress(u8);

impl DeviceAddress {
    /// Create a new device address with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidAddress` if the address is outside 1-7.
    pub fn new(address: u8) -> Result<Self> {
        if !(MIN_ADDRESS..=MAX_ADDRESS).contains(&address) {
            return Err(Error::InvalidAddress { address });
        }
        Ok(DeviceAddress(address))
    }

    /// Get the raw address as u8.
    #[must_use]
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Header byte of a packet sent from the controller to this camera.
    ///
    /// ```
    /// use visca_core::DeviceAddress;
    ///
    /// let address = DeviceAddress::new(1).unwrap();
    /// assert_eq!(address.header_byte(), 0x81);
    /// ```
    #[must_use]
    pub fn header_byte(&self) -> u8 {
        HEADER_BASE + self.0
    }

    /// Extract the camera address carried by a header byte.
    ///
    /// Camera replies put their own address in the sender field
    /// (`0x90` is camera 1). Controller headers have a zero sender field and
    /// name the camera in the receiver nibble (`0x81` is camera 1), which is
    /// also what loop-back rigs and bus echoes carry. Returns `None` for
    /// bytes without the header bit or naming no camera in range.
    ///
    /// ```
    /// use visca_core::DeviceAddress;
    ///
    /// assert_eq!(DeviceAddress::from_header(0x90).unwrap().as_u8(), 1);
    /// assert_eq!(DeviceAddress::from_header(0x81).unwrap().as_u8(), 1);
    /// assert_eq!(DeviceAddress::from_header(0xF0).unwrap().as_u8(), 7);
    /// assert!(DeviceAddress::from_header(0x41).is_none());
    /// ```
    #[must_use]
    pub fn from_header(byte: u8) -> Option<Self> {
        if byte & HEADER_BASE == 0 {
            return None;
        }
        let sender = ((byte - HEADER_BASE) >> 4) & SENDER_MASK;
        let address = if sender != 0 {
            sender
        } else {
            byte & RECEIVER_MASK
        };
        DeviceAddress::new(address).ok()
    }
}

impl Default for DeviceAddress {
    fn default() -> Self {
        DeviceAddress(crate::constants::DEFAULT_ADDRESS)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DeviceAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let address: u8 = s
            .trim()
            .parse()
            .map_err(|_| Error::invalid_parameter(format!("Invalid device address: {s}")))?;
        DeviceAddress::new(address)
    }
}

impl TryFrom<u8> for DeviceAddress {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        DeviceAddress::new(value)
    }
}

impl From<DeviceAddress> for u8 {
    fn from(address: DeviceAddress) -> Self {
        address.0
    }
}

/// White balance mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum WhiteBalance {
    Auto = 0x00,
    Indoor = 0x01,
    Outdoor = 0x02,
    OnePush = 0x03,
    Manual = 0x05,
}

impl WhiteBalance {
    /// Decode a mode from the byte an inquiry reply carries.
    #[inline]
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(WhiteBalance::Auto),
            0x01 => Some(WhiteBalance::Indoor),
            0x02 => Some(WhiteBalance::Outdoor),
            0x03 => Some(WhiteBalance::OnePush),
            0x05 => Some(WhiteBalance::Manual),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for WhiteBalance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WhiteBalance::Auto => write!(f, "auto"),
            WhiteBalance::Indoor => write!(f, "indoor"),
            WhiteBalance::Outdoor => write!(f, "outdoor"),
            WhiteBalance::OnePush => write!(f, "one-push"),
            WhiteBalance::Manual => write!(f, "manual"),
        }
    }
}

impl std::str::FromStr for WhiteBalance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(WhiteBalance::Auto),
            "indoor" => Ok(WhiteBalance::Indoor),
            "outdoor" => Ok(WhiteBalance::Outdoor),
            "one-push" | "onepush" => Ok(WhiteBalance::OnePush),
            "manual" => Ok(WhiteBalance::Manual),
            _ => Err(Error::invalid_parameter(format!(
                "Unknown white balance mode: {s}"
            ))),
        }
    }
}

/// Automatic exposure mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum AutoExposure {
    Auto = 0x00,
    Manual = 0x03,
    ShutterPriority = 0x0A,
    IrisPriority = 0x0B,
    Bright = 0x0D,
}

impl AutoExposure {
    /// Decode a mode from the byte an inquiry reply carries.
    #[inline]
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(AutoExposure::Auto),
            0x03 => Some(AutoExposure::Manual),
            0x0A => Some(AutoExposure::ShutterPriority),
            0x0B => Some(AutoExposure::IrisPriority),
            0x0D => Some(AutoExposure::Bright),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for AutoExposure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AutoExposure::Auto => write!(f, "auto"),
            AutoExposure::Manual => write!(f, "manual"),
            AutoExposure::ShutterPriority => write!(f, "shutter-priority"),
            AutoExposure::IrisPriority => write!(f, "iris-priority"),
            AutoExposure::Bright => write!(f, "bright"),
        }
    }
}

impl std::str::FromStr for AutoExposure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(AutoExposure::Auto),
            "manual" => Ok(AutoExposure::Manual),
            "shutter-priority" | "shutter" => Ok(AutoExposure::ShutterPriority),
            "iris-priority" | "iris" => Ok(AutoExposure::IrisPriority),
            "bright" => Ok(AutoExposure::Bright),
            _ => Err(Error::invalid_parameter(format!(
                "Unknown exposure mode: {s}"
            ))),
        }
    }
}

/// Picture effect applied by the camera's image processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum PictureEffect {
    None = 0x00,
    NegativeArt = 0x02,
    BlackAndWhite = 0x04,
}

impl PictureEffect {
    /// Decode an effect from the byte an inquiry reply carries.
    #[inline]
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(PictureEffect::None),
            0x02 => Some(PictureEffect::NegativeArt),
            0x04 => Some(PictureEffect::BlackAndWhite),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for PictureEffect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PictureEffect::None => write!(f, "none"),
            PictureEffect::NegativeArt => write!(f, "negative-art"),
            PictureEffect::BlackAndWhite => write!(f, "black-and-white"),
        }
    }
}

impl std::str::FromStr for PictureEffect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(PictureEffect::None),
            "negative-art" | "negative" => Ok(PictureEffect::NegativeArt),
            "black-and-white" | "bw" => Ok(PictureEffect::BlackAndWhite),
            _ => Err(Error::invalid_parameter(format!(
                "Unknown picture effect: {s}"
            ))),
        }
    }
}

/// Pan/tilt drive direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Pan and tilt direction bytes of the drive command.
    ///
    /// Pan: `01` left, `02` right, `03` stop. Tilt: `01` up, `02` down, `03` stop.
    #[must_use]
    pub fn drive_bytes(self) -> (u8, u8) {
        match self {
            Direction::Up => (0x03, 0x01),
            Direction::Down => (0x03, 0x02),
            Direction::Left => (0x01, 0x03),
            Direction::Right => (0x02, 0x03),
            Direction::UpLeft => (0x01, 0x01),
            Direction::UpRight => (0x02, 0x01),
            Direction::DownLeft => (0x01, 0x02),
            Direction::DownRight => (0x02, 0x02),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::UpLeft => "up-left",
            Direction::UpRight => "up-right",
            Direction::DownLeft => "down-left",
            Direction::DownRight => "down-right",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up-left" => Ok(Direction::UpLeft),
            "up-right" => Ok(Direction::UpRight),
            "down-left" => Ok(Direction::DownLeft),
            "down-right" => Ok(Direction::DownRight),
            _ => Err(Error::invalid_parameter(format!("Unknown direction: {s}"))),
        }
    }
}

/// Absolute pan/tilt position as reported by the camera
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanTilt {
    pub pan: u32,
    pub tilt: u32,
}

impl fmt::Display for PanTilt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "pan={:#06x} tilt={:#06x}", self.pan, self.tilt)
    }
}

/// Identification returned by the version inquiry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub vendor: u32,
    pub model: u32,
    pub rom: u32,
    pub sockets: u8,
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "vendor={:#06x} model={:#06x} rom={:#06x} sockets={}",
            self.vendor, self.model, self.rom, self.sockets
        )
    }
}
