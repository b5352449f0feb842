//! Command-line definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use visca_core::{
    DeviceAddress, Direction, WhiteBalance,
    constants::{DEFAULT_BAUD_RATE, DEFAULT_PAN_TILT_SPEED, DEFAULT_REPLY_TIMEOUT_MS},
};
use visca_protocol::Register;

#[derive(Parser, Debug)]
#[command(name = "visca", version, about = "Control VISCA PTZ cameras over a serial line")]
pub struct Cli {
    #[command(flatten)]
    pub line: LineArgs,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Raise log verbosity (-v info, -vv debug with frame diagnostics, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct LineArgs {
    /// Serial port the cameras are daisy-chained on.
    #[arg(long, env = "VISCA_PORT", default_value = "/dev/ttyUSB0", global = true)]
    pub port: String,

    /// Line speed.
    #[arg(long, env = "VISCA_BAUD", default_value_t = DEFAULT_BAUD_RATE, global = true)]
    pub baud: u32,

    /// Camera address (1-7).
    #[arg(long, env = "VISCA_ADDRESS", default_value = "1", global = true)]
    pub address: DeviceAddress,

    /// How long an inquiry waits for its reply.
    #[arg(long, default_value_t = DEFAULT_REPLY_TIMEOUT_MS, global = true)]
    pub timeout_ms: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List serial ports.
    Ports,

    /// Power on, off, or report the power state.
    Power {
        #[arg(value_enum)]
        action: PowerAction,
    },

    /// Drive the zoom lens.
    #[command(subcommand)]
    Zoom(ZoomAction),

    /// Drive the focus lens.
    #[command(subcommand)]
    Focus(FocusAction),

    /// Start moving in a direction until `stop`.
    Move {
        direction: Direction,

        #[arg(long, default_value_t = DEFAULT_PAN_TILT_SPEED)]
        speed: u8,
    },

    /// Stop pan/tilt movement.
    Stop,

    /// Move to an absolute position (decimal or 0x-prefixed hex).
    MoveTo {
        #[arg(value_parser = parse_number)]
        pan: u32,

        #[arg(value_parser = parse_number)]
        tilt: u32,

        #[arg(long, default_value_t = DEFAULT_PAN_TILT_SPEED)]
        speed: u8,
    },

    /// Return to the home position.
    Home,

    /// Re-run pan/tilt calibration.
    Reset,

    /// Report the pan/tilt position.
    Position,

    /// Recall, store, clear or report presets.
    #[command(subcommand)]
    Preset(PresetAction),

    /// Report vendor, model and ROM version.
    Version,

    /// Read an exposure or colour register.
    Get {
        register: Register,
    },

    /// Write an exposure or colour register.
    Set {
        register: Register,

        #[arg(value_parser = parse_number)]
        value: u32,
    },

    /// Set the white balance mode.
    WhiteBalance {
        mode: WhiteBalance,
    },

    /// Show a title overlay (up to 20 ASCII characters).
    Title {
        text: String,

        #[arg(long)]
        blink: bool,

        /// Horizontal position code.
        #[arg(long, default_value_t = 0)]
        column: u8,

        /// Vertical position code.
        #[arg(long, default_value_t = 0)]
        row: u8,
    },

    /// Remove the title overlay.
    TitleClear,

    /// Send raw template bytes in hex, without header or terminator.
    ///
    /// Inquiries (starting with 09) print the result bytes of the reply.
    Raw {
        #[arg(required = true, num_args = 1..)]
        bytes: Vec<String>,

        /// Wait for the completion reply of a command.
        #[arg(long)]
        wait: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    On,
    Off,
    Status,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq)]
pub enum ZoomAction {
    /// Zoom in (tele).
    In {
        #[arg(long)]
        speed: Option<u8>,
    },
    /// Zoom out (wide).
    Out {
        #[arg(long)]
        speed: Option<u8>,
    },
    Stop,
    /// Go to a position between 0.0 (wide) and 1.0 (tele).
    To { fraction: f64 },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq)]
pub enum FocusAction {
    Near,
    Far,
    Stop,
    /// Turn autofocus on.
    Auto,
    /// Turn autofocus off.
    Manual,
    /// Focus once, then hold.
    OnePush,
    Infinity,
    /// Go to a position between 0.0 and 1.0.
    To { fraction: f64 },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetAction {
    Recall { slot: u8 },
    Store { slot: u8 },
    Clear { slot: u8 },
    /// Report the last recalled preset.
    Current,
}

/// Parse a decimal or `0x`-prefixed hexadecimal number.
pub fn parse_number(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid number '{s}': {e}"))
}

/// Parse hex bytes given as separate words, a run of digits, or a mix.
pub fn parse_hex_bytes(words: &[String]) -> Result<Vec<u8>, String> {
    let digits: String = words
        .iter()
        .flat_map(|word| word.split(|c: char| c.is_whitespace() || c == ','))
        .map(|word| word.trim_start_matches("0x").trim_start_matches("0X"))
        .collect();

    if digits.is_empty() {
        return Err("no bytes given".to_string());
    }
    if !digits.is_ascii() {
        return Err(format!("invalid hex digits in '{digits}'"));
    }
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits in '{digits}'"));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| format!("invalid hex byte '{}'", &digits[i..i + 2]))
        })
        .collect()
}
