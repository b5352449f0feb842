//! Result printing.

use serde::Serialize;
use serde_json::json;
use visca_core::{PanTilt, VersionInfo};
use visca_protocol::{Register, hex};

/// What a subcommand produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Command written; nothing to report.
    Done,
    Power(Option<bool>),
    Position(PanTilt),
    Preset(u8),
    Version(VersionInfo),
    Register { register: Register, value: u32 },
    /// Result bytes of a raw inquiry.
    Reply(Vec<u8>),
    Ports(Vec<String>),
}

impl Outcome {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Outcome::Done => json!({ "ok": true }),
            Outcome::Power(state) => json!({ "power": state }),
            Outcome::Position(position) => to_value(position),
            Outcome::Preset(slot) => json!({ "preset": slot }),
            Outcome::Version(version) => to_value(version),
            Outcome::Register { register, value } => {
                json!({ "register": register.as_str(), "value": value })
            }
            Outcome::Reply(bytes) => json!({ "reply": hex(bytes) }),
            Outcome::Ports(ports) => json!({ "ports": ports }),
        }
    }

    pub fn to_text(&self) -> Option<String> {
        match self {
            Outcome::Done => None,
            Outcome::Power(Some(true)) => Some("on".to_string()),
            Outcome::Power(Some(false)) => Some("off".to_string()),
            Outcome::Power(None) => Some("unknown".to_string()),
            Outcome::Position(position) => Some(position.to_string()),
            Outcome::Preset(slot) => Some(slot.to_string()),
            Outcome::Version(version) => Some(version.to_string()),
            Outcome::Register { register, value } => {
                Some(format!("{register}: {value} (0x{value:02X})"))
            }
            Outcome::Reply(bytes) => Some(hex(bytes)),
            Outcome::Ports(ports) if ports.is_empty() => Some("no serial ports found".to_string()),
            Outcome::Ports(ports) => Some(ports.join("\n")),
        }
    }
}

fn to_value(value: &impl Serialize) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

pub fn print(outcome: &Outcome, as_json: bool) {
    if as_json {
        println!("{}", outcome.to_json());
    } else if let Some(text) = outcome.to_text() {
        println!("{text}");
    }
}
