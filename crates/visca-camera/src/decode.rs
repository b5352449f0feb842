//! Decoders for inquiry results.
//!
//! Each function takes the result bytes of an inquiry reply, which are the
//! bytes following `0x50`. For a register reply `90 50 00 00 03 0C FF` the
//! result is `00 00 03 0C`.

use visca_core::{PanTilt, VersionInfo};
use visca_protocol::combine_nibbles;

use crate::error::{CameraError, Result};

/// `02` on, `03` off, anything else unknown.
pub fn on_off(result: &[u8]) -> Option<bool> {
    match result.first() {
        Some(0x02) => Some(true),
        Some(0x03) => Some(false),
        _ => None,
    }
}

/// `01` reversed, `00` normal, anything else unknown.
pub fn reversed(result: &[u8]) -> Option<bool> {
    match result.first() {
        Some(0x01) => Some(true),
        Some(0x00) => Some(false),
        _ => None,
    }
}

/// `02` on; anything else, including an empty result, is off.
pub fn flag(result: &[u8]) -> bool {
    result.first() == Some(&0x02)
}

/// First result byte, for mode inquiries.
pub fn mode_byte(result: &[u8]) -> Option<u8> {
    result.first().copied()
}

/// Two-nibble register value carried by `00 00 0p 0q`.
pub fn register(result: &[u8]) -> Result<u32> {
    let nibbles = result
        .get(2..4)
        .ok_or_else(|| short("register", result, 4))?;
    Ok(combine_nibbles(nibbles))
}

/// Current preset slot.
pub fn preset(result: &[u8]) -> Result<u8> {
    result.first().copied().ok_or_else(|| short("preset", result, 1))
}

/// Pan nibbles followed by tilt nibbles.
pub fn pan_tilt(result: &[u8], pan_nibbles: usize, tilt_nibbles: usize) -> Result<PanTilt> {
    let needed = pan_nibbles.checked_add(tilt_nibbles).ok_or_else(|| {
        CameraError::malformed_reply(format!(
            "pan/tilt widths {pan_nibbles}+{tilt_nibbles} overflow"
        ))
    })?;
    if result.len() < needed {
        return Err(short("pan/tilt", result, needed));
    }

    let (pan, rest) = result.split_at(pan_nibbles);
    Ok(PanTilt {
        pan: combine_nibbles(pan),
        tilt: combine_nibbles(&rest[..tilt_nibbles]),
    })
}

/// Vendor, model and ROM as two-nibble pairs, then the socket count.
///
/// Each pair is folded with [`combine_nibbles`], so `04 63` reads as `0xA3`.
pub fn version(result: &[u8]) -> Result<VersionInfo> {
    match result {
        [v1, v0, m1, m0, r1, r0, sockets, ..] => Ok(VersionInfo {
            vendor: combine_nibbles(&[*v1, *v0]),
            model: combine_nibbles(&[*m1, *m0]),
            rom: combine_nibbles(&[*r1, *r0]),
            sockets: *sockets,
        }),
        _ => Err(short("version", result, 7)),
    }
}

fn short(what: &str, result: &[u8], needed: usize) -> CameraError {
    CameraError::malformed_reply(format!(
        "{what} reply needs {needed} result bytes, got {}",
        result.len()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[0x02], Some(true))]
    #[case(&[0x03], Some(false))]
    #[case(&[0x00], None)]
    #[case(&[0x04], None)]
    #[case(&[], None)]
    fn test_on_off(#[case] result: &[u8], #[case] expected: Option<bool>) {
        assert_eq!(on_off(result), expected);
    }

    #[rstest]
    #[case(&[0x01], Some(true))]
    #[case(&[0x00], Some(false))]
    #[case(&[0x02], None)]
    fn test_reversed(#[case] result: &[u8], #[case] expected: Option<bool>) {
        assert_eq!(reversed(result), expected);
    }

    #[rstest]
    #[case(&[0x02], true)]
    #[case(&[0x03], false)]
    #[case(&[0x00], false)]
    #[case(&[], false)]
    fn test_flag(#[case] result: &[u8], #[case] expected: bool) {
        assert_eq!(flag(result), expected);
    }

    #[test]
    fn test_register() {
        assert_eq!(register(&[0x00, 0x00, 0x03, 0x0C]).unwrap(), 0x3C);
        assert_eq!(register(&[0x00, 0x00, 0x00, 0x00]).unwrap(), 0);
        assert!(matches!(
            register(&[0x00, 0x00, 0x03]),
            Err(CameraError::Protocol(visca_core::Error::MalformedReply { .. }))
        ));
    }

    #[test]
    fn test_preset() {
        assert_eq!(preset(&[0x05]).unwrap(), 5);
        assert!(preset(&[]).is_err());
    }

    #[test]
    fn test_pan_tilt() {
        let result = [0x01, 0x02, 0x03, 0x04, 0x00, 0x00, 0x00, 0x01];
        assert_eq!(
            pan_tilt(&result, 4, 4).unwrap(),
            PanTilt {
                pan: 0x1234,
                tilt: 0x0001
            }
        );

        let result = [0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x01, 0x02, 0x03, 0x04];
        assert_eq!(
            pan_tilt(&result, 5, 4).unwrap(),
            PanTilt {
                pan: 0xABCDE,
                tilt: 0x1234
            }
        );

        assert!(pan_tilt(&result[..7], 4, 4).is_err());
    }

    #[test]
    fn test_pan_tilt_width_overflow() {
        let result = [0x01, 0x02, 0x03, 0x04];
        let err = pan_tilt(&result, usize::MAX, 2).unwrap_err();
        assert!(matches!(
            err,
            CameraError::Protocol(visca_core::Error::MalformedReply { .. })
        ));
        assert!(pan_tilt(&result, 2, usize::MAX).is_err());
    }

    #[test]
    fn test_version() {
        let result = [0x00, 0x20, 0x04, 0x63, 0x01, 0x00, 0x02];
        assert_eq!(
            version(&result).unwrap(),
            VersionInfo {
                vendor: 0x20,
                model: 0xA3,
                rom: 0x10,
                sockets: 2
            }
        );

        // Nibble-sized bytes fold into one byte per field
        let result = [0x00, 0x01, 0x00, 0x0E, 0x01, 0x02, 0x01];
        assert_eq!(
            version(&result).unwrap(),
            VersionInfo {
                vendor: 0x01,
                model: 0x0E,
                rom: 0x12,
                sockets: 1
            }
        );
        assert!(version(&result[..6]).is_err());
    }
}
