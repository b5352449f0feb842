//! Nibble-per-byte value codec.
//!
//! VISCA never puts a wide integer on the wire as plain bytes. Positions and
//! register values are spread over several payload bytes, each carrying one
//! nibble in its low four bits, most significant nibble first:
//!
//! ```text
//! 0x1234 in 4 nibbles  ->  01 02 03 04
//! 0x3C   in 2 nibbles  ->  03 0C
//! ```
//!
//! # Usage
//!
//! ```
//! use visca_protocol::nibble::{combine_nibbles, split_nibbles};
//!
//! let nibbles = split_nibbles(0x1234, 4);
//! assert_eq!(nibbles, vec![0x01, 0x02, 0x03, 0x04]);
//! assert_eq!(combine_nibbles(&nibbles), 0x1234);
//! ```

use visca_core::{Error, Result};

/// Split `value` into `count` nibbles, most significant first.
///
/// Bits above `4 * count` are dropped: `split_nibbles(0x12345, 4)` yields the
/// nibbles of `0x2345`. Use [`try_split_nibbles`] when the caller must know.
pub fn split_nibbles(value: u32, count: usize) -> Vec<u8> {
    (0..count)
        .rev()
        .map(|i| {
            let shift = u32::try_from(4 * i).unwrap_or(u32::MAX);
            (value.checked_shr(shift).unwrap_or(0) & 0x0F) as u8
        })
        .collect()
}

/// Split `value` into `count` nibbles, rejecting values that do not fit.
///
/// # Errors
/// Returns `Error::ValueOutOfRange` if `value` needs more than `count` nibbles.
pub fn try_split_nibbles(value: u32, count: usize) -> Result<Vec<u8>> {
    if !fits(value, count) {
        return Err(Error::ValueOutOfRange {
            value,
            nibbles: count,
        });
    }
    Ok(split_nibbles(value, count))
}

/// Combine nibble bytes into an integer, reading them as base-16 digits.
///
/// Each byte is weighted by its position without masking, the way the camera's
/// own replies are read; well-formed replies only carry 0x0-0xF per byte.
/// Returns 0 for an empty slice.
pub fn combine_nibbles(nibbles: &[u8]) -> u32 {
    nibbles
        .iter()
        .fold(0u32, |acc, &n| acc.wrapping_mul(16).wrapping_add(u32::from(n)))
}

/// Whether `value` can be carried in `count` nibbles.
pub fn fits(value: u32, count: usize) -> bool {
    if count >= 8 {
        return true;
    }
    value < 1u32 << (4 * count)
}

/// Map `x` from one range onto another by linear interpolation.
///
/// No clamping is applied: input outside `in_min..=in_max` maps outside
/// `out_min..=out_max`.
///
/// ```
/// use visca_protocol::nibble::map_range;
///
/// assert_eq!(map_range(0.5, 0.0, 1.0, 0.0, 16384.0), 8192.0);
/// assert_eq!(map_range(2.0, 0.0, 1.0, 0.0, 10.0), 20.0);
/// ```
pub fn map_range(x: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0x1234, 4, vec![0x01, 0x02, 0x03, 0x04])]
    #[case(0x4000, 4, vec![0x04, 0x00, 0x00, 0x00])]
    #[case(0x3C, 2, vec![0x03, 0x0C])]
    #[case(0, 3, vec![0x00, 0x00, 0x00])]
    #[case(0xF, 1, vec![0x0F])]
    fn test_split_nibbles(#[case] value: u32, #[case] count: usize, #[case] expected: Vec<u8>) {
        assert_eq!(split_nibbles(value, count), expected);
    }

    #[test]
    fn test_split_nibbles_truncates_wide_values() {
        assert_eq!(split_nibbles(0x12345, 4), vec![0x02, 0x03, 0x04, 0x05]);
        assert_eq!(split_nibbles(0x1FF, 2), vec![0x0F, 0x0F]);
    }

    #[test]
    fn test_split_nibbles_wider_than_u32() {
        let nibbles = split_nibbles(0xABCD_EF01, 10);
        assert_eq!(
            nibbles,
            vec![0x00, 0x00, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F, 0x00, 0x01]
        );
        assert_eq!(combine_nibbles(&nibbles), 0xABCD_EF01);
    }

    #[test]
    fn test_split_nibbles_zero_count() {
        assert!(split_nibbles(0x1234, 0).is_empty());
    }

    #[test]
    fn test_try_split_nibbles_rejects_overflow() {
        assert!(try_split_nibbles(0xFF, 2).is_ok());
        assert_eq!(
            try_split_nibbles(0x100, 2),
            Err(Error::ValueOutOfRange {
                value: 0x100,
                nibbles: 2
            })
        );
    }

    #[rstest]
    #[case(&[], 0)]
    #[case(&[0x01, 0x02, 0x03, 0x04], 0x1234)]
    #[case(&[0x00, 0x00, 0x00, 0x01], 0x0001)]
    #[case(&[0x0F, 0x0F], 0xFF)]
    fn test_combine_nibbles(#[case] nibbles: &[u8], #[case] expected: u32) {
        assert_eq!(combine_nibbles(nibbles), expected);
    }

    #[test]
    fn test_combine_nibbles_does_not_mask() {
        // Whole bytes are weighted as digits, like the camera's replies are read.
        assert_eq!(combine_nibbles(&[0x00, 0x20]), 0x20);
        assert_eq!(combine_nibbles(&[0x01, 0x20]), 0x30);
    }

    #[rstest]
    #[case(0xFF, 2, true)]
    #[case(0x100, 2, false)]
    #[case(u32::MAX, 8, true)]
    #[case(1, 0, false)]
    #[case(0, 0, true)]
    fn test_fits(#[case] value: u32, #[case] count: usize, #[case] expected: bool) {
        assert_eq!(fits(value, count), expected);
    }

    #[test]
    fn test_map_range() {
        assert_eq!(map_range(0.0, 0.0, 1.0, 0.0, 16384.0), 0.0);
        assert_eq!(map_range(1.0, 0.0, 1.0, 0.0, 16384.0), 16384.0);
        assert_eq!(map_range(5.0, 0.0, 10.0, 100.0, 200.0), 150.0);
        assert_eq!(map_range(-1.0, 0.0, 1.0, 0.0, 10.0), -10.0);
    }
}
