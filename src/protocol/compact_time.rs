//! Compact 8-bit time encoding
//!
//! Validity and hello intervals travel as a single byte holding a 4-bit
//! exponent `e` (high nibble) and a 4-bit mantissa `m` (low nibble):
//!
//! ```text
//!   7   6   5   4   3   2   1   0
//! +---+---+---+---+---+---+---+---+
//! |   exponent e  |   mantissa m  |
//! +---+---+---+---+---+---+---+---+
//!
//! seconds = 2^e * C * (16 + m)        C = 0.0625
//! ```
//!
//! The representable range runs from 1 s (`0x00`) to 63 488 s (`0xFF`). The
//! encoding is lossy. Values between representable points are rounded to the
//! nearest mantissa, giving a relative error of at most 1/32.

use std::time::Duration;

/// Scaling constant `C` in seconds.
pub const SCALE: f64 = 0.0625;

/// Largest exponent that fits in the high nibble.
const MAX_EXPONENT: u8 = 0x0F;

/// Largest mantissa that fits in the low nibble.
const MAX_MANTISSA: u8 = 0x0F;

/// Byte produced for any duration at or above the representable maximum.
pub const MAX_ENCODED: u8 = (MAX_EXPONENT << 4) | MAX_MANTISSA;

/// Shortest representable duration in seconds, encoded as `0x00`.
pub const MIN_SECONDS: f64 = SCALE * 16.0;

/// Encode a duration in seconds.
///
/// The smallest exponent whose rounded mantissa fits the low nibble wins.
/// Anything below [`MIN_SECONDS`] (including negative and NaN input) encodes
/// to `0x00`; anything past the top of the range saturates at
/// [`MAX_ENCODED`].
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn encode(seconds: f64) -> u8 {
    if seconds.is_nan() || seconds < MIN_SECONDS {
        return 0;
    }

    let steps = seconds / SCALE;
    for exponent in 0..=MAX_EXPONENT {
        let mantissa = (steps / f64::from(1u32 << exponent)).round() - 16.0;
        if mantissa <= f64::from(MAX_MANTISSA) {
            // Rounding can only land below 16 steps at the first exponent
            return (exponent << 4) | mantissa.max(0.0) as u8;
        }
    }
    MAX_ENCODED
}

/// Decode a compact time byte into seconds.
#[must_use]
pub fn decode(byte: u8) -> f64 {
    let exponent = byte >> 4;
    let mantissa = f64::from(byte & 0x0F);
    f64::from(1u32 << exponent) * SCALE * (16.0 + mantissa)
}

/// Encode a [`Duration`].
#[must_use]
pub fn encode_duration(duration: Duration) -> u8 {
    encode(duration.as_secs_f64())
}

/// Decode a compact time byte into a [`Duration`].
#[must_use]
pub fn decode_duration(byte: u8) -> Duration {
    Duration::from_secs_f64(decode(byte))
}
