// src/common/float.rs

//! Decoding of the calibrated channel values.
//!
//! Each calibrated value arrives as four virtual registers holding a
//! sign/exponent/fraction word, most significant byte first. The value is
//! rebuilt explicitly from its fields rather than by reinterpreting the bits,
//! so the decoding does not depend on the host float representation.
//!
//! Accepted limitations: an exponent field of 0 is decoded as zero/subnormal
//! (`fraction * 2^-149`), and an exponent field of 255 is not special-cased,
//! so infinities and NaN payloads both come out as signed infinity. The hub
//! never produces either in its calibrated output range.

const SIGN_BIT: u32 = 1 << 31;
const EXPONENT_SHIFT: u32 = 23;
const EXPONENT_MASK: u32 = 0xFF;
const FRACTION_MASK: u32 = 0x007F_FFFF;
const FRACTION_BITS: i32 = 23;
const EXPONENT_BIAS: i32 = 127;
/// Scale of one fraction LSB when the exponent field is zero.
const SUBNORMAL_EXPONENT: i32 = 1 - EXPONENT_BIAS - FRACTION_BITS;

/// `2^exp` as an `f64`, for `exp` within the normal `f64` exponent range.
#[inline]
fn pow2(exp: i32) -> f64 {
    // Every exponent used here lies in -149..=128.
    f64::from_bits(((exp + 1023) as u64) << 52)
}

/// Decodes four calibrated-value bytes (byte 0 most significant).
pub fn decode_calibrated(bytes: [u8; 4]) -> f32 {
    let word = u32::from_be_bytes(bytes);

    let sign = if word & SIGN_BIT != 0 { -1.0 } else { 1.0 };
    let exponent = ((word >> EXPONENT_SHIFT) & EXPONENT_MASK) as i32;
    let fraction = word & FRACTION_MASK;

    let magnitude = if exponent == 0 {
        fraction as f64 * pow2(SUBNORMAL_EXPONENT)
    } else {
        let mut mantissa = 1.0f64;
        for bit in 0..FRACTION_BITS {
            if fraction & (1 << bit) != 0 {
                mantissa += pow2(bit - FRACTION_BITS);
            }
        }
        mantissa * pow2(exponent - EXPONENT_BIAS)
    };

    // Exact: the magnitude never carries more than 24 significant bits.
    (sign * magnitude) as f32
}
