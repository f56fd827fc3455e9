//! IEEE-754 bit reinterpretation
//!
//! Every bit-trick variant in this crate starts from the same observation:
//! read as an integer, the bit pattern of a positive `f32` is a piecewise
//! linear approximation of `2^23 * (log2(x) + 127)`. These helpers expose that
//! view without `unsafe` and without any rounding.
//!
//! All conversions are exact and total: NaN payloads, infinities, signed
//! zero and subnormals survive a round trip unchanged.

/// Number of explicit mantissa bits in an `f32`
pub const MANTISSA_BITS: u32 = 23;

/// Exponent bias of an `f32`
pub const EXPONENT_BIAS: i32 = 127;

/// Mask selecting the mantissa field
pub const MANTISSA_MASK: u32 = 0x007F_FFFF;

/// Mask selecting the exponent field
pub const EXPONENT_MASK: u32 = 0x7F80_0000;

/// Mask selecting the sign bit
pub const SIGN_MASK: u32 = 0x8000_0000;

/// `2^-23`, the value of one mantissa ulp at exponent zero
pub const MANTISSA_ULP: f32 = 1.192_092_9e-7;

/// `2^23` as a float, the bit-pattern slope of one octave
pub const MANTISSA_SCALE: f32 = 8_388_608.0;

/// Bit pattern of the largest finite `f32`
pub const MAX_FINITE_BITS: u32 = 0x7F7F_FFFF;

/// Reinterpret an `f32` as its raw bit pattern.
#[inline(always)]
pub const fn f32_to_bits(x: f32) -> u32 {
    x.to_bits()
}

/// Reinterpret a raw bit pattern as an `f32`.
#[inline(always)]
pub const fn f32_from_bits(bits: u32) -> f32 {
    f32::from_bits(bits)
}

/// Signed view of [`f32_to_bits`]. Negative floats map to negative integers.
#[inline(always)]
pub const fn f32_to_bits_i32(x: f32) -> i32 {
    x.to_bits() as i32
}

/// Inverse of [`f32_to_bits_i32`].
#[inline(always)]
pub const fn f32_from_bits_i32(bits: i32) -> f32 {
    f32::from_bits(bits as u32)
}

/// Reinterpret an `f64` as its raw bit pattern.
#[inline(always)]
pub const fn f64_to_bits(x: f64) -> u64 {
    x.to_bits()
}

/// Reinterpret a raw bit pattern as an `f64`.
#[inline(always)]
pub const fn f64_from_bits(bits: u64) -> f64 {
    f64::from_bits(bits)
}

/// Biased exponent field of `x` (0 for zero/subnormal, 255 for inf/NaN)
#[inline(always)]
pub const fn exponent_field(x: f32) -> u32 {
    (x.to_bits() & EXPONENT_MASK) >> MANTISSA_BITS
}

/// Mantissa field of `x` without the implicit leading one
#[inline(always)]
pub const fn mantissa_field(x: f32) -> u32 {
    x.to_bits() & MANTISSA_MASK
}

/// Replace the exponent field of `x`, keeping sign and mantissa.
///
/// `field` is taken modulo 256.
#[inline(always)]
pub const fn with_exponent_field(x: f32, field: u32) -> f32 {
    let bits = (x.to_bits() & !EXPONENT_MASK) | ((field & 0xFF) << MANTISSA_BITS);
    f32::from_bits(bits)
}

/// Convert a non-negative bit-pattern estimate into a float, saturating at
/// the largest finite value.
///
/// Negative and NaN estimates produce `+0.0`. Float-to-int `as` casts
/// saturate, so the result is monotone in `estimate`.
#[inline(always)]
pub(crate) fn saturating_pattern(estimate: f32) -> f32 {
    saturating_bits(estimate as u32)
}

/// Reinterpret a bit pattern, capping it at the largest finite value.
#[inline(always)]
pub(crate) fn saturating_bits(bits: u32) -> f32 {
    f32::from_bits(if bits > MAX_FINITE_BITS { MAX_FINITE_BITS } else { bits })
}
