//! `2^x` approximations
//!
//! All variants cover the single-precision exponent range `[-126, 128]`.
//! Input outside a variant's domain (including NaN) is clamped before
//! evaluation, so every variant is total and finite-valued: callers needing
//! values outside the range must pre-scale.
//!
//! # Variants
//!
//! | name | relative error | Hz error (`midi_to_hz`) |
//! |------|----------------|--------------------------|
//! | `reference` | 1e-6 | 0.01 |
//! | `mineiro` | 6e-5 | 1.0 |
//! | `mineiro_faster` | 0.06 | 600 |
//! | `schraudolph` | 0.06 | 600 |
//! | `ekmett_lb` | 0.09 | 900 |
//! | `ekmett_precise` | 0.065 | 1300 |
//! | `ekmett_better_precise` | 0.025 | 350 |
//! | `desoras` | 0.065 | 1300 |

#![allow(clippy::excessive_precision)]

use crate::bits::{
    f32_from_bits, f32_from_bits_i32, f64_from_bits, f64_to_bits, saturating_bits,
    saturating_pattern, EXPONENT_BIAS, MANTISSA_BITS, MANTISSA_SCALE,
};
use crate::consts::LN_2;
use crate::variant::{Domain, ErrorBound, ErrorUnit, FunctionFamily, Variant};

/// Full exponent range reachable through the bit pattern
pub const FULL_RANGE: Domain = Domain::interval(-126.0, 128.0);

/// Range for variants that build the result arithmetically, where `2^128`
/// itself would overflow
pub const FINITE_RANGE: Domain = Domain::interval(-126.0, 127.999_99);

// Bit pattern of 1.0
const ONE_BITS: f32 = 1_065_353_216.0;

/// libm `exp2f` on the clamped input.
#[inline(always)]
pub fn reference(x: f32) -> f32 {
    libm::exp2f(FINITE_RANGE.clamp(x))
}

// Mineiro's rational correction `A / (B - z)`, rewritten as the excess over
// its value at `z = 0`
const MINEIRO_A: f32 = 27.728_023_3;
const MINEIRO_B: f32 = 4.842_525_68;

// `A / (B * (B - 1)) - 1`: makes the mantissa reach exactly one octave at `z = 1`
const MINEIRO_SLOPE: f32 = 0.490_150_73;

/// Mineiro's fastpow2.
///
/// # Algorithm
///
/// Splits `x = n + z` with `n = floor(x)`, writes `n + 127` into the
/// exponent field and fills the mantissa from a rational fit in `z`:
///
/// ```text
/// mantissa(z) = z * (A / (B * (B - z)) - (A / (B * (B - 1)) - 1))
/// A = 27.7280233, B = 4.84252568
/// ```
///
/// `mantissa(0) = 0` and `mantissa(1) = 1`, so the result is exact at every
/// integer and the pattern is continuous across octaves: the variant is
/// non-decreasing on every float of its domain.
///
/// # Error Bounds
///
/// Relative error below 6e-5 over `[-126, 128]`; under 1 Hz through
/// `midi_to_hz` across the audible range.
#[inline(always)]
pub fn mineiro(x: f32) -> f32 {
    let p = FULL_RANGE.clamp(x);
    let n = libm::floorf(p);
    let z = p - n;
    let mantissa = (z * (MINEIRO_A / (MINEIRO_B * (MINEIRO_B - z)) - MINEIRO_SLOPE)).min(1.0);

    // n + 127 is in [1, 255]; 255 saturates below
    let exponent = ((n as i32 + EXPONENT_BIAS) as u32) << MANTISSA_BITS;
    saturating_bits(exponent + (MANTISSA_SCALE * mantissa) as u32)
}

/// Mineiro's fasterpow2: the bit-pattern trick with a constant offset and no
/// mantissa correction.
#[inline(always)]
pub fn mineiro_faster(x: f32) -> f32 {
    let p = FULL_RANGE.clamp(x);
    saturating_pattern(MANTISSA_SCALE * (p + 126.942_695_04))
}

/// Schraudolph's exponent trick with the minimum-RMSE offset, expressed in
/// base 2.
#[inline(always)]
pub fn schraudolph(x: f32) -> f32 {
    let p = FULL_RANGE.clamp(x);
    saturating_pattern(8_388_607.888_014_112 * p + 1_064_866_805.0)
}

/// Kmett's lower-bound power approximation with base 2.
///
/// Scales the distance between the bit pattern of the base and the
/// upper-bound constant by the exponent, then re-biases with the lower-bound
/// constant. Always undershoots `2^x`.
#[inline(always)]
pub fn ekmett_lb(x: f32) -> f32 {
    let p = FULL_RANGE.clamp(x);
    // bits(2.0) - 1065353217
    saturating_pattern(p * 8_388_607.0 + 1_064_631_197.0)
}

/// `2^e` for `e >= 0` by repeated squaring
#[inline(always)]
fn integer_power(mut e: i32) -> f32 {
    let mut base = 2.0f32;
    let mut result = 1.0f32;
    while e != 0 {
        if e & 1 != 0 {
            result *= base;
        }
        base *= base;
        e >>= 1;
    }
    result
}

/// Kmett's precise power: exponentiation by squaring on the integer part,
/// linear bit-pattern interpolation on the fraction.
///
/// Negative exponents are evaluated as `1 / 2^|x|`.
#[inline(always)]
pub fn ekmett_precise(x: f32) -> f32 {
    let p = FINITE_RANGE.clamp(x);
    let b = libm::fabsf(p);
    let e = b as i32;
    let fraction = f32_from_bits_i32(((b - e as f32) * MANTISSA_SCALE + ONE_BITS) as i32);
    let r = integer_power(e) * fraction;
    if p < 0.0 {
        1.0 / r
    } else {
        r
    }
}

/// `e^a` as a ratio of two bit-pattern exponentials, accurate for small `a`
#[inline(always)]
fn ratio_exp(a: f32) -> f32 {
    let u = f32_from_bits((6_051_102.0 * a + 1_056_478_197.0) as i32 as u32);
    let v = f32_from_bits((1_056_478_197.0 - 6_051_102.0 * a) as i32 as u32);
    u / v
}

/// Kmett's better precise power: exponentiation by squaring on the integer
/// part, `e^(frac * ln 2)` as a ratio of bit-pattern exponentials on the
/// fraction.
#[inline(always)]
pub fn ekmett_better_precise(x: f32) -> f32 {
    let p = FINITE_RANGE.clamp(x);
    let b = libm::fabsf(p);
    let e = b as i32;
    let fraction = ratio_exp((b - e as f32) * LN_2);
    let r = (integer_power(e) * fraction).min(f32::MAX);
    if p < 0.0 {
        1.0 / r
    } else {
        r
    }
}

/// De Soras' base-2 exponential.
///
/// Evaluated in `f64`: the fractional part plus one becomes the mantissa and
/// the integer part is spliced directly into the exponent field.
#[inline(always)]
pub fn desoras(x: f32) -> f32 {
    const EXPONENT_FIELD: u64 = 0x7FF << 52;

    let p = FINITE_RANGE.clamp(x) as f64;
    let mut e = libm::floor(p);
    let mut m = p - e + 1.0;
    // `p - e` rounds up to 1.0 for tiny negative p
    if m >= 2.0 {
        m = 1.0;
        e += 1.0;
    }
    let bits = (f64_to_bits(m) & !EXPONENT_FIELD) | (((e as i64 + 1023) as u64) << 52);
    f64_from_bits(bits) as f32
}

const fn hz(magnitude: f32) -> ErrorBound {
    ErrorBound::new(magnitude, ErrorUnit::Hertz)
}

const fn rel(magnitude: f32) -> ErrorBound {
    ErrorBound::new(magnitude, ErrorUnit::Relative)
}

/// Pow2 catalogue, reference first
pub static VARIANTS: &[Variant] = &[
    Variant {
        name: "reference",
        family: FunctionFamily::Pow2,
        speed_multiplier: Some(1.0),
        worst_case_error: hz(0.01),
        raw_error: rel(1e-6),
        valid_domain: FINITE_RANGE,
        cyclical: false,
        eval: reference,
    },
    Variant {
        name: "mineiro",
        family: FunctionFamily::Pow2,
        speed_multiplier: Some(1.15),
        worst_case_error: hz(1.0),
        raw_error: rel(6e-5),
        valid_domain: FULL_RANGE,
        cyclical: false,
        eval: mineiro,
    },
    Variant {
        name: "mineiro_faster",
        family: FunctionFamily::Pow2,
        speed_multiplier: Some(4.09),
        worst_case_error: hz(600.0),
        raw_error: rel(0.06),
        valid_domain: FULL_RANGE,
        cyclical: false,
        eval: mineiro_faster,
    },
    Variant {
        name: "schraudolph",
        family: FunctionFamily::Pow2,
        speed_multiplier: None,
        worst_case_error: hz(600.0),
        raw_error: rel(0.06),
        valid_domain: FULL_RANGE,
        cyclical: false,
        eval: schraudolph,
    },
    Variant {
        name: "ekmett_lb",
        family: FunctionFamily::Pow2,
        speed_multiplier: Some(3.5),
        worst_case_error: hz(900.0),
        raw_error: rel(0.09),
        valid_domain: FULL_RANGE,
        cyclical: false,
        eval: ekmett_lb,
    },
    Variant {
        name: "ekmett_precise",
        family: FunctionFamily::Pow2,
        speed_multiplier: Some(0.72),
        worst_case_error: hz(1300.0),
        raw_error: rel(0.065),
        valid_domain: FINITE_RANGE,
        cyclical: false,
        eval: ekmett_precise,
    },
    Variant {
        name: "ekmett_better_precise",
        family: FunctionFamily::Pow2,
        speed_multiplier: Some(0.73),
        worst_case_error: hz(350.0),
        raw_error: rel(0.025),
        valid_domain: FINITE_RANGE,
        cyclical: false,
        eval: ekmett_better_precise,
    },
    Variant {
        name: "desoras",
        family: FunctionFamily::Pow2,
        speed_multiplier: None,
        worst_case_error: hz(1300.0),
        raw_error: rel(0.065),
        valid_domain: FINITE_RANGE,
        cyclical: false,
        eval: desoras,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn relative_error(approx: f32, exact: f64) -> f64 {
        ((approx as f64 - exact) / exact).abs()
    }

    #[test]
    fn test_exact_powers_of_two() {
        for e in -20..=20 {
            let x = e as f32;
            let expected = libm::exp2f(x);
            assert_eq!(reference(x), expected);
            assert_eq!(ekmett_precise(x), expected, "ekmett_precise at {}", x);
            assert_eq!(desoras(x), expected, "desoras at {}", x);
        }
    }

    #[test]
    fn test_mineiro_near_unity() {
        for &x in &[-1.5f32, -0.25, 0.0, 0.5, 1.0, 3.75] {
            let err = relative_error(mineiro(x), libm::exp2(x as f64));
            assert!(err < 6e-5, "mineiro({}) relative error {:.2e}", x, err);
        }
    }

    #[test]
    fn test_mineiro_is_exact_at_integers() {
        for e in -126..=127 {
            let x = e as f32;
            assert_eq!(mineiro(x), libm::exp2f(x), "mineiro at {}", x);
        }
    }

    #[test]
    fn test_mineiro_continuous_across_octaves() {
        for e in -125..=127 {
            let x = e as f32;
            let below = libm::nextafterf(x, f32::NEG_INFINITY);
            assert!(mineiro(below) <= mineiro(x), "mineiro steps down at {}", x);
        }
    }

    #[test]
    fn test_every_variant_is_finite_for_extreme_input() {
        let inputs = [
            f32::NEG_INFINITY,
            -1e30,
            -200.0,
            -126.0,
            0.0,
            127.999_99,
            128.0,
            500.0,
            f32::INFINITY,
            f32::NAN,
        ];
        for v in VARIANTS {
            for &x in &inputs {
                let y = v.call(x);
                assert!(y.is_finite(), "{}({}) = {}", v.name, x, y);
                assert!(y >= 0.0, "{}({}) = {}", v.name, x, y);
            }
        }
    }

    #[test]
    fn test_nan_clamps_to_lower_edge() {
        for v in VARIANTS {
            assert_eq!(v.call(f32::NAN), v.call(-126.0), "{}", v.name);
        }
    }

    #[test]
    fn test_desoras_around_zero() {
        // Tiny negative inputs must not wrap the mantissa into the next octave
        assert_eq!(desoras(-1e-30), 1.0);
        assert!(desoras(-1e-3) <= 1.0);
        assert!(desoras(1e-3) >= 1.0);
    }

    #[test]
    fn test_integer_power() {
        assert_eq!(integer_power(0), 1.0);
        assert_eq!(integer_power(1), 2.0);
        assert_eq!(integer_power(10), 1024.0);
        assert_eq!(integer_power(127), libm::exp2f(127.0));
    }

    #[test]
    fn test_ekmett_lb_undershoots() {
        for i in 0..=200 {
            let x = -10.0 + i as f32 * 0.1;
            assert!(
                (ekmett_lb(x) as f64) <= libm::exp2(x as f64) * 1.000_1,
                "ekmett_lb({}) above 2^x",
                x
            );
        }
    }
}
