//! `log2(x)` approximations
//!
//! Bit-trick variants invert the relation used by [`crate::pow2`]: the raw
//! bit pattern of a positive float, scaled by `2^-23` and re-biased, is
//! already a piecewise-linear `log2`. The variants differ in how they correct
//! the mantissa's contribution.
//!
//! # Domain Policy
//!
//! Every variant clamps its input into `[f32::MIN_POSITIVE, f32::MAX]` first.
//! Zero, negative numbers, subnormals and NaN therefore all evaluate as
//! `log2(f32::MIN_POSITIVE)` (about -126) and `+inf` as `log2(f32::MAX)`
//! (about 128). Results are always finite and the clamp preserves
//! monotonicity.

#![allow(clippy::excessive_precision)]

use libm::fmaf;

use crate::bits::{f32_from_bits, f32_to_bits, f32_to_bits_i32, MANTISSA_MASK, MANTISSA_ULP};
use crate::consts::{LN_2, LOG2_E};
use crate::variant::{Domain, ErrorBound, ErrorUnit, FunctionFamily, Variant};

/// Positive normal floats
pub const POSITIVE_NORMAL: Domain = Domain::interval(f32::MIN_POSITIVE, f32::MAX);

/// Apply the domain policy.
#[inline(always)]
pub fn guard(x: f32) -> f32 {
    POSITIVE_NORMAL.clamp(x)
}

/// libm `log2f` on the guarded input.
#[inline(always)]
pub fn reference(x: f32) -> f32 {
    libm::log2f(guard(x))
}

// Mineiro's rational term `C / (D + m)` with `m = 0.5 + frac / 2`
const MINEIRO_C: f32 = 1.725_879_99;
const MINEIRO_D: f32 = 0.852_088_706_8;
const MINEIRO_AT_ZERO: f32 = MINEIRO_C / MINEIRO_D;

// `1 - C / D + C / (D + 0.5)`: the mantissa term reaches exactly 1 at the
// top of each octave
const MINEIRO_SLOPE: f32 = 0.250_984_85;

/// Mineiro's fastlog2.
///
/// # Algorithm
///
/// Splits the float into its unbiased exponent `e` and the mantissa fraction
/// `frac` in `[0, 1)`, then corrects the linear estimate with Mineiro's
/// rational term, arranged so it vanishes at `frac = 0`:
///
/// ```text
/// log2(x) ~= e + 0.25098485 * frac + 1.72587999 / 0.8520887068
///              - 1.72587999 / (0.8520887068 + frac / 2)
/// ```
///
/// Both terms rise with `frac`, so every rounding step is monotone, and the
/// term runs from exactly 0 to exactly 1 across an octave. The variant is
/// non-decreasing on every positive float and `log2(1) == 0` exactly.
///
/// # Error Bounds
///
/// Absolute error below 1.5e-4 octaves over all positive normal floats.
#[inline(always)]
pub fn mineiro(x: f32) -> f32 {
    let bits = f32_to_bits(guard(x));
    let e = ((bits >> 23) as i32 - 127) as f32;
    let frac = (bits & MANTISSA_MASK) as f32 * MANTISSA_ULP;
    let rational = MINEIRO_AT_ZERO - MINEIRO_C / (MINEIRO_D + 0.5 * frac);
    e + (MINEIRO_SLOPE * frac + rational)
}

/// Mineiro's fasterlog2: the scaled bit pattern with a constant offset.
#[inline(always)]
pub fn mineiro_faster(x: f32) -> f32 {
    f32_to_bits(guard(x)) as f32 * MANTISSA_ULP - 126.942_695_04
}

/// Split a guarded input into `(exponent_field - 128, mantissa in [1, 2))`
#[inline(always)]
fn exponent_and_mantissa(x: f32) -> (i32, f32) {
    let bits = f32_to_bits(guard(x));
    let e = ((bits >> 23) & 255) as i32 - 128;
    let v = f32_from_bits((bits & !(255 << 23)) + (127 << 23));
    (e, v)
}

/// Geoffroy's log2: exponent field plus a quadratic in the mantissa.
#[inline(always)]
pub fn lgeoffroy(x: f32) -> f32 {
    let (e, v) = exponent_and_mantissa(x);
    e as f32 + ((-0.335_828_781_1 * v + 2.0) * v - 0.658_717_593_166_67)
}

/// [`lgeoffroy`] with refitted coefficients.
#[inline(always)]
pub fn lgeoffroy_accurate(x: f32) -> f32 {
    let (e, v) = exponent_and_mantissa(x);
    e as f32 + ((-0.344_848_43 * v + 2.024_665_78) * v - 0.674_877_59)
}

/// De Soras' log2: exponent field plus the quadratic `-v^2/3 + 2v - 2/3`.
///
/// Evaluated in factored form, `1 + (v - 1)(5 - v)/3`, which is exact at
/// powers of two.
#[inline(always)]
pub fn desoras(x: f32) -> f32 {
    let (e, v) = exponent_and_mantissa(x);
    (e + 1) as f32 + (v - 1.0) * (5.0 - v) / 3.0
}

/// Split `a` into `ln(2) * i + log1p(m)` with `m + 1` in `[2/3, 4/3]`
#[inline(always)]
fn juffa_split(a: f32) -> (f32, f32) {
    let bits = f32_to_bits(a);
    // bits(0.666666667)
    let e = bits.wrapping_sub(0x3F2A_AAAB) & 0xFF80_0000;
    let m = f32_from_bits(bits.wrapping_sub(e)) - 1.0;
    (e as i32 as f32 * MANTISSA_ULP, m)
}

/// Juffa's natural logarithm (0.85 ulp), on guarded input
#[inline(always)]
pub(crate) fn juffa_ln(x: f32) -> f32 {
    let (i, m) = juffa_split(guard(x));
    let s = m * m;
    let mut r = fmaf(-0.130_310_059, s, -0.121_483_512);
    let mut t = fmaf(0.140_869_141, s, 0.139_814_854);
    r = fmaf(r, s, -0.166_846_126);
    t = fmaf(t, s, 0.200_120_345);
    r = fmaf(r, s, -0.249_996_200);
    r = fmaf(t, m, r);
    r = fmaf(r, m, 0.333_331_972);
    r = fmaf(r, m, -0.5);
    r = fmaf(r, s, m);
    fmaf(i, 0.693_147_182, r)
}

/// Juffa's short natural logarithm (9.5e-5 relative), on guarded input
#[inline(always)]
pub(crate) fn juffa_ln_faster(x: f32) -> f32 {
    let (i, f) = juffa_split(guard(x));
    let s = f * f;
    let mut r = fmaf(0.230_836_749, f, -0.279_208_571);
    let t = fmaf(0.331_826_031, f, -0.498_910_338);
    r = fmaf(r, s, t);
    r = fmaf(r, s, f);
    fmaf(i, 0.693_147_182, r)
}

/// Juffa's fma-based natural logarithm, converted to base 2.
///
/// # Algorithm
///
/// Reduces the argument so that the mantissa lies in `[2/3, 4/3]`, then
/// evaluates a minimax `log1p` polynomial with fused multiply-adds. The
/// exponent is carried as a signed integer so inputs below one reduce
/// correctly.
#[inline(always)]
pub fn njuffa(x: f32) -> f32 {
    juffa_ln(x) * LOG2_E
}

/// Juffa's shorter polynomial, converted to base 2.
#[inline(always)]
pub fn njuffa_faster(x: f32) -> f32 {
    juffa_ln_faster(x) * LOG2_E
}

/// Ankerl's inversion of Schraudolph's exponential, in octaves.
#[inline(always)]
pub fn ankerl32(x: f32) -> f32 {
    (f32_to_bits_i32(guard(x)) - 1_064_866_805) as f32 * MANTISSA_ULP
}

/// Kmett's lower-bound inversion, in octaves.
#[inline(always)]
pub fn ekmett_lb(x: f32) -> f32 {
    (f32_to_bits_i32(guard(x)) - 1_065_353_217) as f32 * MANTISSA_ULP
}

const JENKAS_C0: f32 = -19.645_704;
const JENKAS_C1: f32 = 0.767_002;
const JENKAS_C2: f32 = 0.371_747_9;
const JENKAS_C3: f32 = 5.265_398_5;
// Makes log2(1) == 0 exactly
const JENKAS_C4: f32 =
    -(1.0 + JENKAS_C0) * (1.0 + JENKAS_C1) / ((1.0 + JENKAS_C2) * (1.0 + JENKAS_C3));

/// Jenkas' log: exponent plus a rational fit of the mantissa in `[1, 2)`.
#[inline(always)]
pub fn jenkas(x: f32) -> f32 {
    let bits = f32_to_bits(guard(x));
    let e = (bits.wrapping_sub(0x3F80_0000) as i32) >> 23;
    let m = f32_from_bits((bits | 0x3F80_0000) & 0x3FFF_FFFF);
    let a = (m + JENKAS_C0) * (m + JENKAS_C1);
    let b = (m + JENKAS_C2) * (m + JENKAS_C3);
    ((e as f32 + JENKAS_C4) + a / b) * LN_2 * LOG2_E
}

const fn semitones(magnitude: f32) -> ErrorBound {
    ErrorBound::new(magnitude, ErrorUnit::Semitones)
}

const fn octaves(magnitude: f32) -> ErrorBound {
    ErrorBound::new(magnitude, ErrorUnit::Absolute)
}

macro_rules! log2_variant {
    ($name:ident, $speed:expr, $raw:expr, $semitones:expr) => {
        Variant {
            name: stringify!($name),
            family: FunctionFamily::Log2,
            speed_multiplier: $speed,
            worst_case_error: semitones($semitones),
            raw_error: octaves($raw),
            valid_domain: POSITIVE_NORMAL,
            cyclical: false,
            eval: $name,
        }
    };
}

/// Log2 catalogue, reference first
pub static VARIANTS: &[Variant] = &[
    log2_variant!(reference, Some(1.0), 5e-6, 2e-5),
    log2_variant!(mineiro, Some(7.09), 2e-4, 0.002),
    log2_variant!(mineiro_faster, Some(9.63), 0.06, 0.75),
    log2_variant!(lgeoffroy, Some(6.52), 0.006, 0.07),
    log2_variant!(lgeoffroy_accurate, Some(5.99), 0.0055, 0.065),
    log2_variant!(desoras, Some(10.68), 0.011, 0.13),
    log2_variant!(njuffa, Some(2.99), 1.5e-5, 3e-5),
    log2_variant!(njuffa_faster, Some(5.44), 4e-5, 3e-4),
    log2_variant!(ankerl32, Some(9.48), 0.065, 0.75),
    log2_variant!(ekmett_lb, Some(9.77), 0.09, 1.1),
    log2_variant!(jenkas, None, 3e-5, 1e-4),
];
