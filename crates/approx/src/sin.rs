//! `sin(x)` approximations
//!
//! Variants satisfy one of two contracts, declared through
//! [`Variant::cyclical`] and [`Variant::valid_domain`]:
//!
//! - **Bounded**: accurate only inside the declared interval. Outside it the
//!   polynomial is still evaluated and returns a finite number, but no
//!   correction is applied and the result may diverge from `sin(x)`.
//!   Magnitudes above [`BOUNDED_LIMIT`] are clamped to keep the output finite.
//! - **Cyclical**: any finite input. The argument is folded into one period
//!   first, so accuracy holds across arbitrarily many periods.
//!
//! Callers that keep their phase in `[-pi, pi]` (see [`PhaseAccumulator`])
//! can use the faster bounded variants.

#![allow(clippy::excessive_precision)]

use crate::bits::{f32_from_bits, f32_to_bits, SIGN_MASK};
use crate::consts::{
    FRAC_1_TAU, FRAC_2_PI, FRAC_PI_2, FRAC_PI_2_A, FRAC_PI_2_B, FRAC_PI_2_C, PI, TAU, TAU_A,
    TAU_B, TAU_C,
};
use crate::variant::{Domain, ErrorBound, ErrorUnit, FunctionFamily, Variant};

/// One full period centred on zero
pub const ONE_PERIOD: Domain = Domain::interval(-PI, PI);

/// Half a period centred on zero
pub const HALF_PERIOD: Domain = Domain::interval(-FRAC_PI_2, FRAC_PI_2);

/// The positive half period
pub const POSITIVE_HALF: Domain = Domain::interval(0.0, PI);

/// Largest magnitude a bounded variant evaluates. Larger input is clamped
/// so every polynomial stays finite; the result is still far from `sin(x)`.
pub const BOUNDED_LIMIT: f32 = 1024.0;

/// Largest magnitude folded by the single-precision Cody-Waite split, about
/// ten thousand periods. Larger input is reduced in double precision.
pub const FAST_REDUCTION_LIMIT: f32 = 65_536.0;

const FRAC_4_PI: f32 = 1.273_239_544_735_162_7;
const FRAC_4_PI_SQ: f32 = 0.405_284_734_569_351_09;
const FRAC_1_PI: f32 = 0.318_309_886_18;

#[inline(always)]
fn limit(x: f32) -> f32 {
    x.max(-BOUNDED_LIMIT).min(BOUNDED_LIMIT)
}

/// Fold `x` into `[-pi, pi]` by subtracting the nearest multiple of `2*pi`.
///
/// Up to [`FAST_REDUCTION_LIMIT`] this is a three-constant Cody-Waite split
/// of `2*pi` whose first product is exact, leaving at most about 1e-6 of
/// reduction error. Beyond it the angle is recovered in double precision,
/// which is exact to `f32` for every finite input.
#[inline(always)]
pub fn reduce(x: f32) -> f32 {
    if !(libm::fabsf(x) <= FAST_REDUCTION_LIMIT) {
        return reduce_wide(x);
    }
    let n = libm::floorf(x * FRAC_1_TAU + 0.5);
    ((x - n * TAU_A) - n * TAU_B) - n * TAU_C
}

/// Reduce a large (or non-finite) argument into `[-pi, pi]`.
///
/// libm's double-precision `sin` and `cos` carry a full-width reduction, so
/// their `atan2` is the argument modulo `2*pi` for any finite `x`. NaN and
/// infinities come back as NaN.
#[cold]
#[inline(never)]
fn reduce_wide(x: f32) -> f32 {
    let x = x as f64;
    libm::atan2(libm::sin(x), libm::cos(x)) as f32
}

/// libm `sinf`
#[inline(always)]
pub fn reference(x: f32) -> f32 {
    libm::sinf(x)
}

// Minimax cores on [-pi/4, pi/4]
#[inline(always)]
fn juffa_sin_core(t: f32) -> f32 {
    let t2 = t * t;
    let t4 = t2 * t2;
    ((2.718_121_627_547_973_2e-6 * t2 - 1.983_931_226_945_625_7e-4) * t4
        + (8.333_329_304_842_563_1e-3 * t2 - 1.666_666_664_079_704_8e-1))
        * t2
        * t
        + t
}

#[inline(always)]
fn juffa_cos_core(t: f32) -> f32 {
    let t2 = t * t;
    let t4 = t2 * t2;
    let t8 = t4 * t4;
    (-2.723_637_043_978_770_8e-7 * t2 + 2.479_985_269_661_062_8e-5) * t8
        + (-1.388_888_505_479_969_5e-3 * t2 + 4.166_666_663_694_368_3e-2) * t4
        + (-4.999_999_999_996_302_4e-1 * t2 + 1.0)
}

/// Juffa's quadrant-reduced sine.
///
/// # Algorithm
///
/// Picks the nearest multiple `q` of `pi/2`, subtracts it with a
/// three-constant Cody-Waite split and evaluates either the sine or the
/// cosine minimax core depending on the quadrant.
///
/// # Error Bounds
///
/// About 1e-7 absolute within one period. The reduction contributes up to
/// about 1e-6 near [`FAST_REDUCTION_LIMIT`]; larger input is folded into one
/// period by [`reduce`] first.
#[inline(always)]
pub fn njuffa(x: f32) -> f32 {
    let x = if libm::fabsf(x) <= FAST_REDUCTION_LIMIT {
        x
    } else {
        reduce_wide(x)
    };
    let q = libm::rintf(x * FRAC_2_PI);
    let quadrant = q as i32;
    let t = ((x - q * FRAC_PI_2_A) - q * FRAC_PI_2_B) - q * FRAC_PI_2_C;
    let r = if quadrant & 1 != 0 {
        juffa_cos_core(t)
    } else {
        juffa_sin_core(t)
    };
    if quadrant & 2 != 0 {
        -r
    } else {
        r
    }
}

/// Mineiro's fastsin on `[-pi, pi]`.
///
/// A parabola `4x/pi - 4x|x|/pi^2` refined by an odd polynomial whose
/// coefficient signs follow the sign of `x`.
#[inline(always)]
pub fn mineiro(x: f32) -> f32 {
    let x = limit(x);
    let sign = f32_to_bits(x) & SIGN_MASK;
    let ax = f32_from_bits(f32_to_bits(x) & !SIGN_MASK);
    let q = FRAC_4_PI * x - FRAC_4_PI_SQ * x * ax;
    let q2 = q * q;
    let p = f32_from_bits(f32_to_bits(0.203_639_376_807_303_09) | sign);
    let r = f32_from_bits(f32_to_bits(0.015_124_940_802_184_233) | sign);
    let s = f32_from_bits(f32_to_bits(-0.003_222_590_162_557_957_3) ^ sign);
    0.784_444_883_745_489_33 * q + q2 * (p + q2 * (r + q2 * s))
}

/// Mineiro's fastersin on `[-pi, pi]`: the parabola with one correction term.
#[inline(always)]
pub fn mineiro_faster(x: f32) -> f32 {
    let x = limit(x);
    let sign = f32_to_bits(x) & SIGN_MASK;
    let ax = f32_from_bits(f32_to_bits(x) & !SIGN_MASK);
    let q = FRAC_4_PI * x - FRAC_4_PI_SQ * x * ax;
    let p = f32_from_bits(f32_to_bits(0.223_085_100_601_894_63) | sign);
    q * (0.776_330_232_480_074_99 + p * q)
}

/// [`mineiro`] after [`reduce`]
#[inline(always)]
pub fn mineiro_full(x: f32) -> f32 {
    mineiro(reduce(x))
}

/// [`mineiro_faster`] after [`reduce`]
#[inline(always)]
pub fn mineiro_full_faster(x: f32) -> f32 {
    mineiro_faster(reduce(x))
}

/// Juha's parabola `4x/pi * (1 - |x/pi|)` on `[-pi, pi]`.
#[inline(always)]
pub fn juha(x: f32) -> f32 {
    let x = limit(x);
    4.0 * FRAC_1_PI * x * (1.0 - libm::fabsf(FRAC_1_PI * x))
}

/// [`juha`] after [`reduce`]
#[inline(always)]
pub fn juha_fmod(x: f32) -> f32 {
    juha(reduce(x))
}

/// Padé approximant on `[-pi, pi]` (the JUCE fast sine)
#[inline(always)]
pub fn pade(x: f32) -> f32 {
    let x = limit(x);
    let x2 = x * x;
    let numerator =
        -x * (-11_511_339_840.0 + x2 * (1_640_635_920.0 + x2 * (-52_785_432.0 + x2 * 479_249.0)));
    let denominator =
        11_511_339_840.0 + x2 * (277_920_720.0 + x2 * (3_177_720.0 + x2 * 18_361.0));
    numerator / denominator
}

/// Odd polynomial with explicit roots at `0` and `+-pi`.
///
/// The factors `(x - pi)(x + pi)` use a two-part `pi` so the zeros at the
/// period edges are exact in `f32`.
#[inline(always)]
pub fn sin_approx(x: f32) -> f32 {
    let x = limit(x);
    const PI_MAJOR: f32 = 3.141_592_7;
    const PI_MINOR: f32 = -0.000_000_087_422_78;

    let x2 = x * x;
    let p11 = 0.000_000_000_132_913_42;
    let p9 = p11 * x2 - 0.000_000_023_317_787;
    let p7 = p9 * x2 + 0.000_002_522_291_9;
    let p5 = p7 * x2 - 0.000_173_505_05;
    let p3 = p5 * x2 + 0.006_620_879_8;
    let p1 = p3 * x2 - 0.101_321_18;
    (x - PI_MAJOR - PI_MINOR) * (x + PI_MAJOR + PI_MINOR) * p1 * x
}

/// Bhaskara I's rational sine on `[0, pi]`.
#[inline(always)]
pub fn bhaskara(x: f32) -> f32 {
    let x = limit(x);
    let a = x * (PI - x);
    16.0 * a / (5.0 * PI * PI - 4.0 * a)
}

/// Slaru's parabola with a weighted squared correction on `[-pi, pi]`.
#[inline(always)]
pub fn slaru(x: f32) -> f32 {
    let x = limit(x);
    const B: f32 = 4.0 / PI;
    const C: f32 = -4.0 / (PI * PI);
    const P: f32 = 0.225;

    let y = B * x + C * x * libm::fabsf(x);
    P * (y * libm::fabsf(y) - y) + y
}

/// Wild Magic's degree-5 odd polynomial on `[-pi/2, pi/2]`.
#[inline(always)]
pub fn wildmagic0(x: f32) -> f32 {
    let x = limit(x);
    let x2 = x * x;
    x * (1.0 + x2 * (-0.166_05 + 0.007_61 * x2))
}

/// Wild Magic's degree-11 odd polynomial on `[-pi/2, pi/2]`.
#[inline(always)]
pub fn wildmagic1(x: f32) -> f32 {
    let x = limit(x);
    let x2 = x * x;
    let mut r = -2.39e-8;
    r = r * x2 + 2.752_6e-6;
    r = r * x2 - 1.984_09e-4;
    r = r * x2 + 8.333_331_5e-3;
    r = r * x2 - 1.666_666_664e-1;
    r = r * x2 + 1.0;
    r * x
}

const fn absolute(magnitude: f32) -> ErrorBound {
    ErrorBound::new(magnitude, ErrorUnit::Absolute)
}

macro_rules! sin_variant {
    ($name:ident, $speed:expr, cyclical, $raw:expr, $sustained:expr) => {
        sin_variant!(@build $name, $speed, Domain::Unbounded, $raw, $sustained, true)
    };
    ($name:ident, $speed:expr, $domain:expr, $raw:expr) => {
        sin_variant!(@build $name, $speed, $domain, $raw, $raw, false)
    };
    (@build $name:ident, $speed:expr, $domain:expr, $raw:expr, $worst:expr, $cyclical:expr) => {
        Variant {
            name: stringify!($name),
            family: FunctionFamily::Sin,
            speed_multiplier: $speed,
            worst_case_error: absolute($worst),
            raw_error: absolute($raw),
            valid_domain: $domain,
            cyclical: $cyclical,
            eval: $name,
        }
    };
}

/// Sin catalogue, reference first
pub static VARIANTS: &[Variant] = &[
    sin_variant!(reference, Some(1.0), cyclical, 1e-7, 1e-7),
    sin_variant!(njuffa, Some(0.73), cyclical, 2e-7, 1.5e-6),
    sin_variant!(mineiro_full, Some(1.8), cyclical, 5e-5, 5e-5),
    sin_variant!(mineiro_full_faster, Some(2.43), cyclical, 1e-3, 1e-3),
    sin_variant!(juha_fmod, Some(2.68), cyclical, 0.06, 0.06),
    sin_variant!(pade, Some(2.8), ONE_PERIOD, 1.5e-5),
    sin_variant!(sin_approx, Some(2.15), ONE_PERIOD, 3e-7),
    sin_variant!(mineiro, Some(2.64), ONE_PERIOD, 5e-5),
    sin_variant!(mineiro_faster, Some(4.49), ONE_PERIOD, 1e-3),
    sin_variant!(wildmagic0, Some(5.05), HALF_PERIOD, 2e-4),
    sin_variant!(wildmagic1, Some(2.44), HALF_PERIOD, 3e-7),
    sin_variant!(slaru, Some(3.77), ONE_PERIOD, 1.2e-3),
    sin_variant!(juha, Some(7.69), ONE_PERIOD, 0.06),
    sin_variant!(bhaskara, Some(5.22), POSITIVE_HALF, 2e-3),
];

/// Normalised phase oscillator driving a sin variant.
///
/// The phase lives in `[0, 1)` and drops whole cycles after every
/// increment. Each sample evaluates the variant at the equivalent angle in
/// `[-pi, pi)`, so any variant whose domain covers one full period stays
/// inside its accurate range indefinitely.
///
/// # Example
///
/// ```rust
/// use rigel_approx::sin::{self, PhaseAccumulator};
///
/// let variant = sin::VARIANTS.iter().find(|v| v.name == "mineiro").unwrap();
/// let mut osc = PhaseAccumulator::with_frequency(variant, 440.0, 48_000.0);
/// let mut block = [0.0f32; 64];
/// osc.fill(&mut block);
/// assert!(block.iter().all(|s| s.abs() <= 1.001));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PhaseAccumulator {
    phase: f32,
    increment: f32,
    eval: fn(f32) -> f32,
}

impl PhaseAccumulator {
    /// Create an accumulator at phase zero advancing `increment` cycles per
    /// sample.
    pub fn new(variant: &Variant, increment: f32) -> Self {
        Self {
            phase: 0.0,
            increment,
            eval: variant.eval,
        }
    }

    /// Create an accumulator for a frequency in Hz at a sample rate.
    pub fn with_frequency(variant: &Variant, frequency_hz: f32, sample_rate: f32) -> Self {
        Self::new(variant, frequency_hz / sample_rate)
    }

    /// Current phase in `[0, 1)`
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Cycles advanced per sample
    pub fn increment(&self) -> f32 {
        self.increment
    }

    /// Change the per-sample increment, keeping the current phase.
    pub fn set_increment(&mut self, increment: f32) {
        self.increment = increment;
    }

    /// Jump to a phase. Values outside `[0, 1)` are wrapped.
    pub fn reset(&mut self, phase: f32) {
        self.phase = wrap_phase(phase);
    }

    /// Angle in `[-pi, pi)` equivalent to the current phase
    #[inline]
    pub fn angle(&self) -> f32 {
        if self.phase < 0.5 {
            self.phase * TAU
        } else {
            (self.phase - 1.0) * TAU
        }
    }

    /// Produce one sample and advance the phase.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let out = (self.eval)(self.angle());
        self.phase = wrap_phase(self.phase + self.increment);
        out
    }

    /// Fill a block with consecutive samples.
    pub fn fill(&mut self, output: &mut [f32]) {
        for sample in output.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// Wrap a phase into `[0, 1)` by removing whole cycles.
///
/// Non-finite phases, and magnitudes of `2^23` and above where no fraction
/// is representable, wrap to `0.0`.
#[inline(always)]
pub fn wrap_phase(phase: f32) -> f32 {
    if !phase.is_finite() {
        return 0.0;
    }
    let p = phase - libm::floorf(phase);
    // 1 + tiny negative phase rounds to 1.0
    if p >= 1.0 {
        0.0
    } else {
        p
    }
}
