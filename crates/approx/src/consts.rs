//! Canonical constants shared by every approximation and conversion
//!
//! Conversions and variants read these values from here and nowhere else, so
//! that `log10` stays numerically tied to `log2` and the pitch formulas agree
//! on their reference tuning.

/// Concert pitch A4 in Hz
pub const A4_HZ: f32 = 440.0;

/// MIDI note number of A4
pub const A4_MIDI: f32 = 69.0;

/// Equal-tempered semitones per octave
pub const SEMITONES_PER_OCTAVE: f32 = 12.0;

/// Decibels per decade of amplitude ratio
pub const DB_PER_DECADE: f32 = 20.0;

/// Lower edge of the normalised frequency range in Hz
pub const NORMALISE_MIN_HZ: f32 = 20.0;

/// Octaves spanned by the normalised frequency range (20 Hz to 20480 Hz)
pub const NORMALISE_OCTAVES: f32 = 10.0;

/// log10(2)
pub const LOG10_2: f32 = core::f32::consts::LOG10_2;

/// log2(10)
pub const LOG2_10: f32 = core::f32::consts::LOG2_10;

/// log2(e)
pub const LOG2_E: f32 = core::f32::consts::LOG2_E;

/// ln(2)
pub const LN_2: f32 = core::f32::consts::LN_2;

/// pi
pub const PI: f32 = core::f32::consts::PI;

/// pi / 2
pub const FRAC_PI_2: f32 = core::f32::consts::FRAC_PI_2;

/// 2 * pi
pub const TAU: f32 = core::f32::consts::TAU;

/// 1 / (2 * pi)
pub const FRAC_1_TAU: f32 = 0.159_154_94;

/// 2 / pi
pub const FRAC_2_PI: f32 = core::f32::consts::FRAC_2_PI;

// Three-part Cody-Waite split of 2*pi. The first part has 8 significant
// bits so `n * TAU_A` is exact for |n| < 2^16.
pub(crate) const TAU_A: f32 = 6.281_25;
pub(crate) const TAU_B: f32 = 0.001_935_307_2;
pub(crate) const TAU_C: f32 = 1.025_337_6e-11;

// Same split for pi / 2.
pub(crate) const FRAC_PI_2_A: f32 = 1.570_312_5;
pub(crate) const FRAC_PI_2_B: f32 = 0.000_483_826_79;
pub(crate) const FRAC_PI_2_C: f32 = 2.563_344_1e-12;
