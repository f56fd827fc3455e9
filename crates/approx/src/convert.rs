//! Audio and graphics conversions
//!
//! Fixed formulas composed from the primitives of an [`AccuracyProfile`].
//! Each conversion is available both as a free function taking the profile
//! explicitly and as a method on the profile. The error of a conversion is
//! the error of the bound primitive propagated through the formula; the
//! per-variant bounds in the catalogue are measured through exactly these
//! functions.
//!
//! # Example
//!
//! ```rust
//! use rigel_approx::AccuracyProfile;
//!
//! let audio = AccuracyProfile::audio();
//! let note = audio.hz_to_midi(440.0);
//! assert!((note - 69.0).abs() < 0.0015);
//!
//! let hz = audio.midi_to_hz(81.0);
//! assert!((hz - 880.0).abs() < 0.1);
//! ```

use crate::consts::{
    A4_HZ, A4_MIDI, DB_PER_DECADE, FRAC_PI_2, LN_2, LOG2_10, LOG2_E, NORMALISE_MIN_HZ,
    NORMALISE_OCTAVES, SEMITONES_PER_OCTAVE,
};
use crate::profile::AccuracyProfile;

/// Frequency in Hz to (fractional) MIDI note number.
///
/// `69 + 12 * log2(hz / 440)`
#[inline]
pub fn hz_to_midi(profile: &AccuracyProfile, hz: f32) -> f32 {
    A4_MIDI + profile.log2(hz / A4_HZ) * SEMITONES_PER_OCTAVE
}

/// MIDI note number to frequency in Hz.
///
/// `440 * 2^((midi - 69) / 12)`
#[inline]
pub fn midi_to_hz(profile: &AccuracyProfile, midi: f32) -> f32 {
    A4_HZ * profile.pow2((midi - A4_MIDI) / SEMITONES_PER_OCTAVE)
}

/// Linear amplitude to decibels.
///
/// `20 * log10(gain)`. Non-positive gain follows the log domain policy and
/// yields the floor of about -758 dB rather than negative infinity.
#[inline]
pub fn gain_to_db(profile: &AccuracyProfile, gain: f32) -> f32 {
    profile.log10(gain) * DB_PER_DECADE
}

/// Decibels to linear amplitude.
///
/// `2^((db / 20) * log2(10))`
#[inline]
pub fn db_to_gain(profile: &AccuracyProfile, db: f32) -> f32 {
    profile.pow2((db / DB_PER_DECADE) * LOG2_10)
}

/// Frequency in Hz to a normalised position, 0 at 20 Hz and 1 at 20480 Hz.
///
/// `log2(hz / 20) / 10`
#[inline]
pub fn normalise_hz(profile: &AccuracyProfile, hz: f32) -> f32 {
    profile.log2(hz / NORMALISE_MIN_HZ) / NORMALISE_OCTAVES
}

/// Inverse of [`normalise_hz`].
///
/// `20 * 2^(n * 10)`
#[inline]
pub fn denormalise_hz(profile: &AccuracyProfile, normalised: f32) -> f32 {
    NORMALISE_MIN_HZ * profile.pow2(normalised * NORMALISE_OCTAVES)
}

/// Frequency ratio to an offset in semitones.
///
/// `12 * log2(ratio)`
#[inline]
pub fn ratio_to_midi_offset(profile: &AccuracyProfile, ratio: f32) -> f32 {
    profile.log2(ratio) * SEMITONES_PER_OCTAVE
}

/// Semitone offset to a frequency ratio, the inverse of
/// [`ratio_to_midi_offset`].
#[inline]
pub fn midi_offset_to_ratio(profile: &AccuracyProfile, semitones: f32) -> f32 {
    profile.pow2(semitones / SEMITONES_PER_OCTAVE)
}

/// `e^x` as `2^(x * log2(e))`
#[inline]
pub fn exp(profile: &AccuracyProfile, x: f32) -> f32 {
    profile.pow2(x * LOG2_E)
}

/// Natural logarithm as `log2(x) * ln(2)`
#[inline]
pub fn ln(profile: &AccuracyProfile, x: f32) -> f32 {
    profile.log2(x) * LN_2
}

/// `10^x` as `2^(x * log2(10))`
#[inline]
pub fn exp10(profile: &AccuracyProfile, x: f32) -> f32 {
    profile.pow2(x * LOG2_10)
}

/// `base^exponent` as `2^(exponent * log2(base))`, for positive `base`
#[inline]
pub fn powf(profile: &AccuracyProfile, base: f32, exponent: f32) -> f32 {
    profile.pow2(exponent * profile.log2(base))
}

/// Cosine as `sin(pi/2 - |x|)`.
///
/// For `x` in `[-pi, pi]` the argument stays inside `[-pi/2, pi/2]`, so
/// every bounded sin variant with a symmetric domain remains accurate.
#[inline]
pub fn cos(profile: &AccuracyProfile, x: f32) -> f32 {
    profile.sin(FRAC_PI_2 - libm::fabsf(x))
}

/// Square root as `2^(log2(x) / 2)`; zero, negative and NaN input give `0.0`
#[inline]
pub fn sqrt(profile: &AccuracyProfile, x: f32) -> f32 {
    if x > 0.0 {
        profile.pow2(0.5 * profile.log2(x))
    } else {
        0.0
    }
}

/// Hyperbolic tangent as `2 / (1 + e^(-2x)) - 1`.
///
/// The pow2 clamp saturates `e^(-2x)` at both ends, so the result settles
/// on `-1` and `1` instead of overflowing.
#[inline]
pub fn tanh(profile: &AccuracyProfile, x: f32) -> f32 {
    2.0 / (1.0 + profile.pow2(-2.0 * LOG2_E * x)) - 1.0
}

impl AccuracyProfile {
    /// See [`hz_to_midi`]
    #[inline]
    pub fn hz_to_midi(&self, hz: f32) -> f32 {
        hz_to_midi(self, hz)
    }

    /// See [`midi_to_hz`]
    #[inline]
    pub fn midi_to_hz(&self, midi: f32) -> f32 {
        midi_to_hz(self, midi)
    }

    /// See [`gain_to_db`]
    #[inline]
    pub fn gain_to_db(&self, gain: f32) -> f32 {
        gain_to_db(self, gain)
    }

    /// See [`db_to_gain`]
    #[inline]
    pub fn db_to_gain(&self, db: f32) -> f32 {
        db_to_gain(self, db)
    }

    /// See [`normalise_hz`]
    #[inline]
    pub fn normalise_hz(&self, hz: f32) -> f32 {
        normalise_hz(self, hz)
    }

    /// See [`denormalise_hz`]
    #[inline]
    pub fn denormalise_hz(&self, normalised: f32) -> f32 {
        denormalise_hz(self, normalised)
    }

    /// See [`ratio_to_midi_offset`]
    #[inline]
    pub fn ratio_to_midi_offset(&self, ratio: f32) -> f32 {
        ratio_to_midi_offset(self, ratio)
    }

    /// See [`midi_offset_to_ratio`]
    #[inline]
    pub fn midi_offset_to_ratio(&self, semitones: f32) -> f32 {
        midi_offset_to_ratio(self, semitones)
    }

    /// See [`exp`]
    #[inline]
    pub fn exp(&self, x: f32) -> f32 {
        exp(self, x)
    }

    /// See [`ln`]
    #[inline]
    pub fn ln(&self, x: f32) -> f32 {
        ln(self, x)
    }

    /// See [`exp10`]
    #[inline]
    pub fn exp10(&self, x: f32) -> f32 {
        exp10(self, x)
    }

    /// See [`powf`]
    #[inline]
    pub fn powf(&self, base: f32, exponent: f32) -> f32 {
        powf(self, base, exponent)
    }

    /// See [`cos`]
    #[inline]
    pub fn cos(&self, x: f32) -> f32 {
        cos(self, x)
    }

    /// See [`sqrt`]
    #[inline]
    pub fn sqrt(&self, x: f32) -> f32 {
        sqrt(self, x)
    }

    /// See [`tanh`]
    #[inline]
    pub fn tanh(&self, x: f32) -> f32 {
        tanh(self, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_anchor_points_are_exact() {
        let p = AccuracyProfile::reference();
        assert_eq!(p.hz_to_midi(440.0), 69.0);
        assert_eq!(p.midi_to_hz(69.0), 440.0);
        assert_eq!(p.gain_to_db(1.0), 0.0);
        assert_eq!(p.db_to_gain(0.0), 1.0);
        assert_eq!(p.normalise_hz(20.0), 0.0);
        assert_eq!(p.denormalise_hz(0.0), 20.0);
        assert_eq!(p.denormalise_hz(1.0), 20_480.0);
        assert_eq!(p.ratio_to_midi_offset(2.0), 12.0);
        assert_eq!(p.midi_offset_to_ratio(12.0), 2.0);
    }

    #[test]
    fn test_octaves_and_decades() {
        let p = AccuracyProfile::reference();
        assert_eq!(p.hz_to_midi(880.0), 81.0);
        assert_eq!(p.midi_to_hz(57.0), 220.0);
        assert!((p.gain_to_db(10.0) - 20.0).abs() < 1e-5);
        assert!((p.gain_to_db(0.5) + 6.020_6).abs() < 1e-4);
        assert!((p.db_to_gain(-20.0) - 0.1).abs() < 1e-7);
    }

    #[test]
    fn test_derived_functions() {
        let p = AccuracyProfile::reference();
        assert!((p.exp(1.0) - core::f32::consts::E).abs() < 1e-6);
        assert!((p.ln(core::f32::consts::E) - 1.0).abs() < 1e-6);
        assert!((p.exp10(2.0) - 100.0).abs() < 1e-4);
        assert!((p.powf(3.0, 2.0) - 9.0).abs() < 1e-5);
        assert!((p.cos(0.0) - 1.0).abs() < 1e-7);
        assert!((p.cos(core::f32::consts::PI) + 1.0).abs() < 1e-6);
        assert!((p.cos(-core::f32::consts::FRAC_PI_3) - 0.5).abs() < 1e-6);
        assert_eq!(p.sqrt(4.0), 2.0);
        assert!((p.sqrt(2.0) - core::f32::consts::SQRT_2).abs() < 1e-6);
        assert_eq!(p.tanh(0.0), 0.0);
        assert!((p.tanh(0.5) - 0.462_117_16).abs() < 1e-6);
    }

    #[test]
    fn test_free_functions_match_methods() {
        let p = AccuracyProfile::graphics();
        assert_eq!(hz_to_midi(&p, 1234.5), p.hz_to_midi(1234.5));
        assert_eq!(db_to_gain(&p, -12.0), p.db_to_gain(-12.0));
    }

    #[test]
    fn test_non_positive_gain_is_finite() {
        for profile in [AccuracyProfile::audio(), AccuracyProfile::reference()] {
            let floor = profile.gain_to_db(0.0);
            assert!(floor.is_finite() && floor < -750.0, "{:?}: {}", profile, floor);
            assert_eq!(profile.gain_to_db(-1.0), floor);
        }
    }
}
