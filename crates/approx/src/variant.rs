//! Variant catalogue records
//!
//! A [`Variant`] is one concrete approximation algorithm for one
//! [`FunctionFamily`]. Every variant exposes the same `fn(f32) -> f32`
//! signature so profiles, probes and callers can treat them uniformly.

use core::fmt;

use crate::{log10, log2, pow2, sin};

/// The function being approximated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionFamily {
    /// `2^x`
    Pow2,
    /// `log2(x)` for positive `x`
    Log2,
    /// `log10(x)` for positive `x`, always derived from `Log2`
    Log10,
    /// `sin(x)` in radians
    Sin,
}

impl FunctionFamily {
    /// All families in catalogue order
    pub const ALL: [FunctionFamily; 4] = [
        FunctionFamily::Pow2,
        FunctionFamily::Log2,
        FunctionFamily::Log10,
        FunctionFamily::Sin,
    ];

    /// Lowercase family name
    pub const fn as_str(self) -> &'static str {
        match self {
            FunctionFamily::Pow2 => "pow2",
            FunctionFamily::Log2 => "log2",
            FunctionFamily::Log10 => "log10",
            FunctionFamily::Sin => "sin",
        }
    }

    /// Every variant of this family. The first entry is always `reference`.
    pub fn variants(self) -> &'static [Variant] {
        match self {
            FunctionFamily::Pow2 => pow2::VARIANTS,
            FunctionFamily::Log2 => log2::VARIANTS,
            FunctionFamily::Log10 => log10::VARIANTS,
            FunctionFamily::Sin => sin::VARIANTS,
        }
    }

    /// The libm-backed reference variant of this family
    pub fn reference(self) -> &'static Variant {
        &self.variants()[0]
    }

    /// Look up a variant by name.
    pub fn find(self, name: &str) -> Option<&'static Variant> {
        self.variants().iter().find(|v| v.name == name)
    }

    /// Unit of [`Variant::worst_case_error`] for this family
    pub const fn error_unit(self) -> ErrorUnit {
        match self {
            FunctionFamily::Pow2 => ErrorUnit::Hertz,
            FunctionFamily::Log2 => ErrorUnit::Semitones,
            FunctionFamily::Log10 => ErrorUnit::Decibels,
            FunctionFamily::Sin => ErrorUnit::Absolute,
        }
    }
}

impl fmt::Display for FunctionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit an [`ErrorBound`] is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorUnit {
    /// `|approx - exact| / |exact|`
    Relative,
    /// `|approx - exact|` in the function's own output unit
    Absolute,
    /// Frequency error of `midi_to_hz` over 1 Hz to 20 kHz
    Hertz,
    /// Pitch error of `hz_to_midi` over 1 Hz to 20 kHz
    Semitones,
    /// Level error of `gain_to_db` over -84 dB to +12 dB
    Decibels,
}

impl ErrorUnit {
    /// Short unit suffix used in log output
    pub const fn symbol(self) -> &'static str {
        match self {
            ErrorUnit::Relative => "rel",
            ErrorUnit::Absolute => "abs",
            ErrorUnit::Hertz => "Hz",
            ErrorUnit::Semitones => "st",
            ErrorUnit::Decibels => "dB",
        }
    }
}

/// A documented worst-case deviation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBound {
    /// Largest deviation observed over the measurement range
    pub magnitude: f32,
    /// Unit of `magnitude`
    pub unit: ErrorUnit,
}

impl ErrorBound {
    /// Create a bound
    pub const fn new(magnitude: f32, unit: ErrorUnit) -> Self {
        Self { magnitude, unit }
    }

    /// Whether a measured deviation (already in this bound's unit) is
    /// within the bound
    #[inline]
    pub fn admits(&self, deviation: f32) -> bool {
        libm::fabsf(deviation) <= self.magnitude
    }
}

impl fmt::Display for ErrorBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:e} {}", self.magnitude, self.unit.symbol())
    }
}

/// Input range over which a variant meets its error bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    /// Closed interval `[min, max]`
    Interval {
        /// Inclusive lower edge
        min: f32,
        /// Inclusive upper edge
        max: f32,
    },
    /// Any finite input, with accuracy sustained by internal range reduction
    Unbounded,
}

impl Domain {
    /// Closed interval helper
    pub const fn interval(min: f32, max: f32) -> Self {
        Domain::Interval { min, max }
    }

    /// Whether `x` lies inside the domain. NaN is never contained.
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        match *self {
            Domain::Interval { min, max } => x >= min && x <= max,
            Domain::Unbounded => x.is_finite(),
        }
    }

    /// Clamp `x` into the domain. NaN maps to the lower edge of an interval.
    #[inline(always)]
    pub fn clamp(&self, x: f32) -> f32 {
        match *self {
            Domain::Interval { min, max } => x.max(min).min(max),
            Domain::Unbounded => x,
        }
    }

    /// `(min, max)` of an interval, `None` when unbounded
    pub fn bounds(&self) -> Option<(f32, f32)> {
        match *self {
            Domain::Interval { min, max } => Some((min, max)),
            Domain::Unbounded => None,
        }
    }
}

/// One approximation algorithm for one function family.
///
/// Catalogue entries are `'static` and immutable; a profile holds references
/// to them and copies `eval` out for the hot path.
#[derive(Clone, Copy)]
pub struct Variant {
    /// Name, unique within the family
    pub name: &'static str,
    /// Owning family
    pub family: FunctionFamily,
    /// Speed relative to the reference call (informational, `None` when
    /// no measurement exists)
    pub speed_multiplier: Option<f32>,
    /// Worst-case error in the family's applied unit (see
    /// [`FunctionFamily::error_unit`])
    pub worst_case_error: ErrorBound,
    /// Error of the primitive itself over `valid_domain` (relative for pow2,
    /// absolute otherwise; one period for cyclical sin)
    pub raw_error: ErrorBound,
    /// Input range over which the bounds hold
    pub valid_domain: Domain,
    /// Whether the variant folds periodic input into one period itself
    pub cyclical: bool,
    /// The approximation
    pub eval: fn(f32) -> f32,
}

impl Variant {
    /// Evaluate the approximation
    #[inline(always)]
    pub fn call(&self, x: f32) -> f32 {
        (self.eval)(x)
    }

    /// Whether this is the family's libm-backed reference
    pub fn is_reference(&self) -> bool {
        self.name == "reference"
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("name", &self.name)
            .field("family", &self.family)
            .field("speed_multiplier", &self.speed_multiplier)
            .field("worst_case_error", &self.worst_case_error)
            .field("raw_error", &self.raw_error)
            .field("valid_domain", &self.valid_domain)
            .field("cyclical", &self.cyclical)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family && self.name == other.name
    }
}
