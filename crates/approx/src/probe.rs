//! Accuracy Probe
//!
//! Produces `(input, approximate, reference)` triples for a variant over a
//! sampling grid, for external benchmarking and plotting tools. Nothing here
//! allocates: grids and probes are lazy iterators and [`ProbeSummary`]
//! folds them in one pass.
//!
//! # Example
//!
//! ```rust
//! use rigel_approx::probe::{probe, ProbeSummary, SampleGrid};
//! use rigel_approx::FunctionFamily;
//!
//! let variant = FunctionFamily::Log2.find("mineiro").unwrap();
//! let summary = ProbeSummary::collect(probe(variant, SampleGrid::logarithmic(1e-3, 1e3, 1000)));
//! assert!(summary.max_abs_deviation <= variant.raw_error.magnitude);
//! ```

use crate::consts::PI;
use crate::variant::{Domain, FunctionFamily, Variant};

/// How grid points are spaced between the endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Equal steps in `x`
    Linear,
    /// Equal steps in `log2(x)`; endpoints must be positive
    Logarithmic,
}

/// Lazily generated, inclusive sampling grid.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    min: f64,
    max: f64,
    count: usize,
    index: usize,
    spacing: Spacing,
}

impl SampleGrid {
    /// `count` evenly spaced points from `min` to `max` inclusive
    pub fn linear(min: f32, max: f32, count: usize) -> Self {
        Self {
            min: min as f64,
            max: max as f64,
            count,
            index: 0,
            spacing: Spacing::Linear,
        }
    }

    /// `count` geometrically spaced points from `min` to `max` inclusive.
    ///
    /// Non-positive endpoints are raised to `f32::MIN_POSITIVE`.
    pub fn logarithmic(min: f32, max: f32, count: usize) -> Self {
        let floor = f32::MIN_POSITIVE as f64;
        Self {
            min: libm::log2((min as f64).max(floor)),
            max: libm::log2((max as f64).max(floor)),
            count,
            index: 0,
            spacing: Spacing::Logarithmic,
        }
    }

    /// Grid suited to a variant's family and domain.
    ///
    /// Log families get a logarithmic grid over their whole domain, pow2 a
    /// linear one, and sin a linear grid over its bounded interval or one
    /// period for cyclical variants.
    pub fn for_variant(variant: &Variant, count: usize) -> Self {
        let (min, max) = match variant.valid_domain {
            Domain::Interval { min, max } => (min, max),
            Domain::Unbounded => (-PI, PI),
        };
        match variant.family {
            FunctionFamily::Log2 | FunctionFamily::Log10 => Self::logarithmic(min, max, count),
            FunctionFamily::Pow2 | FunctionFamily::Sin => Self::linear(min, max, count),
        }
    }

    /// Spacing of this grid
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    fn point(&self, index: usize) -> f32 {
        let t = if self.count <= 1 {
            0.0
        } else {
            index as f64 / (self.count - 1) as f64
        };
        let v = self.min + (self.max - self.min) * t;
        match self.spacing {
            Spacing::Linear => v as f32,
            Spacing::Logarithmic => libm::exp2(v) as f32,
        }
    }
}

impl Iterator for SampleGrid {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.index >= self.count {
            return None;
        }
        let x = self.point(self.index);
        self.index += 1;
        Some(x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SampleGrid {}

/// One probed point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeSample {
    /// Input value
    pub input: f32,
    /// Output of the probed variant
    pub approximate: f32,
    /// Output of the family's reference variant
    pub reference: f32,
}

impl ProbeSample {
    /// `approximate - reference`
    #[inline]
    pub fn deviation(&self) -> f32 {
        self.approximate - self.reference
    }

    /// Deviation relative to `|reference|`, or the plain deviation when the
    /// reference is zero
    #[inline]
    pub fn relative_deviation(&self) -> f32 {
        if self.reference == 0.0 {
            self.deviation()
        } else {
            self.deviation() / libm::fabsf(self.reference)
        }
    }
}

/// Iterator of [`ProbeSample`]s, see [`probe`]
#[derive(Debug, Clone)]
pub struct Probe<I> {
    approximate: fn(f32) -> f32,
    reference: fn(f32) -> f32,
    inputs: I,
}

impl<I: Iterator<Item = f32>> Iterator for Probe<I> {
    type Item = ProbeSample;

    #[inline]
    fn next(&mut self) -> Option<ProbeSample> {
        let input = self.inputs.next()?;
        Some(ProbeSample {
            input,
            approximate: (self.approximate)(input),
            reference: (self.reference)(input),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inputs.size_hint()
    }
}

/// Evaluate `variant` and its family's reference at every input.
pub fn probe<I>(variant: &Variant, inputs: I) -> Probe<I::IntoIter>
where
    I: IntoIterator<Item = f32>,
{
    Probe {
        approximate: variant.eval,
        reference: variant.family.reference().eval,
        inputs: inputs.into_iter(),
    }
}

/// One-pass statistics over probe samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeSummary {
    /// Number of samples
    pub count: usize,
    /// Largest `|deviation|`
    pub max_abs_deviation: f32,
    /// Largest `|relative_deviation|`
    pub max_relative_deviation: f32,
    /// Mean `|deviation|`
    pub mean_abs_deviation: f32,
    /// Input at which `max_abs_deviation` occurred
    pub worst_input: f32,
    /// Number of samples where either output was not finite
    pub non_finite: usize,
}

impl ProbeSummary {
    /// Fold a sequence of samples.
    pub fn collect<I: IntoIterator<Item = ProbeSample>>(samples: I) -> Self {
        let mut summary = Self {
            count: 0,
            max_abs_deviation: 0.0,
            max_relative_deviation: 0.0,
            mean_abs_deviation: 0.0,
            worst_input: f32::NAN,
            non_finite: 0,
        };
        let mut total = 0.0f64;

        for sample in samples {
            summary.count += 1;
            if !sample.approximate.is_finite() || !sample.reference.is_finite() {
                summary.non_finite += 1;
                continue;
            }
            let abs = libm::fabsf(sample.deviation());
            total += abs as f64;
            if abs > summary.max_abs_deviation || summary.worst_input.is_nan() {
                summary.max_abs_deviation = abs;
                summary.worst_input = sample.input;
            }
            summary.max_relative_deviation =
                summary.max_relative_deviation.max(libm::fabsf(sample.relative_deviation()));
        }

        let finite = summary.count - summary.non_finite;
        if finite > 0 {
            summary.mean_abs_deviation = (total / finite as f64) as f32;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_grid_hits_both_endpoints() {
        let mut grid = SampleGrid::linear(-1.0, 1.0, 5);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid.next(), Some(-1.0));
        assert_eq!(grid.next(), Some(-0.5));
        assert_eq!(grid.nth(2), Some(1.0));
        assert_eq!(grid.next(), None);
    }

    #[test]
    fn test_logarithmic_grid_is_geometric() {
        let mut grid = SampleGrid::logarithmic(1.0, 1024.0, 11);
        for e in 0..=10 {
            assert_eq!(grid.next(), Some(libm::exp2f(e as f32)));
        }
        assert_eq!(grid.next(), None);
    }

    #[test]
    fn test_single_point_grid() {
        let mut grid = SampleGrid::linear(3.0, 7.0, 1);
        assert_eq!(grid.next(), Some(3.0));
        assert_eq!(grid.next(), None);
        assert_eq!(SampleGrid::linear(0.0, 1.0, 0).count(), 0);
    }

    #[test]
    fn test_reference_probe_has_zero_deviation() {
        let reference = FunctionFamily::Sin.reference();
        let summary = ProbeSummary::collect(probe(reference, SampleGrid::for_variant(reference, 257)));
        assert_eq!(summary.count, 257);
        assert_eq!(summary.max_abs_deviation, 0.0);
        assert_eq!(summary.non_finite, 0);
    }

    #[test]
    fn test_summary_tracks_worst_input() {
        let samples = [
            ProbeSample { input: 1.0, approximate: 1.0, reference: 1.0 },
            ProbeSample { input: 2.0, approximate: 2.5, reference: 2.0 },
            ProbeSample { input: 3.0, approximate: 2.9, reference: 3.0 },
        ];
        let summary = ProbeSummary::collect(samples);
        assert_eq!(summary.worst_input, 2.0);
        assert_eq!(summary.max_abs_deviation, 0.5);
        assert!((summary.mean_abs_deviation - 0.2).abs() < 1e-6);
        assert_eq!(summary.max_relative_deviation, 0.25);
    }

    #[test]
    fn test_for_variant_respects_domain() {
        let bhaskara = FunctionFamily::Sin.find("bhaskara").unwrap();
        let grid = SampleGrid::for_variant(bhaskara, 100);
        assert!(grid.clone().all(|x| x >= 0.0 && x <= core::f32::consts::PI));

        let log = FunctionFamily::Log2.reference();
        let mut grid = SampleGrid::for_variant(log, 3);
        assert_eq!(grid.spacing(), Spacing::Logarithmic);
        assert_eq!(grid.next(), Some(f32::MIN_POSITIVE));
    }
}
