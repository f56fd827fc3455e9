//! Accuracy tests for the variant catalogue
//!
//! Every variant declares two bounds: the raw error of the primitive over
//! its valid domain, and the worst-case error in the unit callers see
//! (Hz, semitones, dB, or absolute sine error sustained over many periods).
//! These tests re-measure both and fail if a catalogue entry understates
//! its error.

use rigel_approx::probe::{probe, ProbeSummary, SampleGrid};
use rigel_approx::{ErrorUnit, FunctionFamily};

use test_utils::*;

const RAW_GRID_POINTS: usize = 8_193;

// ============================================================================
// Raw Error
// ============================================================================

/// Test: every variant meets its raw bound over its own domain
///
/// pow2 bounds are relative, every other family's are absolute. Both are
/// measured against the family's reference variant.
#[test]
fn test_raw_error_within_declared_bound() {
    for variant in all_variants() {
        let grid = SampleGrid::for_variant(variant, RAW_GRID_POINTS);
        let summary = ProbeSummary::collect(probe(variant, grid));

        assert_eq!(
            summary.non_finite, 0,
            "{}/{} produced non-finite output inside its domain",
            variant.family, variant.name
        );

        let measured = match variant.raw_error.unit {
            ErrorUnit::Relative => summary.max_relative_deviation,
            _ => summary.max_abs_deviation,
        };
        println!(
            "{:>6}/{:<22} raw {:.3e} (bound {})",
            variant.family, variant.name, measured, variant.raw_error
        );
        assert!(
            variant.raw_error.admits(measured),
            "{}/{}: raw error {:.3e} exceeds {} (worst input {})",
            variant.family,
            variant.name,
            measured,
            variant.raw_error,
            summary.worst_input
        );
    }
}

/// Test: the reference variants agree with their own probe exactly
#[test]
fn test_reference_variants_probe_clean() {
    for family in FunctionFamily::ALL {
        let reference = family.reference();
        let summary =
            ProbeSummary::collect(probe(reference, SampleGrid::for_variant(reference, 1_025)));
        assert_eq!(summary.max_abs_deviation, 0.0, "{} reference", family);
        assert_eq!(summary.count, 1_025);
    }
}

// ============================================================================
// Applied Error
// ============================================================================

/// Test: pow2 variants meet their Hz bound through `midi_to_hz`
#[test]
fn test_pow2_hz_error_within_bound() {
    for variant in FunctionFamily::Pow2.variants() {
        let measured = hz_error(variant);
        println!("pow2/{:<22} {:.4} Hz", variant.name, measured);
        assert!(
            measured <= variant.worst_case_error.magnitude as f64,
            "pow2/{}: {:.4} Hz exceeds {}",
            variant.name,
            measured,
            variant.worst_case_error
        );
    }
}

/// Test: log2 variants meet their semitone bound through `hz_to_midi`
#[test]
fn test_log2_semitone_error_within_bound() {
    for variant in FunctionFamily::Log2.variants() {
        let measured = semitone_error(variant);
        println!("log2/{:<20} {:.3e} st", variant.name, measured);
        assert!(
            measured <= variant.worst_case_error.magnitude as f64,
            "log2/{}: {:.3e} semitones exceeds {}",
            variant.name,
            measured,
            variant.worst_case_error
        );
    }
}

/// Test: log10 variants meet their dB bound through `gain_to_db`
#[test]
fn test_log10_db_error_within_bound() {
    for variant in FunctionFamily::Log10.variants() {
        let measured = db_error(variant);
        println!("log10/{:<20} {:.3e} dB", variant.name, measured);
        assert!(
            measured <= variant.worst_case_error.magnitude as f64,
            "log10/{}: {:.3e} dB exceeds {}",
            variant.name,
            measured,
            variant.worst_case_error
        );
    }
}

/// Test: cyclical sin variants hold their bound ten thousand periods out
#[test]
fn test_cyclical_sin_error_sustained() {
    for variant in FunctionFamily::Sin.variants().iter().filter(|v| v.cyclical) {
        let measured = sustained_sin_error(variant);
        println!("sin/{:<20} {:.3e} sustained", variant.name, measured);
        assert!(
            measured <= variant.worst_case_error.magnitude as f64,
            "sin/{}: {:.3e} exceeds {} at up to 10^4 periods",
            variant.name,
            measured,
            variant.worst_case_error
        );
    }
}

// ============================================================================
// log10 Derivation
// ============================================================================

/// Test: every log10 variant is its log2 counterpart times log10(2)
#[test]
fn test_log10_follows_log2() {
    let log10_2 = core::f32::consts::LOG10_2;
    for variant in FunctionFamily::Log10.variants() {
        let log2 = FunctionFamily::Log2
            .find(variant.name)
            .expect("every log10 variant has a log2 counterpart");
        for x in SampleGrid::logarithmic(1e-30, 1e30, 513) {
            assert_eq!(
                variant.call(x),
                log2.call(x) * log10_2,
                "log10/{} at {}",
                variant.name,
                x
            );
        }
    }
}
