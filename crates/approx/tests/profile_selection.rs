//! Profile selection tests
//!
//! Presets, textual overrides, builder overrides and configuration errors.

use rigel_approx::{AccuracyProfile, ConfigError, FunctionFamily, ProfileName};

use test_utils::*;

fn names(profile: &AccuracyProfile) -> [&'static str; 4] {
    FunctionFamily::ALL.map(|family| profile.variant(family).name)
}

/// Test: each preset binds the documented variants
#[test]
fn test_preset_bindings() {
    assert_eq!(
        names(&AccuracyProfile::audio()),
        ["mineiro", "mineiro", "mineiro", "mineiro_full"]
    );
    assert_eq!(
        names(&AccuracyProfile::graphics()),
        ["mineiro_faster", "ankerl32", "ankerl32", "mineiro_faster"]
    );
    assert_eq!(
        names(&AccuracyProfile::reference()),
        ["reference", "reference", "reference", "reference"]
    );
    assert_eq!(AccuracyProfile::default(), AccuracyProfile::audio());
}

/// Test: a profile's primitives are exactly its variants
#[test]
fn test_profile_dispatches_to_bound_variants() {
    for name in ProfileName::ALL {
        let profile = AccuracyProfile::new(name);
        for x in [0.1f32, 0.5, 1.0, 3.7, 440.0] {
            assert_eq!(profile.pow2(x), profile.variant(FunctionFamily::Pow2).call(x));
            assert_eq!(profile.log2(x), profile.variant(FunctionFamily::Log2).call(x));
            assert_eq!(profile.log10(x), profile.variant(FunctionFamily::Log10).call(x));
            assert_eq!(profile.sin(x), profile.variant(FunctionFamily::Sin).call(x));
        }
    }
}

/// Test: preset names parse case-insensitively with surrounding whitespace
#[test]
fn test_preset_names_parse() {
    for (text, expected) in [
        ("audio", ProfileName::Audio),
        ("  Graphics ", ProfileName::Graphics),
        ("REFERENCE", ProfileName::Reference),
    ] {
        assert_eq!(text.parse::<ProfileName>(), Ok(expected));
        assert_eq!(AccuracyProfile::from_name(text), Ok(AccuracyProfile::new(expected)));
    }
}

/// Test: overrides replace exactly one family each
#[test]
fn test_textual_overrides() {
    let profile: AccuracyProfile = "audio, sin = njuffa, log2=jenkas".parse().unwrap();
    assert_eq!(profile.base(), ProfileName::Audio);
    assert!(profile.is_customised());
    assert_eq!(names(&profile), ["mineiro", "jenkas", "mineiro", "njuffa"]);
    assert_eq!(profile.to_string(), "audio,log2=jenkas,sin=njuffa");
}

/// Test: a profile survives formatting and parsing unchanged
#[test]
fn test_display_round_trip() {
    let built = AccuracyProfile::builder(ProfileName::Graphics)
        .variant(FunctionFamily::Pow2, "ekmett_better_precise")
        .unwrap()
        .variant(FunctionFamily::Log10, "njuffa_faster")
        .unwrap()
        .build();
    let parsed: AccuracyProfile = built.to_string().parse().unwrap();
    assert_eq!(parsed, built);
    assert_eq!(names(&parsed), names(&built));

    for name in ProfileName::ALL {
        let preset = AccuracyProfile::new(name);
        assert_eq!(preset.to_string(), name.as_str());
        assert!(!preset.is_customised());
    }
}

/// Test: builder accepts catalogue entries directly
#[test]
fn test_builder_with_catalogue_entry() {
    for variant in all_variants() {
        let profile = AccuracyProfile::builder(ProfileName::Reference)
            .with(variant)
            .build();
        assert_eq!(profile.variant(variant.family), variant);
        for family in FunctionFamily::ALL.into_iter().filter(|f| *f != variant.family) {
            assert!(profile.variant(family).is_reference(), "{} leaked into {}", variant.name, family);
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Test: unknown names are reported, never silently defaulted
#[test]
fn test_configuration_errors() {
    assert_eq!(
        "fastest".parse::<AccuracyProfile>(),
        Err(ConfigError::UnknownProfile {
            name: "fastest".to_string()
        })
    );
    assert_eq!(
        "audio,tan=juha".parse::<AccuracyProfile>(),
        Err(ConfigError::UnknownFamily {
            name: "tan".to_string()
        })
    );
    assert_eq!(
        "audio,sin".parse::<AccuracyProfile>(),
        Err(ConfigError::MalformedOverride {
            text: "sin".to_string()
        })
    );
    assert_eq!(
        "audio,sin=cordic".parse::<AccuracyProfile>(),
        Err(ConfigError::UnknownVariant {
            family: FunctionFamily::Sin,
            name: "cordic".to_string()
        })
    );
    assert!(AccuracyProfile::builder(ProfileName::Audio)
        .variant(FunctionFamily::Log10, "lanceputnam_gamma")
        .is_err());
    assert!(AccuracyProfile::from_name("").is_err());
}

/// Test: error messages name the offending input
#[test]
fn test_error_messages() {
    let err = "audio,pow2=turbo".parse::<AccuracyProfile>().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("pow2"), "{}", message);
    assert!(message.contains("turbo"), "{}", message);
}

/// Test: empty override segments are ignored
#[test]
fn test_trailing_commas_are_ignored() {
    let profile: AccuracyProfile = "reference,,sin=pade,".parse().unwrap();
    assert_eq!(profile.variant(FunctionFamily::Sin).name, "pade");
}
