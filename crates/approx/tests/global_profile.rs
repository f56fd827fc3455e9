//! Process-wide profile installation
//!
//! The installed profile lives for the whole process, so every step runs
//! inside one test in its own binary.

use rigel_approx::{
    install, install_from_env, install_named, installed, AccuracyProfile, ConfigError,
    FunctionFamily, ProfileName, PROFILE_ENV_VAR,
};

/// Test: environment install, first-wins semantics and parse errors
#[test]
fn test_install_lifecycle() {
    assert!(installed().is_none());

    // Parse errors surface before anything is installed
    assert_eq!(
        install_named("nonsense"),
        Err(ConfigError::UnknownProfile {
            name: "nonsense".to_string()
        })
    );
    assert!(installed().is_none());

    std::env::set_var(PROFILE_ENV_VAR, "graphics,sin=njuffa");
    let active = install_from_env().expect("first install succeeds");
    assert_eq!(active.base(), ProfileName::Graphics);
    assert_eq!(active.variant(FunctionFamily::Sin).name, "njuffa");
    assert_eq!(installed(), Some(active));

    assert_eq!(
        install(AccuracyProfile::reference()),
        Err(ConfigError::AlreadyInstalled {
            active: ProfileName::Graphics
        })
    );
    assert_eq!(
        install_named("audio"),
        Err(ConfigError::AlreadyInstalled {
            active: ProfileName::Graphics
        })
    );

    // The first install is unchanged
    let still = installed().expect("profile remains installed");
    assert_eq!(still.to_string(), "graphics,sin=njuffa");
    assert_eq!(still.sin(0.0), 0.0);
}
