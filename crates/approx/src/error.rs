//! Configuration errors
//!
//! Approximations never fail. Errors only come from resolving a profile
//! (unknown names, malformed overrides) or installing the process-wide
//! profile twice, all of which surface at startup.

use alloc::string::String;

use thiserror::Error;

use crate::profile::ProfileName;
use crate::variant::FunctionFamily;

/// Errors raised while selecting an accuracy profile
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The profile name is not one of `audio`, `graphics`, `reference`
    #[error("unknown accuracy profile `{name}` (expected audio, graphics or reference)")]
    UnknownProfile {
        /// Name as supplied
        name: String,
    },

    /// The family name is not one of `pow2`, `log2`, `log10`, `sin`
    #[error("unknown function family `{name}` (expected pow2, log2, log10 or sin)")]
    UnknownFamily {
        /// Name as supplied
        name: String,
    },

    /// A profile override is not of the form `family=variant`
    #[error("malformed profile override `{text}` (expected family=variant)")]
    MalformedOverride {
        /// Override as supplied
        text: String,
    },

    /// No variant with this name exists in the family
    #[error("unknown {family} variant `{name}`")]
    UnknownVariant {
        /// Family searched
        family: FunctionFamily,
        /// Name as supplied
        name: String,
    },

    /// A process-wide profile has already been installed
    #[error("an accuracy profile is already installed (based on `{active}`)")]
    AlreadyInstalled {
        /// Preset the installed profile was built from
        active: ProfileName,
    },
}

/// Result alias for profile configuration
pub type Result<T> = core::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_messages_name_the_offending_input() {
        let err = ConfigError::UnknownVariant {
            family: FunctionFamily::Log2,
            name: "fastest".into(),
        };
        assert_eq!(err.to_string(), "unknown log2 variant `fastest`");

        let err = ConfigError::UnknownProfile { name: "video".into() };
        assert!(err.to_string().contains("`video`"));

        let err = ConfigError::AlreadyInstalled {
            active: ProfileName::Audio,
        };
        assert!(err.to_string().contains("`audio`"));
    }
}
