//! Accuracy Profile Selection
//!
//! An [`AccuracyProfile`] binds exactly one variant per function family.
//! It is resolved once, at startup, from a named preset plus optional
//! per-family overrides, and after that is an immutable `Copy` value holding
//! plain function pointers. Conversions never look a variant up by name on
//! the hot path.
//!
//! # Presets
//!
//! | preset | pow2 | log2 / log10 | sin |
//! |--------|------|--------------|-----|
//! | `audio` | `mineiro` | `mineiro` | `mineiro_full` |
//! | `graphics` | `mineiro_faster` | `ankerl32` | `mineiro_faster` |
//! | `reference` | `reference` | `reference` | `reference` |
//!
//! # Textual Form
//!
//! A profile parses from a preset name optionally followed by
//! comma-separated `family=variant` overrides:
//!
//! ```rust
//! use rigel_approx::{AccuracyProfile, FunctionFamily};
//!
//! let profile: AccuracyProfile = "audio, sin=njuffa".parse().unwrap();
//! assert_eq!(profile.variant(FunctionFamily::Sin).name, "njuffa");
//! assert_eq!(profile.variant(FunctionFamily::Pow2).name, "mineiro");
//! ```

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::error::{ConfigError, Result};
use crate::variant::{FunctionFamily, Variant};

type ScalarFn = fn(f32) -> f32;

/// Named accuracy presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProfileName {
    /// Pitch-accurate to a few cents, a few times faster than libm
    #[default]
    Audio,
    /// Pixel-accurate, fastest bit tricks
    Graphics,
    /// libm everywhere
    Reference,
}

impl ProfileName {
    /// All presets
    pub const ALL: [ProfileName; 3] = [
        ProfileName::Audio,
        ProfileName::Graphics,
        ProfileName::Reference,
    ];

    /// Lowercase preset name
    pub const fn as_str(self) -> &'static str {
        match self {
            ProfileName::Audio => "audio",
            ProfileName::Graphics => "graphics",
            ProfileName::Reference => "reference",
        }
    }

    /// Variant names for pow2, log2, log10 and sin, in that order
    const fn selections(self) -> [&'static str; 4] {
        match self {
            ProfileName::Audio => ["mineiro", "mineiro", "mineiro", "mineiro_full"],
            ProfileName::Graphics => ["mineiro_faster", "ankerl32", "ankerl32", "mineiro_faster"],
            ProfileName::Reference => ["reference", "reference", "reference", "reference"],
        }
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        ProfileName::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownProfile {
                name: name.to_string(),
            })
    }
}

impl FromStr for FunctionFamily {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        FunctionFamily::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownFamily {
                name: name.to_string(),
            })
    }
}

/// Look up a preset's variant. Every preset name is covered by tests, the
/// reference fallback only guards against catalogue edits.
fn preset_variant(family: FunctionFamily, name: &str) -> &'static Variant {
    family.find(name).unwrap_or_else(|| family.reference())
}

/// One resolved variant per function family.
///
/// Copying a profile copies four references and four function pointers;
/// evaluating through it is a single indirect call.
#[derive(Clone, Copy)]
pub struct AccuracyProfile {
    base: ProfileName,
    customised: bool,

    pow2: &'static Variant,
    log2: &'static Variant,
    log10: &'static Variant,
    sin: &'static Variant,

    // Hot-path copies of the variants' eval pointers
    pow2_fn: ScalarFn,
    log2_fn: ScalarFn,
    log10_fn: ScalarFn,
    sin_fn: ScalarFn,
}

impl AccuracyProfile {
    /// Resolve a preset.
    pub fn new(name: ProfileName) -> Self {
        let [pow2, log2, log10, sin] = name.selections();
        let pow2 = preset_variant(FunctionFamily::Pow2, pow2);
        let log2 = preset_variant(FunctionFamily::Log2, log2);
        let log10 = preset_variant(FunctionFamily::Log10, log10);
        let sin = preset_variant(FunctionFamily::Sin, sin);

        log::debug!(
            "resolved accuracy profile {}: pow2={} log2={} log10={} sin={}",
            name,
            pow2.name,
            log2.name,
            log10.name,
            sin.name
        );

        Self {
            base: name,
            customised: false,
            pow2,
            log2,
            log10,
            sin,
            pow2_fn: pow2.eval,
            log2_fn: log2.eval,
            log10_fn: log10.eval,
            sin_fn: sin.eval,
        }
    }

    /// `audio` preset
    pub fn audio() -> Self {
        Self::new(ProfileName::Audio)
    }

    /// `graphics` preset
    pub fn graphics() -> Self {
        Self::new(ProfileName::Graphics)
    }

    /// `reference` preset
    pub fn reference() -> Self {
        Self::new(ProfileName::Reference)
    }

    /// Resolve a preset by name.
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse::<ProfileName>().map(Self::new).map_err(|err| {
            log::warn!("{}", err);
            err
        })
    }

    /// Start from a preset and override individual families.
    pub fn builder(base: ProfileName) -> ProfileBuilder {
        ProfileBuilder {
            profile: Self::new(base),
        }
    }

    /// Preset this profile was built from
    pub fn base(&self) -> ProfileName {
        self.base
    }

    /// Whether any family was overridden after the preset was applied
    pub fn is_customised(&self) -> bool {
        self.customised
    }

    /// Variant bound for a family
    pub fn variant(&self, family: FunctionFamily) -> &'static Variant {
        match family {
            FunctionFamily::Pow2 => self.pow2,
            FunctionFamily::Log2 => self.log2,
            FunctionFamily::Log10 => self.log10,
            FunctionFamily::Sin => self.sin,
        }
    }

    /// `2^x` through the bound variant
    #[inline(always)]
    pub fn pow2(&self, x: f32) -> f32 {
        (self.pow2_fn)(x)
    }

    /// `log2(x)` through the bound variant
    #[inline(always)]
    pub fn log2(&self, x: f32) -> f32 {
        (self.log2_fn)(x)
    }

    /// `log10(x)` through the bound variant
    #[inline(always)]
    pub fn log10(&self, x: f32) -> f32 {
        (self.log10_fn)(x)
    }

    /// `sin(x)` through the bound variant
    #[inline(always)]
    pub fn sin(&self, x: f32) -> f32 {
        (self.sin_fn)(x)
    }

    fn bind(&mut self, variant: &'static Variant) {
        match variant.family {
            FunctionFamily::Pow2 => {
                self.pow2 = variant;
                self.pow2_fn = variant.eval;
            }
            FunctionFamily::Log2 => {
                self.log2 = variant;
                self.log2_fn = variant.eval;
            }
            FunctionFamily::Log10 => {
                self.log10 = variant;
                self.log10_fn = variant.eval;
            }
            FunctionFamily::Sin => {
                self.sin = variant;
                self.sin_fn = variant.eval;
            }
        }
        self.customised = true;
    }
}

impl Default for AccuracyProfile {
    fn default() -> Self {
        Self::new(ProfileName::default())
    }
}

impl PartialEq for AccuracyProfile {
    fn eq(&self, other: &Self) -> bool {
        FunctionFamily::ALL
            .into_iter()
            .all(|f| self.variant(f) == other.variant(f))
    }
}

impl fmt::Debug for AccuracyProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccuracyProfile")
            .field("base", &self.base)
            .field("customised", &self.customised)
            .field("pow2", &self.pow2.name)
            .field("log2", &self.log2.name)
            .field("log10", &self.log10.name)
            .field("sin", &self.sin.name)
            .finish()
    }
}

impl fmt::Display for AccuracyProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.as_str())?;
        for family in FunctionFamily::ALL {
            let variant = self.variant(family);
            if preset_variant(family, self.base.selections()[family_index(family)]) != variant {
                write!(f, ",{}={}", family, variant.name)?;
            }
        }
        Ok(())
    }
}

const fn family_index(family: FunctionFamily) -> usize {
    match family {
        FunctionFamily::Pow2 => 0,
        FunctionFamily::Log2 => 1,
        FunctionFamily::Log10 => 2,
        FunctionFamily::Sin => 3,
    }
}

impl FromStr for AccuracyProfile {
    type Err = ConfigError;

    /// Parse `preset[,family=variant]*`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(',');
        let base = parts.next().unwrap_or_default().parse::<ProfileName>()?;
        let mut builder = Self::builder(base);
        for part in parts.map(str::trim).filter(|p| !p.is_empty()) {
            let (family, name) = part.split_once('=').ok_or_else(|| ConfigError::MalformedOverride {
                text: part.to_string(),
            })?;
            builder = builder.variant(family.parse()?, name.trim())?;
        }
        Ok(builder.build())
    }
}

/// Per-family overrides on top of a preset
#[derive(Debug, Clone, Copy)]
pub struct ProfileBuilder {
    profile: AccuracyProfile,
}

impl ProfileBuilder {
    /// Bind the named variant for `family`.
    pub fn variant(mut self, family: FunctionFamily, name: &str) -> Result<Self> {
        let Some(variant) = family.find(name) else {
            let err = ConfigError::UnknownVariant {
                family,
                name: name.to_string(),
            };
            log::warn!("{}", err);
            return Err(err);
        };
        self.profile.bind(variant);
        Ok(self)
    }

    /// Bind a catalogue entry directly.
    pub fn with(mut self, variant: &'static Variant) -> Self {
        self.profile.bind(variant);
        self
    }

    /// Finish the profile.
    pub fn build(self) -> AccuracyProfile {
        self.profile
    }
}

#[cfg(feature = "std")]
pub use global::{install, install_from_env, install_named, installed, PROFILE_ENV_VAR};

#[cfg(feature = "std")]
mod global {
    use std::sync::OnceLock;

    use super::{AccuracyProfile, ProfileName};
    use crate::error::{ConfigError, Result};

    /// Environment variable read by [`install_from_env`]
    pub const PROFILE_ENV_VAR: &str = "RIGEL_APPROX_PROFILE";

    static INSTALLED: OnceLock<AccuracyProfile> = OnceLock::new();

    /// Install the process-wide profile. The first install wins.
    ///
    /// Library code should take a profile argument instead; this holder
    /// exists for applications that configure once at startup.
    pub fn install(profile: AccuracyProfile) -> Result<&'static AccuracyProfile> {
        let mut fresh = false;
        let active = INSTALLED.get_or_init(|| {
            fresh = true;
            profile
        });

        if fresh {
            log::info!(
                "installed accuracy profile `{}` (pow2={}, log2={}, log10={}, sin={})",
                active,
                active.pow2.name,
                active.log2.name,
                active.log10.name,
                active.sin.name
            );
            Ok(active)
        } else {
            let err = ConfigError::AlreadyInstalled {
                active: active.base(),
            };
            log::warn!("{}", err);
            Err(err)
        }
    }

    /// Parse and install a profile (`preset[,family=variant]*`).
    pub fn install_named(text: &str) -> Result<&'static AccuracyProfile> {
        install(text.parse()?)
    }

    /// Install the profile named by [`PROFILE_ENV_VAR`], or the default
    /// preset when the variable is unset.
    pub fn install_from_env() -> Result<&'static AccuracyProfile> {
        match std::env::var(PROFILE_ENV_VAR) {
            Ok(text) => install_named(&text),
            Err(_) => {
                log::debug!("{} unset, using `{}`", PROFILE_ENV_VAR, ProfileName::default());
                install(AccuracyProfile::default())
            }
        }
    }

    /// The installed profile, if any
    pub fn installed() -> Option<&'static AccuracyProfile> {
        INSTALLED.get()
    }
}
