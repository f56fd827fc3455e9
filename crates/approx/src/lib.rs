#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! rigel-approx: interchangeable fast approximations for real-time audio and graphics
//!
//! Each function family (`pow2`, `log2`, `log10`, `sin`) has a catalogue of
//! variants ranging from a libm reference down to single-instruction bit
//! tricks. An [`AccuracyProfile`] binds one variant per family, and the
//! conversion layer builds pitch, level and frequency-axis conversions on
//! top of it.
//!
//! # Features
//!
//! - **Uniform call signature**: every variant is a `fn(f32) -> f32`
//! - **Documented bounds**: each variant declares its worst-case error and valid domain
//! - **Total functions**: out-of-domain input never panics and never returns NaN for finite input
//! - **Resolved once**: profiles hold plain function pointers, no lookups on the hot path
//! - **No allocations**: all math and probing is stack-only, `no_std` without the `std` feature

extern crate alloc;
extern crate libm;
#[cfg(any(feature = "std", test))]
extern crate std;

// IEEE-754 bit reinterpretation
pub mod bits;

// Shared constants
pub mod consts;

// Variant records
pub mod variant;

// Function families
pub mod log10;
pub mod log2;
pub mod pow2;
pub mod sin;

// Profile selection
pub mod error;
pub mod profile;

// Conversions
pub mod convert;

// Accuracy probe
pub mod probe;

pub use error::ConfigError;
pub use profile::{AccuracyProfile, ProfileBuilder, ProfileName};
pub use variant::{Domain, ErrorBound, ErrorUnit, FunctionFamily, Variant};

#[cfg(feature = "std")]
pub use profile::{install, install_from_env, install_named, installed, PROFILE_ENV_VAR};
