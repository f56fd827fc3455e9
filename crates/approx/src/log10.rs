//! `log10(x)` approximations
//!
//! Every variant is the [`crate::log2`] variant of the same name scaled by
//! [`LOG10_2`]. Nothing here approximates `log10` independently, so the two
//! families always agree up to that one multiplication and share the same
//! domain policy.

use crate::consts::LOG10_2;
use crate::log2;
use crate::variant::{ErrorBound, ErrorUnit, FunctionFamily, Variant};

macro_rules! log10_variants {
    ($(($name:ident, $speed:expr, $raw_octaves:expr, $db:expr)),* $(,)?) => {
        $(
            #[doc = concat!("[`log2::", stringify!($name), "`] scaled by `log10(2)`")]
            #[inline(always)]
            pub fn $name(x: f32) -> f32 {
                log2::$name(x) * LOG10_2
            }
        )*

        /// Log10 catalogue, reference first
        pub static VARIANTS: &[Variant] = &[
            $(
                Variant {
                    name: stringify!($name),
                    family: FunctionFamily::Log10,
                    speed_multiplier: $speed,
                    worst_case_error: ErrorBound::new($db, ErrorUnit::Decibels),
                    raw_error: ErrorBound::new($raw_octaves * LOG10_2, ErrorUnit::Absolute),
                    valid_domain: log2::POSITIVE_NORMAL,
                    cyclical: false,
                    eval: $name,
                },
            )*
        ];
    };
}

log10_variants![
    (reference, Some(1.0), 5e-6, 3e-5),
    (mineiro, Some(6.65), 2e-4, 0.001),
    (mineiro_faster, Some(10.16), 0.06, 0.4),
    (lgeoffroy, None, 0.006, 0.035),
    (lgeoffroy_accurate, None, 0.0055, 0.032),
    (desoras, None, 0.011, 0.065),
    (njuffa, Some(2.88), 1.5e-5, 3e-5),
    (njuffa_faster, Some(5.82), 4e-5, 2e-4),
    (ankerl32, Some(12.62), 0.065, 0.4),
    (ekmett_lb, Some(10.33), 0.09, 0.55),
    (jenkas, None, 3e-5, 6e-5),
];
