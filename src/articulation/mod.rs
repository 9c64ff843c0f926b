//! Discrete articulatory categories and the rule tables that derive them.
//!
//! Category declaration order is the fixed front-to-back (or
//! closed-to-open) ordering the distance tables are indexed by; reordering
//! a variant invalidates [`distance::PLACE_DISTANCES`] and friends.

use std::fmt;

use serde::Serialize;

pub mod distance;
pub mod rules;

pub use distance::{DistanceMode, DistanceTable};
pub use rules::{classify_backness, classify_height, classify_manner, classify_place};

/// Bumped whenever a rule, category order or distance matrix changes.
pub const RULE_TABLE_VERSION: u32 = 1;

pub trait Category: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Dimension name used in diagnostics ("place", "manner", ...).
    const DIMENSION: &'static str;
    /// Every variant in distance-table order.
    const ORDER: &'static [Self];

    fn index(self) -> usize;
    fn code(self) -> &'static str;
}

macro_rules! category {
    ($name:ident, $dimension:literal, [$($variant:ident => $code:literal),+ $(,)?]) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl Category for $name {
            const DIMENSION: &'static str = $dimension;
            const ORDER: &'static [Self] = &[$(Self::$variant),+];

            fn index(self) -> usize {
                self as usize
            }

            fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

category!(Place, "place", [
    Bilabial => "blb",
    Labiodental => "lbd",
    Dental => "dnt",
    Alveolar => "alv",
    Postalveolar => "plv",
    Retroflex => "rtf",
    Palatal => "plt",
    Velar => "vlr",
    Uvular => "uvl",
    Pharyngeal => "phr",
    Glottal => "glt",
]);

category!(Manner, "manner", [
    Nasal => "nas",
    Plosive => "plo",
    Affricate => "aff",
    Fricative => "fri",
    LateralFricative => "lfr",
    Approximant => "app",
    LateralApproximant => "lap",
    Trill => "tri",
    TapFlap => "tfp",
]);

category!(Height, "height", [
    Close => "close",
    Mid => "mid",
    Open => "open",
]);

category!(Backness, "backness", [
    Front => "front",
    Central => "central",
    Back => "back",
]);
