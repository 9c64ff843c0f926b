//! Distinctive-feature vocabulary shared by the parser, classifier and scorer.
//!
//! Every segment is described by the same closed set of [`Feature`]s, each
//! holding a ternary [`FeatureValue`]. Unspecified is a value in its own right:
//! a rule that asks for `+cor` never matches a segment whose coronal value is
//! unspecified.

use std::fmt;

pub mod table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Syllabic,
    Sonorant,
    Consonantal,
    Continuant,
    DelayedRelease,
    Lateral,
    Nasal,
    Strident,
    Voice,
    SpreadGlottis,
    ConstrictedGlottis,
    Anterior,
    Coronal,
    Distributed,
    Labial,
    High,
    Low,
    Back,
    Round,
    Tense,
    Long,
}

impl Feature {
    pub const COUNT: usize = 21;

    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::Syllabic,
        Feature::Sonorant,
        Feature::Consonantal,
        Feature::Continuant,
        Feature::DelayedRelease,
        Feature::Lateral,
        Feature::Nasal,
        Feature::Strident,
        Feature::Voice,
        Feature::SpreadGlottis,
        Feature::ConstrictedGlottis,
        Feature::Anterior,
        Feature::Coronal,
        Feature::Distributed,
        Feature::Labial,
        Feature::High,
        Feature::Low,
        Feature::Back,
        Feature::Round,
        Feature::Tense,
        Feature::Long,
    ];

    /// Short code as used by panphon-style feature tables.
    pub fn code(self) -> &'static str {
        match self {
            Self::Syllabic => "syl",
            Self::Sonorant => "son",
            Self::Consonantal => "cons",
            Self::Continuant => "cont",
            Self::DelayedRelease => "delrel",
            Self::Lateral => "lat",
            Self::Nasal => "nas",
            Self::Strident => "strid",
            Self::Voice => "voi",
            Self::SpreadGlottis => "sg",
            Self::ConstrictedGlottis => "cg",
            Self::Anterior => "ant",
            Self::Coronal => "cor",
            Self::Distributed => "distr",
            Self::Labial => "lab",
            Self::High => "hi",
            Self::Low => "lo",
            Self::Back => "back",
            Self::Round => "round",
            Self::Tense => "tense",
            Self::Long => "long",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FeatureValue {
    Plus,
    Minus,
    #[default]
    Unspecified,
}

impl FeatureValue {
    pub fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Unspecified => '0',
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "+" | "+1" | "1" => Some(Self::Plus),
            "-" | "-1" | "−" => Some(Self::Minus),
            "0" | "" => Some(Self::Unspecified),
            _ => None,
        }
    }
}

/// Ternary value for every [`Feature`] of one segment. Never mutated once
/// handed out by a provider; the builders return modified copies.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureBundle {
    values: [FeatureValue; Feature::COUNT],
}

impl FeatureBundle {
    pub fn unspecified() -> Self {
        Self {
            values: [FeatureValue::Unspecified; Feature::COUNT],
        }
    }

    pub fn from_pairs(pairs: &[(Feature, FeatureValue)]) -> Self {
        Self::unspecified().with_all(pairs)
    }

    pub fn get(&self, feature: Feature) -> FeatureValue {
        self.values[feature.slot()]
    }

    pub fn is(&self, feature: Feature, value: FeatureValue) -> bool {
        self.get(feature) == value
    }

    pub fn with(mut self, feature: Feature, value: FeatureValue) -> Self {
        self.values[feature.slot()] = value;
        self
    }

    pub fn with_all(self, pairs: &[(Feature, FeatureValue)]) -> Self {
        pairs
            .iter()
            .fold(self, |bundle, &(feature, value)| bundle.with(feature, value))
    }

    /// True when every `(feature, value)` requirement holds exactly.
    pub fn matches(&self, requirements: &[(Feature, FeatureValue)]) -> bool {
        requirements
            .iter()
            .all(|&(feature, value)| self.is(feature, value))
    }

    /// True when `self` and `other` disagree on at least one of `features`.
    pub fn differs_on(&self, other: &FeatureBundle, features: &[Feature]) -> bool {
        features.iter().any(|&f| self.get(f) != other.get(f))
    }
}

impl Default for FeatureBundle {
    fn default() -> Self {
        Self::unspecified()
    }
}

impl fmt::Display for FeatureBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, feature) in Feature::ALL.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}{}", self.get(*feature).symbol(), feature.code())?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for FeatureBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
