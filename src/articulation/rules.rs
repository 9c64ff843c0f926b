//! Ordered classification rules. Each row is a conjunction of exact feature
//! values; the first row whose conjunction holds names the category. A
//! category may own several rows (e.g. velar for `+back` and `0back`), but
//! rows of different categories never overlap.

use super::{Backness, Category, Height, Manner, Place};
use crate::error::ScoringError;
use crate::features::{Feature, FeatureBundle, FeatureValue};

use Feature::*;
use FeatureValue::{Minus as M, Plus as P, Unspecified as U};

pub struct Rule<C> {
    pub category: C,
    pub requires: &'static [(Feature, FeatureValue)],
}

const fn rule<C>(category: C, requires: &'static [(Feature, FeatureValue)]) -> Rule<C> {
    Rule { category, requires }
}

pub const PLACE_RULES: &[Rule<Place>] = &[
    rule(Place::Bilabial, &[(Anterior, P), (Coronal, M), (Distributed, P), (Strident, M)]),
    rule(Place::Labiodental, &[(Anterior, P), (Coronal, M), (Strident, P)]),
    rule(Place::Labiodental, &[(Anterior, P), (Coronal, M), (Distributed, M)]),
    rule(Place::Dental, &[(Anterior, P), (Coronal, P), (Distributed, P)]),
    rule(Place::Alveolar, &[(Anterior, P), (Coronal, P), (Distributed, M)]),
    rule(Place::Postalveolar, &[(Anterior, M), (Coronal, P), (Distributed, P)]),
    rule(Place::Retroflex, &[(Anterior, M), (Coronal, P), (Distributed, M)]),
    rule(Place::Retroflex, &[(Anterior, M), (Coronal, P), (Distributed, U)]),
    rule(Place::Palatal, &[(Anterior, M), (Coronal, M), (High, P), (Low, M), (Back, M)]),
    rule(Place::Velar, &[(Anterior, M), (Coronal, M), (High, P), (Low, M), (Back, P)]),
    rule(Place::Velar, &[(Anterior, M), (Coronal, M), (High, P), (Low, M), (Back, U)]),
    rule(Place::Uvular, &[(Anterior, M), (Coronal, M), (High, M), (Low, M), (Back, P)]),
    rule(Place::Pharyngeal, &[(Anterior, M), (Coronal, M), (High, M), (Low, P), (Back, P)]),
    rule(Place::Glottal, &[(Anterior, M), (Coronal, M), (High, M), (Low, M), (Back, M)]),
];

pub const MANNER_RULES: &[Rule<Manner>] = &[
    rule(Manner::Nasal, &[(Sonorant, P), (Nasal, P)]),
    rule(Manner::Trill, &[(Sonorant, P), (Consonantal, P), (Continuant, P), (Nasal, M), (Lateral, M)]),
    rule(Manner::TapFlap, &[(Sonorant, P), (Consonantal, P), (Continuant, M), (Nasal, M), (Lateral, M)]),
    rule(Manner::LateralApproximant, &[(Sonorant, P), (Nasal, M), (Lateral, P)]),
    rule(Manner::Approximant, &[(Sonorant, P), (Consonantal, M), (Nasal, M), (Lateral, M)]),
    rule(Manner::LateralFricative, &[(Sonorant, M), (Continuant, P), (Lateral, P)]),
    rule(Manner::Fricative, &[(Sonorant, M), (Continuant, P), (Lateral, M)]),
    rule(Manner::Affricate, &[(Sonorant, M), (Continuant, M), (DelayedRelease, P)]),
    rule(Manner::Plosive, &[(Sonorant, M), (Continuant, M), (DelayedRelease, M)]),
];

pub const HEIGHT_RULES: &[Rule<Height>] = &[
    rule(Height::Close, &[(High, P), (Low, M)]),
    rule(Height::Mid, &[(High, M), (Low, M)]),
    rule(Height::Open, &[(High, M), (Low, P)]),
];

pub const BACKNESS_RULES: &[Rule<Backness>] = &[
    rule(Backness::Front, &[(Back, M)]),
    rule(Backness::Central, &[(Back, U)]),
    rule(Backness::Back, &[(Back, P)]),
];

/// First matching category, or `UnclassifiableSegment` when the table has a gap.
pub fn classify<C: Category>(rules: &[Rule<C>], features: &FeatureBundle) -> Result<C, ScoringError> {
    if let Some(rule) = rules.iter().find(|rule| features.matches(rule.requires)) {
        return Ok(rule.category);
    }
    tracing::warn!(
        dimension = C::DIMENSION,
        features = %features,
        "classifier: no rule matches feature bundle"
    );
    Err(ScoringError::UnclassifiableSegment {
        dimension: C::DIMENSION,
        features: features.to_string(),
    })
}

pub fn classify_place(features: &FeatureBundle) -> Result<Place, ScoringError> {
    classify(PLACE_RULES, features)
}

pub fn classify_manner(features: &FeatureBundle) -> Result<Manner, ScoringError> {
    classify(MANNER_RULES, features)
}

pub fn classify_height(features: &FeatureBundle) -> Result<Height, ScoringError> {
    classify(HEIGHT_RULES, features)
}

pub fn classify_backness(features: &FeatureBundle) -> Result<Backness, ScoringError> {
    classify(BACKNESS_RULES, features)
}
