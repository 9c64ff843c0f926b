//! Per-pair scoring rubric.
//!
//! Consonants start from 15 (baseline 1 + voicing 1 + place 10 + manner 3),
//! vowels from 5 (baseline 1 + height 2 + backness 1 + rounding 1). A
//! mismatch on any secondary feature costs one more point. When the raw
//! transcriptions differ but nothing was deducted, the pair forfeits the
//! exact-match point and scores `ceiling - 1`; the forfeit never stacks with
//! other deductions.

use serde::Serialize;

use crate::articulation::distance::{BACKNESS_DISTANCES, MANNER_DISTANCES, PLACE_DISTANCES};
use crate::articulation::{
    classify_backness, classify_height, classify_manner, classify_place, Backness,
    DistanceMode, DistanceTable, Height, Manner, Place,
};
use crate::error::ScoringError;
use crate::features::{Feature, FeatureBundle};
use crate::types::AnalysisKind;

/// Score of a pair whose target is absent.
pub const INSERTION_POINTS: i32 = -1;
/// Score of a pair whose actual is absent.
pub const DELETION_POINTS: i32 = 0;

/// Per-dimension deduction budgets. Distances above a budget are capped so
/// every aligned pair stays within `[0, ceiling]` in either distance mode.
pub const PLACE_BUDGET: u32 = 10;
pub const MANNER_BUDGET: u32 = 3;
pub const HEIGHT_BUDGET: u32 = 2;
pub const BACKNESS_BUDGET: u32 = 1;

pub const CONSONANT_SECONDARY: &[Feature] = &[
    Feature::SpreadGlottis,
    Feature::ConstrictedGlottis,
    Feature::Round,
    Feature::Long,
];

pub const VOWEL_SECONDARY: &[Feature] = &[
    Feature::SpreadGlottis,
    Feature::ConstrictedGlottis,
    Feature::Nasal,
    Feature::Long,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairOutcome {
    /// Raw transcriptions are identical.
    Match,
    Substitution,
    Deletion,
    Insertion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Deductions {
    pub voicing: u32,
    pub place: u32,
    pub manner: u32,
    pub height: u32,
    pub backness: u32,
    pub rounding: u32,
    pub secondary: u32,
    pub exact_match_forfeit: u32,
}

impl Deductions {
    pub fn total(&self) -> u32 {
        self.voicing
            + self.place
            + self.manner
            + self.height
            + self.backness
            + self.rounding
            + self.secondary
            + self.exact_match_forfeit
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairScore {
    pub points: i32,
    pub outcome: PairOutcome,
    pub deductions: Deductions,
}

/// Distance tables for every scored dimension.
#[derive(Debug, Clone)]
pub struct Rubric {
    place: DistanceTable<Place>,
    manner: DistanceTable<Manner>,
    height: DistanceTable<Height>,
    backness: DistanceTable<Backness>,
}

impl Rubric {
    pub fn new(place: DistanceMode, manner: DistanceMode) -> Result<Self, ScoringError> {
        Ok(Self {
            place: DistanceTable::with_mode(place, &PLACE_DISTANCES)?,
            manner: DistanceTable::with_mode(manner, &MANNER_DISTANCES)?,
            height: DistanceTable::index_difference(),
            backness: DistanceTable::from_authored(&BACKNESS_DISTANCES)?,
        })
    }

    pub fn standard() -> Result<Self, ScoringError> {
        Self::new(DistanceMode::Matrix, DistanceMode::Matrix)
    }

    pub fn place_table(&self) -> &DistanceTable<Place> {
        &self.place
    }

    pub fn manner_table(&self) -> &DistanceTable<Manner> {
        &self.manner
    }

    pub fn score_pair(
        &self,
        target: Option<&FeatureBundle>,
        actual: Option<&FeatureBundle>,
        kind: AnalysisKind,
        raw_target: Option<&str>,
        raw_actual: Option<&str>,
    ) -> Result<PairScore, ScoringError> {
        let (target, actual) = match (target, actual) {
            (None, None) => {
                return Err(ScoringError::malformed(
                    "pair has neither a target nor an actual segment",
                ))
            }
            (None, Some(_)) => {
                return Ok(PairScore {
                    points: INSERTION_POINTS,
                    outcome: PairOutcome::Insertion,
                    deductions: Deductions::default(),
                })
            }
            (Some(_), None) => {
                return Ok(PairScore {
                    points: DELETION_POINTS,
                    outcome: PairOutcome::Deletion,
                    deductions: Deductions::default(),
                })
            }
            (Some(target), Some(actual)) => (target, actual),
        };

        let mut deductions = match kind {
            AnalysisKind::Consonant => self.consonant_deductions(target, actual),
            AnalysisKind::Vowel => self.vowel_deductions(target, actual),
        }
        .inspect_err(|_| {
            tracing::warn!(
                target_phone = raw_target.unwrap_or(""),
                actual_phone = raw_actual.unwrap_or(""),
                "scorer: pair could not be classified"
            );
        })?;

        let exact = raw_target.is_some() && raw_target == raw_actual;
        if deductions.total() == 0 && !exact {
            deductions.exact_match_forfeit = 1;
        }

        let points = kind.max_score() - deductions.total() as i32;
        tracing::debug!(
            kind = %kind,
            target_phone = raw_target.unwrap_or(""),
            actual_phone = raw_actual.unwrap_or(""),
            points,
            ?deductions,
            "scorer: scored pair"
        );

        Ok(PairScore {
            points,
            outcome: if exact {
                PairOutcome::Match
            } else {
                PairOutcome::Substitution
            },
            deductions,
        })
    }

    fn consonant_deductions(
        &self,
        target: &FeatureBundle,
        actual: &FeatureBundle,
    ) -> Result<Deductions, ScoringError> {
        let place = self
            .place
            .lookup(classify_place(target)?, classify_place(actual)?)
            .min(PLACE_BUDGET);
        let manner = self
            .manner
            .lookup(classify_manner(target)?, classify_manner(actual)?)
            .min(MANNER_BUDGET);
        Ok(Deductions {
            voicing: target.differs_on(actual, &[Feature::Voice]) as u32,
            place,
            manner,
            secondary: target.differs_on(actual, CONSONANT_SECONDARY) as u32,
            ..Deductions::default()
        })
    }

    fn vowel_deductions(
        &self,
        target: &FeatureBundle,
        actual: &FeatureBundle,
    ) -> Result<Deductions, ScoringError> {
        let height = self
            .height
            .lookup(classify_height(target)?, classify_height(actual)?)
            .min(HEIGHT_BUDGET);
        let backness = self
            .backness
            .lookup(classify_backness(target)?, classify_backness(actual)?)
            .min(BACKNESS_BUDGET);
        Ok(Deductions {
            height,
            backness,
            rounding: target.differs_on(actual, &[Feature::Round]) as u32,
            secondary: target.differs_on(actual, VOWEL_SECONDARY) as u32,
            ..Deductions::default()
        })
    }
}
