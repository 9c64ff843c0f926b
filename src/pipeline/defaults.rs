use crate::alignment::parse_alignment;
use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::features::table::FeatureTable;
use crate::features::FeatureBundle;
use crate::pipeline::traits::{AlignmentParser, FeatureProvider, PairScorer};
use crate::scoring::{PairScore, Rubric};
use crate::types::{AlignmentPair, AnalysisKind};

/// The built-in IPA table.
pub struct BuiltinFeatureTable;

impl FeatureProvider for BuiltinFeatureTable {
    fn lookup(&self, phone: &str) -> Result<FeatureBundle, ScoringError> {
        FeatureTable::builtin().resolve(phone)
    }
}

impl FeatureProvider for FeatureTable {
    fn lookup(&self, phone: &str) -> Result<FeatureBundle, ScoringError> {
        self.resolve(phone)
    }
}

pub struct PhonNotationParser;

impl AlignmentParser for PhonNotationParser {
    fn parse(&self, raw: &str) -> Result<Vec<AlignmentPair>, ScoringError> {
        parse_alignment(raw)
    }
}

pub struct RubricPairScorer {
    rubric: Rubric,
}

impl RubricPairScorer {
    pub fn new(rubric: Rubric) -> Self {
        Self { rubric }
    }

    pub fn from_config(config: &ScoringConfig) -> Result<Self, ScoringError> {
        Ok(Self::new(Rubric::new(
            config.place_distance,
            config.manner_distance,
        )?))
    }
}

impl PairScorer for RubricPairScorer {
    fn score_pair(
        &self,
        target: Option<&FeatureBundle>,
        actual: Option<&FeatureBundle>,
        kind: AnalysisKind,
        raw_target: Option<&str>,
        raw_actual: Option<&str>,
    ) -> Result<PairScore, ScoringError> {
        self.rubric
            .score_pair(target, actual, kind, raw_target, raw_actual)
    }
}
