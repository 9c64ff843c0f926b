use crate::error::ScoringError;
use crate::features::FeatureBundle;
use crate::scoring::PairScore;
use crate::types::{AlignmentPair, AnalysisKind};

/// Resolves a canonical phone string to its distinctive features.
pub trait FeatureProvider: Send + Sync {
    fn lookup(&self, phone: &str) -> Result<FeatureBundle, ScoringError>;
}

pub trait AlignmentParser: Send + Sync {
    fn parse(&self, raw: &str) -> Result<Vec<AlignmentPair>, ScoringError>;
}

pub trait PairScorer: Send + Sync {
    fn score_pair(
        &self,
        target: Option<&FeatureBundle>,
        actual: Option<&FeatureBundle>,
        kind: AnalysisKind,
        raw_target: Option<&str>,
        raw_actual: Option<&str>,
    ) -> Result<PairScore, ScoringError>;

    /// Per-segment ceiling the aggregator normalizes by.
    fn max_score(&self, kind: AnalysisKind) -> i32 {
        kind.max_score()
    }
}
