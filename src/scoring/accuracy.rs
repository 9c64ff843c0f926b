use serde::Serialize;

use super::pair::{PairOutcome, PairScore};
use crate::error::ScoringError;
use crate::pipeline::runtime::AccuracyScorer;
use crate::types::AnalysisKind;

/// Per-utterance tallies of the pair outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OutcomeCounts {
    pub matches: u32,
    pub substitutions: u32,
    pub deletions: u32,
    pub insertions: u32,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: PairOutcome) {
        match outcome {
            PairOutcome::Match => self.matches += 1,
            PairOutcome::Substitution => self.substitutions += 1,
            PairOutcome::Deletion => self.deletions += 1,
            PairOutcome::Insertion => self.insertions += 1,
        }
    }

    /// Pairs that carry a target segment.
    pub fn target_segments(&self) -> u32 {
        self.matches + self.substitutions + self.deletions
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtteranceScore {
    pub kind: AnalysisKind,
    /// `points / max_points`. Negative when insertions outweigh credit.
    pub accuracy: f64,
    pub points: i32,
    pub max_points: i32,
    pub counts: OutcomeCounts,
    pub pairs: Vec<PairScore>,
}

impl UtteranceScore {
    pub(crate) fn from_pairs(
        kind: AnalysisKind,
        per_segment_max: i32,
        pairs: Vec<PairScore>,
    ) -> Result<Self, ScoringError> {
        let mut counts = OutcomeCounts::default();
        for pair in &pairs {
            counts.record(pair.outcome);
        }
        let points = pairs.iter().map(|p| p.points).sum();
        let target_segments = counts.target_segments();
        let accuracy = normalize(points, target_segments, per_segment_max)?;

        Ok(Self {
            kind,
            accuracy,
            points,
            max_points: target_segments as i32 * per_segment_max,
            counts,
            pairs,
        })
    }
}

/// `points / (target_segments * per_segment_max)`.
pub fn normalize(points: i32, target_segments: u32, per_segment_max: i32) -> Result<f64, ScoringError> {
    if target_segments == 0 || per_segment_max <= 0 {
        return Err(ScoringError::DivisionUndefined);
    }
    Ok(f64::from(points) / (f64::from(target_segments) * f64::from(per_segment_max)))
}

/// Scores one alignment string with the built-in feature table and the
/// standard rubric.
pub fn compute_accuracy(alignment: &str, kind: AnalysisKind) -> Result<f64, ScoringError> {
    AccuracyScorer::standard()?
        .score(alignment, kind)
        .map(|score| score.accuracy)
}
