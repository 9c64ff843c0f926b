use std::collections::HashMap;

use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::features::FeatureBundle;
use crate::pipeline::batch::{self, RowOutcome};
use crate::pipeline::builder::AccuracyScorerBuilder;
use crate::pipeline::traits::{AlignmentParser, FeatureProvider, PairScorer};
use crate::scoring::UtteranceScore;
use crate::types::{AnalysisKind, Phone, ScoringRow};

/// Parses an alignment, scores each pair and normalizes the sum.
pub struct AccuracyScorer {
    feature_provider: Box<dyn FeatureProvider>,
    parser: Box<dyn AlignmentParser>,
    pair_scorer: Box<dyn PairScorer>,
}

pub(crate) struct AccuracyScorerParts {
    pub feature_provider: Box<dyn FeatureProvider>,
    pub parser: Box<dyn AlignmentParser>,
    pub pair_scorer: Box<dyn PairScorer>,
}

impl AccuracyScorer {
    pub(crate) fn from_parts(parts: AccuracyScorerParts) -> Self {
        Self {
            feature_provider: parts.feature_provider,
            parser: parts.parser,
            pair_scorer: parts.pair_scorer,
        }
    }

    /// Built-in feature table with matrix distances.
    pub fn standard() -> Result<Self, ScoringError> {
        AccuracyScorerBuilder::new(ScoringConfig::default()).build()
    }

    pub fn score(&self, alignment: &str, kind: AnalysisKind) -> Result<UtteranceScore, ScoringError> {
        let pairs = self.parser.parse(alignment)?;

        // Lookups are memoized per utterance; repeated phones are common.
        let mut bundles: HashMap<&str, FeatureBundle> = HashMap::new();
        let mut scored = Vec::with_capacity(pairs.len());
        for pair in &pairs {
            let target = self.resolve(pair.target.as_ref(), &mut bundles)?;
            let actual = self.resolve(pair.actual.as_ref(), &mut bundles)?;
            scored.push(self.pair_scorer.score_pair(
                target.as_ref(),
                actual.as_ref(),
                kind,
                pair.raw_target(),
                pair.raw_actual(),
            )?);
        }

        let score = UtteranceScore::from_pairs(kind, self.pair_scorer.max_score(kind), scored)?;
        tracing::debug!(
            kind = %kind,
            pairs = score.pairs.len(),
            points = score.points,
            max_points = score.max_points,
            accuracy = score.accuracy,
            "scorer: scored utterance"
        );
        Ok(score)
    }

    /// Scores rows in parallel; see [`batch::score_batch`].
    pub fn score_batch(&self, rows: &[ScoringRow]) -> Vec<RowOutcome> {
        batch::score_batch(self, rows)
    }

    fn resolve<'a>(
        &self,
        phone: Option<&'a Phone>,
        cache: &mut HashMap<&'a str, FeatureBundle>,
    ) -> Result<Option<FeatureBundle>, ScoringError> {
        let Some(phone) = phone else {
            return Ok(None);
        };
        if let Some(bundle) = cache.get(phone.canonical.as_str()) {
            return Ok(Some(*bundle));
        }
        let bundle = self.feature_provider.lookup(&phone.canonical)?;
        cache.insert(phone.canonical.as_str(), bundle);
        Ok(Some(bundle))
    }
}
