use std::path::Path;

use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::features::table::FeatureTable;
use crate::pipeline::defaults::{BuiltinFeatureTable, PhonNotationParser, RubricPairScorer};
use crate::pipeline::runtime::{AccuracyScorer, AccuracyScorerParts};
use crate::pipeline::traits::{AlignmentParser, FeatureProvider, PairScorer};

pub struct AccuracyScorerBuilder {
    config: ScoringConfig,
    feature_provider: Option<Box<dyn FeatureProvider>>,
    parser: Option<Box<dyn AlignmentParser>>,
    pair_scorer: Option<Box<dyn PairScorer>>,
}

impl AccuracyScorerBuilder {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            feature_provider: None,
            parser: None,
            pair_scorer: None,
        }
    }

    pub fn with_feature_provider(mut self, feature_provider: Box<dyn FeatureProvider>) -> Self {
        self.feature_provider = Some(feature_provider);
        self
    }

    pub fn with_parser(mut self, parser: Box<dyn AlignmentParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn with_pair_scorer(mut self, pair_scorer: Box<dyn PairScorer>) -> Self {
        self.pair_scorer = Some(pair_scorer);
        self
    }

    pub fn build(self) -> Result<AccuracyScorer, ScoringError> {
        let feature_provider = match self.feature_provider {
            Some(provider) => provider,
            None if self.config.feature_table_path.is_empty() => Box::new(BuiltinFeatureTable),
            None => {
                let table = FeatureTable::load(Path::new(&self.config.feature_table_path))?;
                tracing::info!(
                    path = self.config.feature_table_path.as_str(),
                    phones = table.len(),
                    "builder: loaded external feature table"
                );
                Box::new(table)
            }
        };

        let pair_scorer = match self.pair_scorer {
            Some(scorer) => scorer,
            None => Box::new(RubricPairScorer::from_config(&self.config)?),
        };

        Ok(AccuracyScorer::from_parts(AccuracyScorerParts {
            feature_provider,
            parser: self.parser.unwrap_or_else(|| Box::new(PhonNotationParser)),
            pair_scorer,
        }))
    }
}
