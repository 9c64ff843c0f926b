pub mod alignment;
pub mod articulation;
pub mod config;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod types;

pub use alignment::parse_alignment;
pub use articulation::{DistanceMode, RULE_TABLE_VERSION};
pub use config::ScoringConfig;
pub use error::ScoringError;
pub use features::table::FeatureTable;
pub use features::{Feature, FeatureBundle, FeatureValue};
pub use pipeline::batch::RowOutcome;
pub use pipeline::builder::AccuracyScorerBuilder;
pub use pipeline::runtime::AccuracyScorer;
pub use pipeline::traits::{AlignmentParser, FeatureProvider, PairScorer};
pub use report::{build_report, BatchReport};
pub use scoring::{compute_accuracy, PairOutcome, PairScore, UtteranceScore};
pub use types::{AlignmentPair, AnalysisKind, Phone, ScoringRow};
