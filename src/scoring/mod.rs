pub mod accuracy;
pub mod pair;

pub use accuracy::{compute_accuracy, normalize, OutcomeCounts, UtteranceScore};
pub use pair::{Deductions, PairOutcome, PairScore, Rubric};
