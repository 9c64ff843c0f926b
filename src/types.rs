use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// One transcribed segment. `raw` is the text as written in the alignment
/// (tag stripped); `canonical` has legacy symbols expanded for feature lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone {
    pub raw: String,
    pub canonical: String,
}

/// One aligned (target, actual) position. `None` marks the null segment:
/// a deletion on the actual side, an insertion on the target side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentPair {
    pub target: Option<Phone>,
    pub actual: Option<Phone>,
    /// Syllable-position tag (`O`, `N`, `C`, `L`, ...) kept for diagnostics.
    pub target_tag: Option<String>,
    pub actual_tag: Option<String>,
}

impl AlignmentPair {
    pub fn raw_target(&self) -> Option<&str> {
        self.target.as_ref().map(|p| p.raw.as_str())
    }

    pub fn raw_actual(&self) -> Option<&str> {
        self.actual.as_ref().map(|p| p.raw.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Consonant,
    Vowel,
}

impl AnalysisKind {
    pub const CONSONANT_MAX_SCORE: i32 = 15;
    pub const VOWEL_MAX_SCORE: i32 = 5;

    /// Per-segment ceiling used for normalization.
    pub fn max_score(self) -> i32 {
        match self {
            Self::Consonant => Self::CONSONANT_MAX_SCORE,
            Self::Vowel => Self::VOWEL_MAX_SCORE,
        }
    }

    /// Maps a Phon analysis label (query folder name) to its scoring path.
    pub fn from_label(label: &str) -> Result<Self, ScoringError> {
        match label.trim() {
            "Vowels" | "Nucleus" => Ok(Self::Vowel),
            "Consonants"
            | "Onset Clusters"
            | "Coda Clusters"
            | "Final Singletons"
            | "Initial Singletons"
            | "Medial Singletons"
            | "Singletons"
            | "Initial Clusters"
            | "Final Clusters"
            | "Onset and Adjunct"
            | "Coda and Appendix" => Ok(Self::Consonant),
            "consonant" => Ok(Self::Consonant),
            "vowel" => Ok(Self::Vowel),
            other => Err(ScoringError::invalid_input(format!(
                "unknown analysis label '{other}'"
            ))),
        }
    }
}

impl FromStr for AnalysisKind {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consonant => f.write_str("consonant"),
            Self::Vowel => f.write_str("vowel"),
        }
    }
}

/// One dataset row handed in by the surrounding batch pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRow {
    pub id: String,
    pub alignment: String,
    /// Phon analysis label, e.g. `Onset and Adjunct` or `Vowels`.
    pub analysis: String,
}
