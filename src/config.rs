use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::articulation::DistanceMode;
use crate::error::ScoringError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// JSON feature table; empty selects the built-in IPA table.
    pub feature_table_path: String,
    pub place_distance: DistanceMode,
    pub manner_distance: DistanceMode,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            feature_table_path: String::new(),
            place_distance: DistanceMode::Matrix,
            manner_distance: DistanceMode::Matrix,
        }
    }
}

impl ScoringConfig {
    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ScoringError::io("read scoring config", e))?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScoringError> {
        serde_json::from_str(json).map_err(|e| ScoringError::json("parse scoring config", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_config_default() {
        let config = ScoringConfig::default();
        assert!(config.feature_table_path.is_empty());
        assert_eq!(config.place_distance, DistanceMode::Matrix);
        assert_eq!(config.manner_distance, DistanceMode::Matrix);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            ScoringConfig::from_json_str(r#"{"manner_distance": "index_difference"}"#).unwrap();
        assert_eq!(config.manner_distance, DistanceMode::IndexDifference);
        assert_eq!(config.place_distance, DistanceMode::Matrix);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ScoringConfig::from_json_str(r#"{"max_score": 20}"#).unwrap_err();
        assert!(matches!(err, ScoringError::Json { .. }));
    }

    #[test]
    fn load_round_trips_through_file() {
        let path = std::env::temp_dir().join("phon_accuracy_config_roundtrip.json");
        let config = ScoringConfig {
            feature_table_path: "features.json".to_string(),
            place_distance: DistanceMode::IndexDifference,
            manner_distance: DistanceMode::Matrix,
        };
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).expect("write config");
        let loaded = ScoringConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_fails_on_missing_file() {
        let err = ScoringConfig::load(Path::new("/nonexistent/scoring.json")).unwrap_err();
        assert!(matches!(err, ScoringError::Io { .. }));
    }
}
