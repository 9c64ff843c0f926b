use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::articulation::{DistanceMode, RULE_TABLE_VERSION};
use crate::config::ScoringConfig;
use crate::pipeline::batch::RowOutcome;
use crate::scoring::OutcomeCounts;
use crate::types::AnalysisKind;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub schema_version: u32,
    pub meta: Meta,
    pub rows: Vec<RowReport>,
    pub aggregates: AggregateReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub rule_table_version: u32,
    pub place_distance: DistanceMode,
    pub manner_distance: DistanceMode,
    /// `builtin` or the path of the loaded table.
    pub feature_table: String,
    pub row_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowReport {
    pub id: String,
    pub analysis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<AnalysisKind>,
    pub accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_points: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<OutcomeCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisAggregate {
    pub scored: usize,
    pub failed: usize,
    pub mean_accuracy: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub scored: usize,
    pub failed: usize,
    pub mean_accuracy: Option<f64>,
    pub by_analysis: BTreeMap<String, AnalysisAggregate>,
    pub failures_by_code: BTreeMap<&'static str, usize>,
}

pub fn build_report(config: &ScoringConfig, outcomes: &[RowOutcome]) -> BatchReport {
    build_report_at(config, outcomes, Utc::now())
}

pub fn build_report_at(
    config: &ScoringConfig,
    outcomes: &[RowOutcome],
    generated_at: DateTime<Utc>,
) -> BatchReport {
    let rows: Vec<RowReport> = outcomes.iter().map(row_report).collect();
    let aggregates = aggregate_rows(&rows);
    BatchReport {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at: generated_at.to_rfc3339(),
            rule_table_version: RULE_TABLE_VERSION,
            place_distance: config.place_distance,
            manner_distance: config.manner_distance,
            feature_table: if config.feature_table_path.is_empty() {
                "builtin".to_string()
            } else {
                config.feature_table_path.clone()
            },
            row_count: rows.len(),
        },
        rows,
        aggregates,
    }
}

fn row_report(outcome: &RowOutcome) -> RowReport {
    match &outcome.result {
        Ok(score) => RowReport {
            id: outcome.id.clone(),
            analysis: outcome.analysis.clone(),
            kind: Some(score.kind),
            accuracy: Some(score.accuracy),
            points: Some(score.points),
            max_points: Some(score.max_points),
            counts: Some(score.counts),
            error: None,
            error_code: None,
        },
        Err(err) => RowReport {
            id: outcome.id.clone(),
            analysis: outcome.analysis.clone(),
            kind: None,
            accuracy: None,
            points: None,
            max_points: None,
            counts: None,
            error: Some(err.to_string()),
            error_code: Some(err.code()),
        },
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn aggregate_rows(rows: &[RowReport]) -> AggregateReport {
    let mut accuracies = Vec::with_capacity(rows.len());
    let mut per_label: BTreeMap<String, (Vec<f64>, usize)> = BTreeMap::new();
    let mut failures_by_code: BTreeMap<&'static str, usize> = BTreeMap::new();

    for row in rows {
        let entry = per_label.entry(row.analysis.clone()).or_default();
        match row.accuracy {
            Some(accuracy) => {
                accuracies.push(accuracy);
                entry.0.push(accuracy);
            }
            None => {
                entry.1 += 1;
                if let Some(code) = row.error_code {
                    *failures_by_code.entry(code).or_default() += 1;
                }
            }
        }
    }

    let by_analysis = per_label
        .into_iter()
        .map(|(label, (values, failed))| {
            (
                label,
                AnalysisAggregate {
                    scored: values.len(),
                    failed,
                    mean_accuracy: mean(&values),
                },
            )
        })
        .collect();

    AggregateReport {
        scored: accuracies.len(),
        failed: rows.len() - accuracies.len(),
        mean_accuracy: mean(&accuracies),
        by_analysis,
        failures_by_code,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::pipeline::runtime::AccuracyScorer;
    use crate::types::ScoringRow;

    fn outcomes() -> Vec<RowOutcome> {
        let scorer = AccuracyScorer::standard().unwrap();
        let rows = vec![
            ScoringRow {
                id: "a".into(),
                alignment: "s↔s".into(),
                analysis: "Onset Clusters".into(),
            },
            ScoringRow {
                id: "b".into(),
                alignment: "s↔s,p↔∅".into(),
                analysis: "Onset Clusters".into(),
            },
            ScoringRow {
                id: "c".into(),
                alignment: "∅↔s".into(),
                analysis: "Coda Clusters".into(),
            },
            ScoringRow {
                id: "d".into(),
                alignment: "s↔Q".into(),
                analysis: "Coda Clusters".into(),
            },
        ];
        scorer.score_batch(&rows)
    }

    #[test]
    fn report_meta_reflects_config() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let report = build_report_at(&ScoringConfig::default(), &outcomes(), at);
        assert_eq!(report.schema_version, REPORT_SCHEMA_VERSION);
        assert_eq!(report.meta.generated_at, "2024-05-01T12:00:00+00:00");
        assert_eq!(report.meta.rule_table_version, RULE_TABLE_VERSION);
        assert_eq!(report.meta.feature_table, "builtin");
        assert_eq!(report.meta.row_count, 4);
    }

    #[test]
    fn failed_rows_carry_reason_and_code() {
        let report = build_report(&ScoringConfig::default(), &outcomes());
        let c = &report.rows[2];
        assert_eq!(c.accuracy, None);
        assert_eq!(c.error_code, Some("division_undefined"));
        assert!(c.error.is_some());
        let d = &report.rows[3];
        assert_eq!(d.error_code, Some("unknown_phone"));
        assert_eq!(report.aggregates.failures_by_code.get("unknown_phone"), Some(&1));
        assert_eq!(report.aggregates.failures_by_code.get("division_undefined"), Some(&1));
    }

    #[test]
    fn aggregates_group_by_analysis_label() {
        let report = build_report(&ScoringConfig::default(), &outcomes());
        assert_eq!(report.aggregates.scored, 2);
        assert_eq!(report.aggregates.failed, 2);
        let onset = &report.aggregates.by_analysis["Onset Clusters"];
        assert_eq!(onset.scored, 2);
        assert_eq!(onset.failed, 0);
        assert!((onset.mean_accuracy.unwrap() - 0.75).abs() < 1e-9);
        let coda = &report.aggregates.by_analysis["Coda Clusters"];
        assert_eq!(coda.scored, 0);
        assert_eq!(coda.mean_accuracy, None);
    }

    #[test]
    fn report_serializes_rows_without_empty_fields() {
        let report = build_report(&ScoringConfig::default(), &outcomes());
        let json = serde_json::to_value(&report).unwrap();
        let first = &json["rows"][0];
        assert_eq!(first["kind"], "consonant");
        assert!(first.get("error").is_none());
        assert_eq!(json["meta"]["place_distance"], "matrix");
        assert!(json["rows"][2]["accuracy"].is_null());
    }
}
