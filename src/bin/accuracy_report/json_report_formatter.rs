use std::fs;
use std::path::Path;

use phon_accuracy::BatchReport;

/// Writes `report` as pretty JSON, creating the output directory if needed.
pub fn write_report(path: &Path, report: &BatchReport) -> Result<(), String> {
    let mut json = serde_json::to_string_pretty(report).map_err(|err| {
        format!(
            "Failed to serialize accuracy report ({} rows): {err}",
            report.meta.row_count
        )
    })?;
    json.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create accuracy report directory '{}': {err}",
                parent.display()
            )
        })?;
    }
    fs::write(path, json)
        .map_err(|err| format!("Failed to write accuracy report '{}': {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use phon_accuracy::{build_report, AccuracyScorer, ScoringConfig, ScoringRow};

    #[test]
    fn writes_report_into_new_directory() {
        let dir = std::env::temp_dir().join("accuracy_report_formatter/nested");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("report.json");

        let scorer = AccuracyScorer::standard().unwrap();
        let rows = vec![ScoringRow {
            id: "r1".into(),
            alignment: "s↔s,ɹ↔∅".into(),
            analysis: "Onset Clusters".into(),
        }];
        let report = build_report(&ScoringConfig::default(), &scorer.score_batch(&rows));
        write_report(&path, &report).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["rows"][0]["id"], "r1");
        assert_eq!(value["meta"]["row_count"], 1);
        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }
}
