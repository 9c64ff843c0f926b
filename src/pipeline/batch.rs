//! Row-level driver used by the report binary. Rows are independent, so they
//! are scored on the rayon pool; output order always follows input order.

use rayon::prelude::*;

use crate::error::ScoringError;
use crate::pipeline::runtime::AccuracyScorer;
use crate::scoring::UtteranceScore;
use crate::types::{AnalysisKind, ScoringRow};

#[derive(Debug)]
pub struct RowOutcome {
    pub id: String,
    pub analysis: String,
    pub result: Result<UtteranceScore, ScoringError>,
}

impl RowOutcome {
    pub fn is_scored(&self) -> bool {
        self.result.is_ok()
    }
}

/// A failed row never aborts the batch; its error is kept on the outcome.
pub fn score_row(scorer: &AccuracyScorer, row: &ScoringRow) -> RowOutcome {
    let result = AnalysisKind::from_label(&row.analysis)
        .and_then(|kind| scorer.score(&row.alignment, kind));
    if let Err(err) = &result {
        tracing::warn!(
            id = row.id.as_str(),
            analysis = row.analysis.as_str(),
            code = err.code(),
            error = %err,
            "batch: row not scored"
        );
    }
    RowOutcome {
        id: row.id.clone(),
        analysis: row.analysis.clone(),
        result,
    }
}

pub fn score_batch(scorer: &AccuracyScorer, rows: &[ScoringRow]) -> Vec<RowOutcome> {
    score_batch_with(scorer, rows, |_| {})
}

/// `on_row` runs once per finished row, from whichever worker scored it.
pub fn score_batch_with<F>(scorer: &AccuracyScorer, rows: &[ScoringRow], on_row: F) -> Vec<RowOutcome>
where
    F: Fn(&RowOutcome) + Sync,
{
    let outcomes: Vec<RowOutcome> = rows
        .par_iter()
        .map(|row| {
            let outcome = score_row(scorer, row);
            on_row(&outcome);
            outcome
        })
        .collect();

    let failed = outcomes.iter().filter(|o| !o.is_scored()).count();
    tracing::info!(
        rows = outcomes.len(),
        scored = outcomes.len() - failed,
        failed,
        "batch: scoring complete"
    );
    outcomes
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn row(id: &str, alignment: &str, analysis: &str) -> ScoringRow {
        ScoringRow {
            id: id.to_string(),
            alignment: alignment.to_string(),
            analysis: analysis.to_string(),
        }
    }

    #[test]
    fn batch_preserves_input_order() {
        let scorer = AccuracyScorer::standard().unwrap();
        let rows: Vec<ScoringRow> = (0..64)
            .map(|i| row(&format!("row-{i}"), "s↔s,p↔b", "Onset Clusters"))
            .collect();
        let outcomes = score_batch(&scorer, &rows);
        let ids: Vec<&str> = outcomes.iter().map(|o| o.id.as_str()).collect();
        let expected: Vec<String> = (0..64).map(|i| format!("row-{i}")).collect();
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn failures_are_isolated_per_row() {
        let scorer = AccuracyScorer::standard().unwrap();
        let rows = vec![
            row("ok", "s↔s", "Consonants"),
            row("bad-label", "s↔s", "Tones"),
            row("bad-alignment", "s↔", "Consonants"),
            row("vowel", "i↔i", "Vowels"),
        ];
        let outcomes = score_batch(&scorer, &rows);
        assert!(outcomes[0].is_scored());
        assert!(matches!(
            outcomes[1].result,
            Err(ScoringError::InvalidInput { .. })
        ));
        assert!(matches!(
            outcomes[2].result,
            Err(ScoringError::MalformedAlignment { .. })
        ));
        let vowel = outcomes[3].result.as_ref().unwrap();
        assert_eq!(vowel.kind, AnalysisKind::Vowel);
        assert_eq!(vowel.max_points, 5);
    }

    #[test]
    fn callback_sees_every_row() {
        let scorer = AccuracyScorer::standard().unwrap();
        let rows: Vec<ScoringRow> = (0..10).map(|i| row(&i.to_string(), "t↔k", "Consonants")).collect();
        let seen = AtomicUsize::new(0);
        let outcomes = score_batch_with(&scorer, &rows, |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(outcomes.len(), 10);
        assert_eq!(seen.load(Ordering::SeqCst), 10);
    }
}
