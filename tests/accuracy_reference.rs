use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use libtest_mimic::{Arguments, Failed, Trial};
use phon_accuracy::{AccuracyScorer, AnalysisKind};
use serde::Deserialize;

const SUITE_NAME: &str = "accuracy_reference_matches_expected_scores";
const TOLERANCE: f64 = 1e-9;

#[derive(Debug, Deserialize)]
struct ReferenceCase {
    id: String,
    alignment: String,
    analysis: String,
    #[serde(default)]
    accuracy: Option<f64>,
    /// Expected `ScoringError::code()` when the case must fail.
    #[serde(default)]
    error: Option<String>,
}

fn main() {
    let args = Arguments::from_args();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fixture = repo_root
        .join("tests")
        .join("fixtures")
        .join("accuracy_reference.json");

    let cases = match load_cases(&fixture) {
        Ok(cases) => cases,
        Err(err) => {
            run_setup_failure(&args, err);
            return;
        }
    };
    if cases.is_empty() {
        run_setup_failure(&args, format!("No reference cases in '{}'.", fixture.display()));
        return;
    }

    let tests = cases
        .into_iter()
        .map(|case| {
            let test_name = format!("{SUITE_NAME}::{}", case.id);
            Trial::test(test_name, move || run_reference_case(&case).map_err(Failed::from))
        })
        .collect();

    libtest_mimic::run(&args, tests).exit();
}

fn run_setup_failure(args: &Arguments, message: String) {
    let test = Trial::test(format!("{SUITE_NAME}::setup"), move || {
        Err(Failed::from(message))
    });
    libtest_mimic::run(args, vec![test]).exit();
}

fn scorer() -> Result<&'static AccuracyScorer, String> {
    static SCORER: OnceLock<Result<AccuracyScorer, String>> = OnceLock::new();
    SCORER
        .get_or_init(|| AccuracyScorer::standard().map_err(|err| err.to_string()))
        .as_ref()
        .map_err(Clone::clone)
}

fn run_reference_case(case: &ReferenceCase) -> Result<(), String> {
    let scorer = scorer()?;
    let result = AnalysisKind::from_label(&case.analysis)
        .and_then(|kind| scorer.score(&case.alignment, kind));

    match (&case.accuracy, &case.error, result) {
        (Some(expected), None, Ok(score)) => {
            if (score.accuracy - expected).abs() > TOLERANCE {
                return Err(format!(
                    "{}: accuracy mismatch (expected {expected}, got {}; points {}/{})",
                    case.id, score.accuracy, score.points, score.max_points
                ));
            }
            Ok(())
        }
        (None, Some(expected), Err(err)) => {
            if err.code() != expected.as_str() {
                return Err(format!(
                    "{}: wrong failure (expected {expected}, got {}: {err})",
                    case.id,
                    err.code()
                ));
            }
            Ok(())
        }
        (Some(_), None, Err(err)) => Err(format!("{}: unexpected failure: {err}", case.id)),
        (None, Some(expected), Ok(score)) => Err(format!(
            "{}: expected {expected} but scored {}",
            case.id, score.accuracy
        )),
        _ => Err(format!(
            "{}: fixture must set exactly one of `accuracy` or `error`",
            case.id
        )),
    }
}

fn load_cases(path: &Path) -> Result<Vec<ReferenceCase>, String> {
    let file = File::open(path)
        .map_err(|err| format!("Failed to open fixture '{}': {err}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|err| format!("Failed to parse fixture '{}': {err}", path.display()))
}
