use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use phon_accuracy::pipeline::batch::score_batch_with;
use phon_accuracy::{build_report, AccuracyScorerBuilder, DistanceMode, ScoringConfig, ScoringRow};

#[path = "accuracy_report/json_report_formatter.rs"]
mod json_report_formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DistanceChoice {
    Matrix,
    #[value(name = "index")]
    IndexDifference,
}

impl DistanceChoice {
    fn mode(self) -> DistanceMode {
        match self {
            Self::Matrix => DistanceMode::Matrix,
            Self::IndexDifference => DistanceMode::IndexDifference,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "accuracy_report")]
#[command(about = "Score aligned phonological transcriptions and write a JSON accuracy report")]
struct Args {
    /// JSON array of `{ "id", "alignment", "analysis" }` rows.
    #[arg(long, env = "ACCURACY_REPORT_INPUT")]
    input: PathBuf,
    #[arg(long, env = "ACCURACY_REPORT_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "ACCURACY_REPORT_OUT")]
    out: Option<PathBuf>,
    /// Overrides `feature_table_path` from the config file.
    #[arg(long, env = "ACCURACY_REPORT_FEATURE_TABLE")]
    feature_table: Option<PathBuf>,
    #[arg(long, env = "ACCURACY_REPORT_PLACE_DISTANCE", value_enum)]
    place_distance: Option<DistanceChoice>,
    #[arg(long, env = "ACCURACY_REPORT_MANNER_DISTANCE", value_enum)]
    manner_distance: Option<DistanceChoice>,
    /// Worker threads for row scoring; 0 lets rayon decide.
    #[arg(long, env = "ACCURACY_REPORT_THREADS", default_value_t = 0)]
    threads: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let config = load_config(&args, &repo_root)?;
    let input_path = resolve_path(&repo_root, &args.input);
    let out_path = resolve_out_path(&repo_root, args.out.as_ref());

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .map_err(|err| format!("Failed to configure {} worker threads: {err}", args.threads))?;
    }

    let rows = load_rows(&input_path)?;
    if rows.is_empty() {
        return Err(format!("No rows found in '{}'.", input_path.display()));
    }

    let scorer = AccuracyScorerBuilder::new(config.clone())
        .build()
        .map_err(|err| format!("Failed to build scorer: {err}"))?;

    let progress = ProgressBar::new(rows.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("scoring...");

    let outcomes = score_batch_with(&scorer, &rows, |_| progress.inc(1));
    progress.finish_with_message("done");

    let report = build_report(&config, &outcomes);
    json_report_formatter::write_report(&out_path, &report)?;
    println!("{}", out_path.display());
    Ok(())
}

/// Every path flag, and `feature_table_path` inside the config file, resolves
/// against the same root as `--input` and `--out`.
fn load_config(args: &Args, repo_root: &Path) -> Result<ScoringConfig, String> {
    let mut config = match args.config.as_ref() {
        Some(path) => {
            let path = resolve_path(repo_root, path);
            ScoringConfig::load(&path)
                .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?
        }
        None => ScoringConfig::default(),
    };
    if let Some(path) = args.feature_table.as_ref() {
        config.feature_table_path = path.to_string_lossy().into_owned();
    }
    if !config.feature_table_path.is_empty() {
        config.feature_table_path = resolve_path(repo_root, Path::new(&config.feature_table_path))
            .to_string_lossy()
            .into_owned();
    }
    if let Some(choice) = args.place_distance {
        config.place_distance = choice.mode();
    }
    if let Some(choice) = args.manner_distance {
        config.manner_distance = choice.mode();
    }
    Ok(config)
}

fn load_rows(path: &Path) -> Result<Vec<ScoringRow>, String> {
    let data = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read rows '{}': {err}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|err| format!("Failed to parse rows '{}': {err}", path.display()))
}

fn resolve_out_path(repo_root: &Path, out: Option<&PathBuf>) -> PathBuf {
    if let Some(path) = out {
        return resolve_path(repo_root, path);
    }

    let run_id = Utc::now().format("%Y%m%dT%H%M%SZ");
    repo_root
        .join("target")
        .join("accuracy_reports")
        .join(format!("accuracy-report-{run_id}.json"))
}

fn resolve_path(repo_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("accuracy_report_{name}"));
        fs::create_dir_all(&root).expect("create scratch root");
        root
    }

    #[test]
    fn config_and_feature_table_resolve_like_input() {
        let root = scratch_root("config_paths");
        fs::write(
            root.join("cfg.json"),
            r#"{"feature_table_path": "tables/features.json", "manner_distance": "index_difference"}"#,
        )
        .expect("write config");

        let args = Args::try_parse_from([
            "accuracy_report",
            "--input",
            "rows.json",
            "--config",
            "cfg.json",
        ])
        .unwrap();
        let config = load_config(&args, &root).unwrap();
        assert_eq!(
            PathBuf::from(&config.feature_table_path),
            root.join("tables/features.json")
        );
        assert_eq!(config.manner_distance, DistanceMode::IndexDifference);
        assert_eq!(resolve_path(&root, &args.input), root.join("rows.json"));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn feature_table_flag_overrides_config_and_resolves() {
        let root = scratch_root("feature_flag");
        let args = Args::try_parse_from([
            "accuracy_report",
            "--input",
            "rows.json",
            "--feature-table",
            "ipa.json",
            "--place-distance",
            "index",
        ])
        .unwrap();
        let config = load_config(&args, &root).unwrap();
        assert_eq!(PathBuf::from(&config.feature_table_path), root.join("ipa.json"));
        assert_eq!(config.place_distance, DistanceMode::IndexDifference);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn absolute_paths_are_kept() {
        let root = scratch_root("absolute");
        let absolute = std::env::temp_dir().join("elsewhere.json");
        assert_eq!(resolve_path(&root, &absolute), absolute);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_config_names_resolved_path() {
        let root = scratch_root("missing_config");
        let args =
            Args::try_parse_from(["accuracy_report", "--input", "rows.json", "--config", "nope.json"])
                .unwrap();
        let err = load_config(&args, &root).unwrap_err();
        assert!(err.contains(&root.join("nope.json").display().to_string()), "{err}");
        let _ = fs::remove_dir_all(&root);
    }
}
