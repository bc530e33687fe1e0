//! Unit tests for the export CLI helpers.

use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::*;
use crate::csv_io::time_series_from_csv;

struct OutputDir {
    _root: TempDir,
    path: Utf8PathBuf,
}

impl OutputDir {
    fn file(&self, name: &str) -> Utf8PathBuf {
        self.path.join(name)
    }

    fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.file(name)).expect("read export")
    }
}

#[fixture]
fn output_dir() -> OutputDir {
    let root = TempDir::new().expect("temp dir");
    let path = Utf8Path::from_path(root.path())
        .expect("utf-8 temp dir")
        .to_path_buf();
    OutputDir { _root: root, path }
}

fn args(values: &[&str]) -> impl Iterator<Item = String> {
    values
        .iter()
        .map(|value| (*value).to_owned())
        .collect::<Vec<_>>()
        .into_iter()
}

fn options(output: Utf8PathBuf, seed: Option<u64>, summary: bool) -> Options {
    Options {
        output,
        seed,
        summary,
    }
}

#[rstest]
#[case(&["--help"])]
#[case(&["-h"])]
#[case(&["--output", "data.csv", "--help"])]
fn parse_args_returns_help_for_help_flag(#[case] values: &[&str]) {
    assert_eq!(parse_args(args(values)), Ok(ParseOutcome::Help));
}

#[test]
fn parse_args_requires_output_path() {
    let err = parse_args(args(&["--seed", "42"])).expect_err("expected error");
    assert_eq!(err, CliError::MissingOutputPath);
}

#[rstest]
#[case("--output")]
#[case("--seed")]
fn parse_args_reports_missing_value(#[case] flag: &'static str) {
    let err = parse_args(args(&[flag])).expect_err("expected error");
    assert_eq!(err, CliError::MissingValue { flag });
}

#[test]
fn parse_args_reports_unknown_arguments() {
    let err = parse_args(args(&["--output", "data.csv", "--rows"])).expect_err("expected error");
    assert_eq!(
        err,
        CliError::UnknownArgument {
            value: "--rows".to_owned(),
        }
    );
}

#[test]
fn parse_args_reports_invalid_numbers() {
    let err = parse_args(args(&["--output", "data.csv", "--seed", "-1"])).expect_err("error");
    let CliError::InvalidNumber { flag, value, .. } = err else {
        panic!("expected invalid number error");
    };
    assert_eq!(flag, "--seed");
    assert_eq!(value, "-1");
}

#[test]
fn parse_args_parses_full_options() {
    let outcome = parse_args(args(&["--summary", "--output", "out.csv", "--seed", "42"]))
        .expect("parse args");
    assert_eq!(
        outcome,
        ParseOutcome::Options(options(Utf8PathBuf::from("out.csv"), Some(42), true))
    );
}

#[test]
fn seed_flag_selects_fixed_policy() {
    let fixed = options(Utf8PathBuf::from("a.csv"), Some(7), false);
    let random = options(Utf8PathBuf::from("a.csv"), None, false);
    assert_eq!(fixed.seed_policy(), SeedPolicy::Fixed(7));
    assert_eq!(random.seed_policy(), SeedPolicy::Unseeded);
}

#[rstest]
fn run_export_writes_time_series(output_dir: OutputDir) {
    let export = run_export(&options(output_dir.file("series.csv"), Some(42), false))
        .expect("export succeeds");

    assert_eq!(export.seed, 42);
    assert_eq!(export.rows, 90);
    assert_eq!(export.summary_path, None);
    let rows = time_series_from_csv(&output_dir.read("series.csv")).expect("parse export");
    assert_eq!(rows.len(), 90);
}

#[rstest]
fn run_export_writes_summary_beside_output(output_dir: OutputDir) {
    let export = run_export(&options(output_dir.file("dashboard_data.csv"), None, true))
        .expect("export succeeds");

    assert_eq!(
        export.summary_path,
        Some(output_dir.file("dashboard_data_products.csv"))
    );
    let summary = output_dir.read("dashboard_data_products.csv");
    assert_eq!(summary.lines().count(), 6);
}

#[rstest]
fn seeded_exports_are_identical(output_dir: OutputDir) {
    run_export(&options(output_dir.file("a.csv"), Some(5), false)).expect("first export");
    run_export(&options(output_dir.file("b.csv"), Some(5), false)).expect("second export");
    assert_eq!(output_dir.read("a.csv"), output_dir.read("b.csv"));
}

#[rstest]
fn unseeded_export_reports_reproducible_seed(output_dir: OutputDir) {
    let export =
        run_export(&options(output_dir.file("a.csv"), None, false)).expect("unseeded export");
    run_export(&options(output_dir.file("b.csv"), Some(export.seed), false))
        .expect("replayed export");
    assert_eq!(output_dir.read("a.csv"), output_dir.read("b.csv"));
}

#[rstest]
fn run_export_reports_missing_directory(output_dir: OutputDir) {
    let missing = output_dir.path.join("absent").join("data.csv");
    let err = run_export(&options(missing, Some(1), false)).expect_err("expected error");
    let CliError::OutputDirectory { path, message } = err else {
        panic!("expected output directory error");
    };
    assert_eq!(path, output_dir.path.join("absent"));
    assert!(!message.is_empty());
}

#[test]
fn run_export_rejects_paths_without_file_name() {
    let err = run_export(&options(Utf8PathBuf::from(".."), Some(1), false))
        .expect_err("expected error");
    assert_eq!(
        err,
        CliError::InvalidOutputPath {
            path: Utf8PathBuf::from(".."),
        }
    );
}

#[test]
fn success_message_mentions_summary_when_written() {
    let export = Export {
        seed: 9,
        rows: 90,
        time_series_path: Utf8PathBuf::from("out/data.csv"),
        summary_path: Some(Utf8PathBuf::from("out/data_products.csv")),
    };
    assert_eq!(
        success_message(&export),
        "Wrote 90 rows (seed=9) to out/data.csv; product summary to out/data_products.csv"
    );
}
