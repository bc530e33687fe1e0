//! CLI support for exporting a generated dataset as CSV.
//!
//! The `dashboard-data-export` binary delegates to these functions so the
//! parsing and export flow can be exercised without spawning a process.

mod error;

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};

pub use self::error::CliError;
use crate::atomic_io::{write_product_summary_csv, write_time_series_csv};
use crate::error::ExportError;
use crate::generator::{SeedPolicy, generate_dataset};

/// Usage text printed for `-h` and `--help`.
pub const USAGE: &str = concat!(
    "Usage: dashboard-data-export --output <path> [options]\n",
    "\n",
    "Options:\n",
    "  --output <path>    Destination for the time series CSV\n",
    "  --seed <seed>      RNG seed value (defaults to random)\n",
    "  --summary          Also write <stem>_products.csv beside the output\n",
    "  -h, --help         Print this help output\n",
);

/// Parsed options for the export CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    output: Utf8PathBuf,
    seed: Option<u64>,
    summary: bool,
}

impl Options {
    /// Returns the destination for the time series CSV.
    ///
    /// # Example
    ///
    /// ```
    /// use dashboard_data::export_cli::{ParseOutcome, parse_args};
    ///
    /// let args = vec!["--output".to_owned(), "out/data.csv".to_owned()];
    /// let ParseOutcome::Options(options) = parse_args(args.into_iter()).expect("parse") else {
    ///     panic!("expected options");
    /// };
    ///
    /// assert_eq!(options.output(), "out/data.csv");
    /// ```
    #[must_use]
    pub fn output(&self) -> &Utf8Path {
        &self.output
    }

    /// Seed policy implied by the `--seed` flag.
    #[must_use]
    pub fn seed_policy(&self) -> SeedPolicy {
        self.seed.map_or(SeedPolicy::Unseeded, SeedPolicy::Fixed)
    }
}

/// Outcome of parsing CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Show help output and exit successfully.
    Help,
    /// Continue with the parsed options.
    Options(Options),
}

/// Files written by a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// Seed the dataset was generated from.
    pub seed: u64,
    /// Number of time series rows written.
    pub rows: usize,
    /// Path of the time series CSV.
    pub time_series_path: Utf8PathBuf,
    /// Path of the product summary CSV, when requested.
    pub summary_path: Option<Utf8PathBuf>,
}

/// Parses CLI arguments into export options.
///
/// # Errors
///
/// Returns [`CliError`] when `--output` is missing, a flag lacks its value,
/// or a value cannot be parsed.
pub fn parse_args<I>(mut args: I) -> Result<ParseOutcome, CliError>
where
    I: Iterator<Item = String>,
{
    let mut output: Option<Utf8PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut summary = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParseOutcome::Help),
            "--output" => output = Some(Utf8PathBuf::from(next_value(&mut args, "--output")?)),
            "--seed" => {
                let value = next_value(&mut args, "--seed")?;
                seed = Some(parse_number(&value, "--seed")?);
            }
            "--summary" => summary = true,
            _ => return Err(CliError::UnknownArgument { value: arg }),
        }
    }

    Ok(ParseOutcome::Options(Options {
        output: output.ok_or(CliError::MissingOutputPath)?,
        seed,
        summary,
    }))
}

/// Generates a dataset and writes the requested CSV files.
///
/// An unseeded run draws its seed up front so the success message can
/// report it; re-running with that `--seed` reproduces the export.
///
/// # Errors
///
/// Returns [`CliError`] when the output directory cannot be opened or the
/// export fails.
pub fn run_export(options: &Options) -> Result<Export, CliError> {
    let file_name = options
        .output
        .file_name()
        .ok_or_else(|| CliError::InvalidOutputPath {
            path: options.output.clone(),
        })?;
    let parent = match options.output.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| {
        CliError::OutputDirectory {
            path: parent.to_path_buf(),
            message: err.to_string(),
        }
    })?;

    let seed = options.seed_policy().resolve();
    let dataset = generate_dataset(SeedPolicy::Fixed(seed)).map_err(ExportError::from)?;
    write_time_series_csv(&dir, Utf8Path::new(file_name), &dataset.time_series)?;

    let summary_path = if options.summary {
        let summary_name = summary_file_name(&options.output);
        write_product_summary_csv(&dir, Utf8Path::new(&summary_name), &dataset.product_summary)?;
        Some(parent.join(summary_name))
    } else {
        None
    };

    Ok(Export {
        seed,
        rows: dataset.time_series.len(),
        time_series_path: options.output.clone(),
        summary_path,
    })
}

/// Formats the success message emitted by the CLI.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use dashboard_data::export_cli::{Export, success_message};
///
/// let export = Export {
///     seed: 42,
///     rows: 90,
///     time_series_path: Utf8PathBuf::from("data.csv"),
///     summary_path: None,
/// };
///
/// assert_eq!(success_message(&export), "Wrote 90 rows (seed=42) to data.csv");
/// ```
#[must_use]
pub fn success_message(export: &Export) -> String {
    let message = format!(
        "Wrote {} rows (seed={}) to {}",
        export.rows, export.seed, export.time_series_path
    );
    match &export.summary_path {
        Some(path) => format!("{message}; product summary to {path}"),
        None => message,
    }
}

fn summary_file_name(output: &Utf8Path) -> String {
    let stem = output.file_stem().unwrap_or("dashboard_data");
    format!("{stem}_products.csv")
}

fn next_value<I>(args: &mut I, flag: &'static str) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    args.next().ok_or(CliError::MissingValue { flag })
}

fn parse_number<T>(value: &str, flag: &'static str) -> Result<T, CliError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|err| CliError::InvalidNumber {
        flag,
        value: value.to_owned(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests;
