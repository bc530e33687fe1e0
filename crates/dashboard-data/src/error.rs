//! Error types for the dashboard-data crate.
//!
//! This module defines semantic error enums for dataset generation, row
//! validation, CSV handling, and export, following the project's error
//! handling conventions with `thiserror`.

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while generating a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A date in the series could not be represented by the calendar.
    #[error("calendar overflow generating day {offset} after {start}")]
    CalendarOverflow {
        /// First day of the series.
        start: NaiveDate,
        /// Offset in days that could not be represented.
        offset: u64,
    },
}

/// Violations of the documented time series invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The series does not contain the expected number of rows.
    #[error("expected {expected} rows, found {actual}")]
    RowCount {
        /// Expected number of rows.
        expected: usize,
        /// Number of rows found.
        actual: usize,
    },
    /// The first row does not fall on the series start date.
    #[error("series must start on {expected}, found {actual}")]
    StartDate {
        /// Expected first date.
        expected: NaiveDate,
        /// Date found in the first row.
        actual: NaiveDate,
    },
    /// Two adjacent rows are not exactly one day apart.
    #[error("row {index} dated {actual} does not follow {previous}")]
    DateGap {
        /// Index of the offending row.
        index: usize,
        /// Date of the preceding row.
        previous: NaiveDate,
        /// Date of the offending row.
        actual: NaiveDate,
    },
    /// A numeric field fell outside its documented range.
    #[error("{field} value {value} outside [{min}, {max}] on {date}")]
    OutOfRange {
        /// Date of the offending row.
        date: NaiveDate,
        /// Name of the offending field.
        field: &'static str,
        /// Value found.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
}

/// Errors raised while reading or writing delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    /// The input contained no header row.
    #[error("input contains no header row")]
    MissingHeader,
    /// The header row contained no columns.
    #[error("header row contains no columns")]
    NoColumns,
    /// The input is not valid UTF-8.
    #[error("input is not valid UTF-8 (byte {position})")]
    InvalidEncoding {
        /// Byte offset of the first invalid sequence.
        position: usize,
    },
    /// A record had a different number of fields from the header.
    #[error("record {line} has {found} fields, expected {expected}")]
    RaggedRecord {
        /// One-based line number of the offending record.
        line: u64,
        /// Number of fields in the header.
        expected: u64,
        /// Number of fields in the record.
        found: u64,
    },
    /// The input could not be parsed.
    #[error("malformed CSV: {message}")]
    Malformed {
        /// Parser error message.
        message: String,
    },
    /// Serialising rows failed.
    #[error("failed to write CSV: {message}")]
    Write {
        /// Writer error message.
        message: String,
    },
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::UnequalLengths {
                pos,
                expected_len,
                len,
            } => Self::RaggedRecord {
                line: pos.as_ref().map_or(0, csv::Position::line),
                expected: *expected_len,
                found: *len,
            },
            csv::ErrorKind::Utf8 { err: utf8, .. } => Self::InvalidEncoding {
                position: utf8.valid_up_to(),
            },
            _ => Self::Malformed {
                message: err.to_string(),
            },
        }
    }
}

/// Errors raised while exporting CSV files to disk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The export file could not be written.
    #[error("failed to write export file at '{path}': {message}")]
    WriteError {
        /// Path to the export file.
        path: Utf8PathBuf,
        /// Description of the write error.
        message: String,
    },
    /// The rows could not be serialised.
    #[error("export serialisation failed: {0}")]
    Csv(#[from] CsvError),
    /// The dataset could not be generated.
    #[error("dataset generation failed: {0}")]
    Generation(#[from] GenerationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
    }

    #[test]
    fn generation_error_overflow_formats_correctly() {
        let err = GenerationError::CalendarOverflow {
            start: date(1),
            offset: 7,
        };
        assert_eq!(
            err.to_string(),
            "calendar overflow generating day 7 after 2024-01-01"
        );
    }

    #[test]
    fn validation_error_gap_formats_correctly() {
        let err = ValidationError::DateGap {
            index: 3,
            previous: date(2),
            actual: date(5),
        };
        assert_eq!(
            err.to_string(),
            "row 3 dated 2024-01-05 does not follow 2024-01-02"
        );
    }

    #[test]
    fn validation_error_range_formats_correctly() {
        let err = ValidationError::OutOfRange {
            date: date(9),
            field: "bounce_rate",
            value: 61.5,
            min: 30.0,
            max: 60.0,
        };
        assert_eq!(
            err.to_string(),
            "bounce_rate value 61.5 outside [30, 60] on 2024-01-09"
        );
    }

    #[test]
    fn csv_error_ragged_formats_correctly() {
        let err = CsvError::RaggedRecord {
            line: 3,
            expected: 2,
            found: 3,
        };
        assert_eq!(err.to_string(), "record 3 has 3 fields, expected 2");
    }

    #[test]
    fn export_error_write_formats_correctly() {
        let err = ExportError::WriteError {
            path: Utf8PathBuf::from("out/data.csv"),
            message: "permission denied".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to write export file at 'out/data.csv': permission denied"
        );
    }
}
