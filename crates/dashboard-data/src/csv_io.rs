//! CSV serialisation and upload previews.

use csv::{ReaderBuilder, StringRecord, Writer};
use serde::Serialize;

use crate::error::CsvError;
use crate::rows::{ProductSummaryRow, TimeSeriesRow};

/// Headers, leading records and record count of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPreview {
    /// Column names from the header row.
    pub headers: Vec<String>,
    /// Up to `limit` leading records.
    pub rows: Vec<Vec<String>>,
    /// Number of records after the header row.
    pub total_rows: usize,
}

/// Serialises the time series with a header row of field names.
///
/// # Errors
///
/// Returns [`CsvError::Write`] if serialisation fails.
///
/// # Example
///
/// ```
/// use dashboard_data::{SeedPolicy, generate_dataset, time_series_from_csv, time_series_to_csv};
///
/// let dataset = generate_dataset(SeedPolicy::Fixed(42)).expect("dataset");
/// let text = time_series_to_csv(&dataset.time_series).expect("csv");
///
/// let header = text.lines().next().expect("header");
/// assert_eq!(header, "date,revenue,users,conversion_rate,bounce_rate,region,product,sales");
/// assert_eq!(time_series_from_csv(&text).expect("parse"), dataset.time_series);
/// ```
pub fn time_series_to_csv(rows: &[TimeSeriesRow]) -> Result<String, CsvError> {
    write_records(rows)
}

/// Serialises the product summary with a header row of field names.
///
/// # Errors
///
/// Returns [`CsvError::Write`] if serialisation fails.
pub fn product_summary_to_csv(rows: &[ProductSummaryRow]) -> Result<String, CsvError> {
    write_records(rows)
}

/// Parses text produced by [`time_series_to_csv`].
///
/// # Errors
///
/// Returns [`CsvError`] when the text is ragged or a field does not parse.
pub fn time_series_from_csv(text: &str) -> Result<Vec<TimeSeriesRow>, CsvError> {
    ReaderBuilder::new()
        .from_reader(text.as_bytes())
        .deserialize()
        .map(|record| record.map_err(CsvError::from))
        .collect()
}

/// Reads the header and up to `limit` records of arbitrary delimited text.
///
/// # Errors
///
/// Rejects input that is not UTF-8, has no header row, has an empty header
/// row, or contains a record whose width differs from the header.
///
/// # Example
///
/// ```
/// use dashboard_data::preview_csv;
///
/// let preview = preview_csv(b"name,age\nada,36\nalan,41\n", 1).expect("preview");
///
/// assert_eq!(preview.headers, vec!["name", "age"]);
/// assert_eq!(preview.rows, vec![vec!["ada".to_owned(), "36".to_owned()]]);
/// assert_eq!(preview.total_rows, 2);
/// ```
pub fn preview_csv(bytes: &[u8], limit: usize) -> Result<CsvPreview, CsvError> {
    let text = std::str::from_utf8(bytes).map_err(|err| CsvError::InvalidEncoding {
        position: err.valid_up_to(),
    })?;
    if text.trim().is_empty() {
        return Err(CsvError::MissingHeader);
    }

    let mut reader = ReaderBuilder::new().from_reader(text.as_bytes());
    let headers = reader.headers().map_err(CsvError::from)?.clone();
    if headers.iter().all(|field| field.trim().is_empty()) {
        return Err(CsvError::NoColumns);
    }

    let mut rows = Vec::new();
    let mut total_rows = 0_usize;
    for record in reader.records() {
        let record = record.map_err(CsvError::from)?;
        if rows.len() < limit {
            rows.push(to_fields(&record));
        }
        total_rows += 1;
    }

    Ok(CsvPreview {
        headers: to_fields(&headers),
        rows,
        total_rows,
    })
}

fn write_records<T: Serialize>(rows: &[T]) -> Result<String, CsvError> {
    let mut writer = Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).map_err(|err| CsvError::Write {
            message: err.to_string(),
        })?;
    }
    let bytes = writer.into_inner().map_err(|err| CsvError::Write {
        message: err.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|err| CsvError::Write {
        message: err.to_string(),
    })
}

fn to_fields(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_owned).collect()
}
