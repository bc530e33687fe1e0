//! Time series invariant checks.
//!
//! Generated data always passes these checks; they exist to vet rows that
//! arrive from elsewhere, such as a re-imported CSV export.

use crate::error::ValidationError;
use crate::generator::{
    BOUNCE_RATE_RANGE, CONVERSION_RATE_RANGE, SALES_RANGE, SERIES_LENGTH, series_start,
};
use crate::rows::TimeSeriesRow;

/// Checks a single row against the documented numeric bounds.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] naming the first offending field.
///
/// # Example
///
/// ```
/// use dashboard_data::{SeedPolicy, generate_dataset, validate_row};
///
/// let dataset = generate_dataset(SeedPolicy::Fixed(3)).expect("dataset");
/// for row in &dataset.time_series {
///     validate_row(row).expect("generated rows are valid");
/// }
/// ```
pub fn validate_row(row: &TimeSeriesRow) -> Result<(), ValidationError> {
    check_range(row, "conversion_rate", row.conversion_rate, CONVERSION_RATE_RANGE)?;
    check_range(row, "bounce_rate", row.bounce_rate, BOUNCE_RATE_RANGE)?;
    check_range(
        row,
        "sales",
        f64::from(row.sales),
        (f64::from(SALES_RANGE.0), f64::from(SALES_RANGE.1)),
    )
}

/// Checks length, start date, date contiguity and every row's bounds.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate_time_series(rows: &[TimeSeriesRow]) -> Result<(), ValidationError> {
    if rows.len() != SERIES_LENGTH {
        return Err(ValidationError::RowCount {
            expected: SERIES_LENGTH,
            actual: rows.len(),
        });
    }

    if let (Some(first), Ok(expected)) = (rows.first(), series_start()) {
        if first.date != expected {
            return Err(ValidationError::StartDate {
                expected,
                actual: first.date,
            });
        }
    }

    for (index, pair) in rows.windows(2).enumerate() {
        if let [previous, current] = pair {
            if previous.date.succ_opt() != Some(current.date) {
                return Err(ValidationError::DateGap {
                    index: index + 1,
                    previous: previous.date,
                    actual: current.date,
                });
            }
        }
    }

    rows.iter().try_for_each(validate_row)
}

fn check_range(
    row: &TimeSeriesRow,
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            date: row.date,
            field,
            value,
            min,
            max,
        })
    }
}
