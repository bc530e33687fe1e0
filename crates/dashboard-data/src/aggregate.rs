//! Presentation aggregates over the time series.
//!
//! These helpers never mutate the dataset; callers receive owned summaries
//! or borrowed slices.

use chrono::NaiveDate;

use crate::rows::{Region, TimeSeriesRow};

/// Total unit sales attributed to one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSales {
    /// Region the total belongs to.
    pub region: Region,
    /// Sum of `sales` across the region's rows.
    pub sales: u64,
}

/// Sums sales per region.
///
/// Always returns four groups ordered North, South, East, West; regions
/// without rows report zero.
///
/// # Example
///
/// ```
/// use dashboard_data::{SeedPolicy, generate_dataset, sales_by_region, total_sales};
///
/// let dataset = generate_dataset(SeedPolicy::Fixed(42)).expect("dataset");
/// let groups = sales_by_region(&dataset.time_series);
///
/// assert_eq!(groups.len(), 4);
/// let grouped: u64 = groups.iter().map(|group| group.sales).sum();
/// assert_eq!(grouped, total_sales(&dataset.time_series));
/// ```
#[must_use]
pub fn sales_by_region(rows: &[TimeSeriesRow]) -> Vec<RegionSales> {
    Region::ALL
        .iter()
        .map(|&region| RegionSales {
            region,
            sales: rows
                .iter()
                .filter(|row| row.region == region)
                .map(|row| u64::from(row.sales))
                .sum(),
        })
        .collect()
}

/// Sums sales across every row.
#[must_use]
pub fn total_sales(rows: &[TimeSeriesRow]) -> u64 {
    rows.iter().map(|row| u64::from(row.sales)).sum()
}

/// Returns the first `n` rows, clamped to the number available.
#[must_use]
pub fn top_rows(rows: &[TimeSeriesRow], n: usize) -> &[TimeSeriesRow] {
    rows.get(..n.min(rows.len())).unwrap_or(rows)
}

/// Returns rows dated within `[start, end]`.
///
/// Either bound may be omitted. An inverted range yields no rows.
#[must_use]
pub fn filter_date_range(
    rows: &[TimeSeriesRow],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<TimeSeriesRow> {
    rows.iter()
        .filter(|row| start.is_none_or(|bound| row.date >= bound))
        .filter(|row| end.is_none_or(|bound| row.date <= bound))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::generator::{SeedPolicy, generate_dataset};

    #[fixture]
    fn rows() -> Vec<TimeSeriesRow> {
        generate_dataset(SeedPolicy::Fixed(42))
            .expect("dataset")
            .time_series
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
    }

    #[rstest]
    fn region_groups_sum_to_total(rows: Vec<TimeSeriesRow>) {
        let groups = sales_by_region(&rows);
        let order: Vec<_> = groups.iter().map(|group| group.region).collect();
        assert_eq!(order, Region::ALL.to_vec());
        assert_eq!(
            groups.iter().map(|group| group.sales).sum::<u64>(),
            total_sales(&rows)
        );
    }

    #[test]
    fn empty_input_still_reports_four_groups() {
        let groups = sales_by_region(&[]);
        assert_eq!(groups.len(), 4);
        assert!(groups.iter().all(|group| group.sales == 0));
    }

    #[rstest]
    #[case(10, 10)]
    #[case(90, 90)]
    #[case(500, 90)]
    #[case(0, 0)]
    fn top_rows_clamps_to_length(
        rows: Vec<TimeSeriesRow>,
        #[case] requested: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(top_rows(&rows, requested).len(), expected);
    }

    #[rstest]
    fn date_filter_is_inclusive(rows: Vec<TimeSeriesRow>) {
        let filtered = filter_date_range(&rows, Some(date(1, 10)), Some(date(1, 19)));
        assert_eq!(filtered.len(), 10);
        assert_eq!(filtered.first().map(|row| row.date), Some(date(1, 10)));
        assert_eq!(filtered.last().map(|row| row.date), Some(date(1, 19)));
    }

    #[rstest]
    fn open_bounds_keep_everything(rows: Vec<TimeSeriesRow>) {
        assert_eq!(filter_date_range(&rows, None, None).len(), rows.len());
        assert_eq!(filter_date_range(&rows, Some(date(3, 1)), None).len(), 30);
    }

    #[rstest]
    fn inverted_range_is_empty(rows: Vec<TimeSeriesRow>) {
        assert!(filter_date_range(&rows, Some(date(2, 1)), Some(date(1, 1))).is_empty());
    }
}
