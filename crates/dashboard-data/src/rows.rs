//! Dataset row types.
//!
//! These types are independent of backend presentation types. Field names
//! double as CSV column headers, so they stay in `snake_case`.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sales region attached to each time series row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    /// Northern region.
    North,
    /// Southern region.
    South,
    /// Eastern region.
    East,
    /// Western region.
    West,
}

impl Region {
    /// All regions in display order.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Returns the region label used in CSV and charts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::South => "South",
            Self::East => "East",
            Self::West => "West",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product code attached to each time series row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Product {
    /// Product line A.
    A,
    /// Product line B.
    B,
    /// Product line C.
    C,
    /// Product line D.
    D,
}

impl Product {
    /// All product codes in display order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Returns the product code used in CSV and charts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day of synthetic dashboard metrics.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use dashboard_data::{Product, Region, TimeSeriesRow};
///
/// let row = TimeSeriesRow {
///     date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
///     revenue: 50_250.0,
///     users: 1_010.0,
///     conversion_rate: 4.25,
///     bounce_rate: 41.5,
///     region: Region::North,
///     product: Product::B,
///     sales: 512,
/// };
///
/// assert_eq!(row.region.as_str(), "North");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRow {
    /// Calendar day the row describes.
    pub date: NaiveDate,
    /// Cumulative revenue produced by a random walk.
    pub revenue: f64,
    /// Cumulative user count produced by a random walk.
    pub users: f64,
    /// Conversion rate percentage in `[2, 8]`.
    pub conversion_rate: f64,
    /// Bounce rate percentage in `[30, 60]`.
    pub bounce_rate: f64,
    /// Region the day's sales are attributed to.
    pub region: Region,
    /// Product the day's sales are attributed to.
    pub product: Product,
    /// Units sold, in `[100, 1000]`.
    pub sales: u32,
}

/// One row of the fixed product summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummaryRow {
    /// Display name of the product.
    pub product_name: String,
    /// Total units sold.
    pub sales: u32,
    /// Signed period-over-period growth percentage.
    pub growth_pct: f64,
    /// Share of the market as a percentage.
    pub market_share_pct: f64,
}

/// The pair of tables produced by one generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Daily metrics, one row per consecutive day.
    pub time_series: Vec<TimeSeriesRow>,
    /// Fixed product summary rows.
    pub product_summary: Vec<ProductSummaryRow>,
}
