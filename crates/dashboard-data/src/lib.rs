//! Synthetic analytics data for the demo dashboard.
//!
//! The crate generates a 90-day time series of business metrics and a fixed
//! product summary, memoises the result per owner, and converts it to and
//! from CSV. It is independent of backend presentation types so the HTTP
//! service and the export CLI share one data layer.
//!
//! # Overview
//!
//! - Seeded or unseeded generation through [`SeedPolicy`]
//! - Single-entry memoisation via [`Memo`] and [`DatasetProvider`]
//! - Presentation aggregates such as [`sales_by_region`]
//! - Invariant checks for imported rows
//! - CSV export, re-import and upload previews
//!
//! # Example
//!
//! ```
//! use dashboard_data::{DatasetProvider, SeedPolicy, sales_by_region};
//!
//! let provider = DatasetProvider::new(SeedPolicy::Fixed(42));
//! let dataset = provider.fetch().expect("dataset");
//!
//! assert_eq!(dataset.time_series.len(), 90);
//! assert_eq!(dataset.product_summary.len(), 5);
//! assert_eq!(sales_by_region(&dataset.time_series).len(), 4);
//! ```

mod aggregate;
mod atomic_io;
mod csv_io;
mod error;
pub mod export_cli;
mod generator;
mod memo;
mod provider;
mod rows;
mod validation;

pub use aggregate::{RegionSales, filter_date_range, sales_by_region, top_rows, total_sales};
pub use atomic_io::{write_product_summary_csv, write_time_series_csv};
pub use csv_io::{
    CsvPreview, preview_csv, product_summary_to_csv, time_series_from_csv, time_series_to_csv,
};
pub use error::{CsvError, ExportError, GenerationError, ValidationError};
pub use generator::{
    BOUNCE_RATE_RANGE, CONVERSION_RATE_RANGE, SALES_RANGE, SERIES_LENGTH, SeedPolicy,
    generate_dataset, generate_dataset_with_rng, product_summary, random_walk, series_start,
};
pub use memo::Memo;
pub use provider::DatasetProvider;
pub use rows::{Dataset, Product, ProductSummaryRow, Region, TimeSeriesRow};
pub use validation::{validate_row, validate_time_series};
