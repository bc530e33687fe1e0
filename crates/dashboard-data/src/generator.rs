//! Synthetic dataset generation.
//!
//! A [`SeedPolicy::Fixed`] seed always produces identical output, while
//! [`SeedPolicy::Unseeded`] draws a fresh seed for every call. The product
//! summary is never randomised.

use chrono::{Days, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::rows::{Dataset, Product, ProductSummaryRow, Region, TimeSeriesRow};

/// Number of daily rows in every generated time series.
pub const SERIES_LENGTH: usize = 90;

/// Calendar year of the first row.
const START_YEAR: i32 = 2024;

/// Starting value of the cumulative revenue walk.
const REVENUE_BASE: f64 = 50_000.0;

/// Daily revenue step range.
const REVENUE_STEP: (f64, f64) = (-500.0, 1_500.0);

/// Starting value of the cumulative user walk.
const USERS_BASE: f64 = 1_000.0;

/// Daily user step range.
const USERS_STEP: (f64, f64) = (-20.0, 80.0);

/// Inclusive conversion rate bounds, in percent.
pub const CONVERSION_RATE_RANGE: (f64, f64) = (2.0, 8.0);

/// Inclusive bounce rate bounds, in percent.
pub const BOUNCE_RATE_RANGE: (f64, f64) = (30.0, 60.0);

/// Inclusive unit sales bounds.
pub const SALES_RANGE: (u32, u32) = (100, 1_000);

/// Literal product summary rows: name, sales, growth, market share.
const PRODUCT_SUMMARY: [(&str, u32, f64, f64); 5] = [
    ("Product A", 125_000, 12.5, 32.5),
    ("Product B", 98_000, 8.3, 25.5),
    ("Product C", 76_000, -2.1, 19.8),
    ("Product D", 54_000, 15.7, 14.0),
    ("Product E", 32_000, -5.4, 8.2),
];

/// How a generation pass obtains its randomness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Seed the generator with a fixed value so every pass is identical.
    Fixed(u64),
    /// Draw a fresh seed per pass; results are not reproducible.
    Unseeded,
}

impl SeedPolicy {
    /// Resolves the seed used for one generation pass.
    #[must_use]
    pub fn resolve(self) -> u64 {
        match self {
            Self::Fixed(seed) => seed,
            Self::Unseeded => rand::rng().random(),
        }
    }

    /// Returns `true` when repeated passes yield identical data.
    #[must_use]
    pub const fn is_reproducible(self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

/// Returns the first day of every generated series.
///
/// # Errors
///
/// Returns [`GenerationError::CalendarOverflow`] if the calendar cannot
/// represent the start date.
pub fn series_start() -> Result<NaiveDate, GenerationError> {
    NaiveDate::from_ymd_opt(START_YEAR, 1, 1).ok_or(GenerationError::CalendarOverflow {
        start: NaiveDate::MIN,
        offset: 0,
    })
}

/// Generates a dataset according to the supplied seed policy.
///
/// # Errors
///
/// Returns [`GenerationError`] if a series date cannot be represented.
///
/// # Example
///
/// ```
/// use dashboard_data::{SERIES_LENGTH, SeedPolicy, generate_dataset};
///
/// let first = generate_dataset(SeedPolicy::Fixed(42)).expect("generated");
/// let second = generate_dataset(SeedPolicy::Fixed(42)).expect("generated");
///
/// assert_eq!(first.time_series.len(), SERIES_LENGTH);
/// assert_eq!(first, second);
/// ```
pub fn generate_dataset(policy: SeedPolicy) -> Result<Dataset, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(policy.resolve());
    generate_dataset_with_rng(&mut rng)
}

/// Generates a dataset from a caller-supplied RNG.
///
/// # Errors
///
/// Returns [`GenerationError`] if a series date cannot be represented.
pub fn generate_dataset_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
) -> Result<Dataset, GenerationError> {
    let start = series_start()?;
    let mut time_series = Vec::with_capacity(SERIES_LENGTH);
    let mut revenue = REVENUE_BASE;
    let mut users = USERS_BASE;

    for offset in 0..SERIES_LENGTH as u64 {
        let date = start
            .checked_add_days(Days::new(offset))
            .ok_or(GenerationError::CalendarOverflow { start, offset })?;

        revenue += rng.random_range(REVENUE_STEP.0..=REVENUE_STEP.1);
        users += rng.random_range(USERS_STEP.0..=USERS_STEP.1);

        time_series.push(TimeSeriesRow {
            date,
            revenue: round_cents(revenue),
            users: users.round(),
            conversion_rate: round_cents(
                rng.random_range(CONVERSION_RATE_RANGE.0..=CONVERSION_RATE_RANGE.1),
            ),
            bounce_rate: round_cents(rng.random_range(BOUNCE_RATE_RANGE.0..=BOUNCE_RATE_RANGE.1)),
            region: pick_region(rng),
            product: pick_product(rng),
            sales: rng.random_range(SALES_RANGE.0..=SALES_RANGE.1),
        });
    }

    Ok(Dataset {
        time_series,
        product_summary: product_summary(),
    })
}

/// Returns the fixed product summary rows.
///
/// # Example
///
/// ```
/// use dashboard_data::product_summary;
///
/// let sales: Vec<u32> = product_summary().iter().map(|row| row.sales).collect();
/// assert_eq!(sales, vec![125_000, 98_000, 76_000, 54_000, 32_000]);
/// ```
#[must_use]
pub fn product_summary() -> Vec<ProductSummaryRow> {
    PRODUCT_SUMMARY
        .iter()
        .map(|&(name, sales, growth_pct, market_share_pct)| ProductSummaryRow {
            product_name: name.to_owned(),
            sales,
            growth_pct,
            market_share_pct,
        })
        .collect()
}

/// Generates a cumulative walk of standard-normal steps.
///
/// Each step is drawn with the Box-Muller transform from the policy's RNG,
/// so a fixed seed always yields the same walk.
///
/// # Example
///
/// ```
/// use dashboard_data::{SeedPolicy, random_walk};
///
/// let walk = random_walk(SeedPolicy::Fixed(42), 30);
/// assert_eq!(walk.len(), 30);
/// assert_eq!(walk, random_walk(SeedPolicy::Fixed(42), 30));
/// ```
#[must_use]
pub fn random_walk(policy: SeedPolicy, points: usize) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(policy.resolve());
    let mut total = 0.0;
    (0..points)
        .map(|_| {
            total += standard_normal(&mut rng);
            round_cents(total)
        })
        .collect()
}

fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // Shift into (0, 1] so the logarithm is finite.
    let radius = (-2.0 * (1.0 - rng.random::<f64>()).ln()).sqrt();
    let angle = std::f64::consts::TAU * rng.random::<f64>();
    radius * angle.cos()
}

fn pick_region<R: Rng + ?Sized>(rng: &mut R) -> Region {
    match rng.random_range(0..Region::ALL.len()) {
        0 => Region::North,
        1 => Region::South,
        2 => Region::East,
        _ => Region::West,
    }
}

fn pick_product<R: Rng + ?Sized>(rng: &mut R) -> Product {
    match rng.random_range(0..Product::ALL.len()) {
        0 => Product::A,
        1 => Product::B,
        2 => Product::C,
        _ => Product::D,
    }
}

// Two decimal places keep CSV output readable while staying within bounds.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
