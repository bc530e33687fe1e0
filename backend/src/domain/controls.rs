//! Control values driving one render pass.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use dashboard_data::{GenerationError, SERIES_LENGTH, series_start};
use serde::Serialize;
use utoipa::ToSchema;

/// Rows shown in the raw table when the control is not supplied.
pub const DEFAULT_ROWS: usize = 10;

/// Page selected in the navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Menu {
    /// KPI cards, charts and export controls.
    #[default]
    Dashboard,
    /// Welcome page with quick actions.
    Home,
    /// Upload and manual entry widgets.
    DataInput,
    /// Random walk chart and metric cards.
    Visualization,
    /// Application description.
    About,
}

impl Menu {
    /// Navigation entries in display order.
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Home,
        Self::DataInput,
        Self::Visualization,
        Self::About,
    ];

    /// Query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Home => "home",
            Self::DataInput => "data-input",
            Self::Visualization => "visualization",
            Self::About => "about",
        }
    }

    /// Human-readable navigation label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Home => "Home",
            Self::DataInput => "Data Input",
            Self::Visualization => "Visualization",
            Self::About => "About",
        }
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Menu {
    type Err = ControlsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|menu| menu.as_str() == s)
            .ok_or_else(|| ControlsError::UnknownMenu {
                value: s.to_owned(),
            })
    }
}

/// Immutable control values for a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderControls {
    /// Selected page.
    pub menu: Menu,
    /// Dark colour scheme toggle.
    pub dark_mode: bool,
    /// Show the raw data table on the dashboard page.
    pub show_raw: bool,
    /// Rows in the raw data table.
    pub rows: usize,
    /// Invalidate the session cache before fetching.
    pub refresh: bool,
    /// Show the home page alert.
    pub show_alert: bool,
    /// Inclusive lower date bound.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub end_date: Option<NaiveDate>,
}

impl Default for RenderControls {
    fn default() -> Self {
        Self {
            menu: Menu::Dashboard,
            dark_mode: false,
            show_raw: false,
            rows: DEFAULT_ROWS,
            refresh: false,
            show_alert: false,
            start_date: None,
            end_date: None,
        }
    }
}

/// Control values that fall outside their documented domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlsError {
    /// The menu name is not one of the known pages.
    #[error("unknown menu '{value}'")]
    UnknownMenu { value: String },
    /// The raw table row count is outside `1..=90`.
    #[error("rows must be between 1 and {max}, got {value}")]
    RowsOutOfRange { value: usize, max: usize },
    /// A date bound lies outside the generated series.
    #[error("{field} {value} is outside {first}..={last}")]
    DateOutOfRange {
        field: &'static str,
        value: NaiveDate,
        first: NaiveDate,
        last: NaiveDate,
    },
    /// The start date is after the end date.
    #[error("startDate {start} is after endDate {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },
    /// The series calendar could not be computed.
    #[error(transparent)]
    Calendar(#[from] GenerationError),
}

impl ControlsError {
    /// Query parameter the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::UnknownMenu { .. } => "menu",
            Self::RowsOutOfRange { .. } => "rows",
            Self::DateOutOfRange { field, .. } => *field,
            Self::InvertedDateRange { .. } => "startDate",
            Self::Calendar(_) => "dateRange",
        }
    }
}

impl RenderControls {
    /// Check the row count and date range against the generated series.
    ///
    /// # Errors
    ///
    /// Returns [`ControlsError`] describing the first invalid control.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{ControlsError, RenderControls};
    ///
    /// let controls = RenderControls { rows: 0, ..RenderControls::default() };
    /// assert!(matches!(
    ///     controls.validate(),
    ///     Err(ControlsError::RowsOutOfRange { value: 0, .. })
    /// ));
    /// ```
    pub fn validate(self) -> Result<Self, ControlsError> {
        if !(1..=SERIES_LENGTH).contains(&self.rows) {
            return Err(ControlsError::RowsOutOfRange {
                value: self.rows,
                max: SERIES_LENGTH,
            });
        }

        let (first, last) = series_bounds()?;
        for (field, bound) in [("startDate", self.start_date), ("endDate", self.end_date)] {
            if let Some(value) = bound.filter(|date| !(first..=last).contains(date)) {
                return Err(ControlsError::DateOutOfRange {
                    field,
                    value,
                    first,
                    last,
                });
            }
        }

        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => {
                Err(ControlsError::InvertedDateRange { start, end })
            }
            _ => Ok(self),
        }
    }
}

/// First and last dates of every generated series.
///
/// # Errors
///
/// Returns [`GenerationError`] if the calendar cannot represent the range.
pub fn series_bounds() -> Result<(NaiveDate, NaiveDate), GenerationError> {
    let first = series_start()?;
    let span = SERIES_LENGTH.saturating_sub(1) as u64;
    let last = first
        .checked_add_days(Days::new(span))
        .ok_or(GenerationError::CalendarOverflow {
            start: first,
            offset: span,
        })?;
    Ok((first, last))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
    }

    #[test]
    fn defaults_match_documented_values() {
        let controls = RenderControls::default();
        assert_eq!(controls.menu, Menu::Dashboard);
        assert_eq!(controls.rows, 10);
        assert!(!controls.dark_mode && !controls.show_raw && !controls.refresh);
        assert_eq!(controls.clone().validate(), Ok(controls));
    }

    #[test]
    fn series_bounds_cover_first_quarter() {
        assert_eq!(series_bounds(), Ok((date(1, 1), date(3, 30))));
    }

    #[rstest]
    #[case("dashboard", Menu::Dashboard)]
    #[case("data-input", Menu::DataInput)]
    #[case("about", Menu::About)]
    fn parses_menu_names(#[case] raw: &str, #[case] expected: Menu) {
        assert_eq!(raw.parse::<Menu>(), Ok(expected));
    }

    #[test]
    fn unknown_menu_reports_field() {
        let err = "settings".parse::<Menu>().expect_err("unknown menu");
        assert_eq!(err.field(), "menu");
    }

    #[rstest]
    #[case(0)]
    #[case(91)]
    fn rows_outside_series_are_rejected(#[case] rows: usize) {
        let controls = RenderControls {
            rows,
            ..RenderControls::default()
        };
        let err = controls.validate().expect_err("rows out of range");
        assert_eq!(err.field(), "rows");
    }

    #[rstest]
    #[case(Some(date(3, 31)), None, "startDate")]
    #[case(None, NaiveDate::from_ymd_opt(2023, 12, 31), "endDate")]
    #[case(Some(date(2, 2)), Some(date(2, 1)), "startDate")]
    fn invalid_date_ranges_are_rejected(
        #[case] start_date: Option<NaiveDate>,
        #[case] end_date: Option<NaiveDate>,
        #[case] field: &str,
    ) {
        let controls = RenderControls {
            start_date,
            end_date,
            ..RenderControls::default()
        };
        let err = controls.validate().expect_err("invalid range");
        assert_eq!(err.field(), field);
    }

    #[test]
    fn boundary_dates_are_accepted() {
        let controls = RenderControls {
            rows: 90,
            start_date: Some(date(1, 1)),
            end_date: Some(date(3, 30)),
            ..RenderControls::default()
        };
        assert!(controls.validate().is_ok());
    }
}
