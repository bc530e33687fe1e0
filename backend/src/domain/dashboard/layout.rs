//! Render description tree returned by a render pass.
//!
//! The tree is a presentation contract: a front end draws sections in the
//! order they appear in [`RenderDescription::sections`].

use chrono::NaiveDate;
use dashboard_data::TimeSeriesRow;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::controls::Menu;
use crate::domain::variant::{Chrome, Theme, Variant};

/// Complete layout for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenderDescription {
    /// Variant that produced the layout.
    pub variant: Variant,
    /// Header, notices, page body and footer, in that order.
    pub sections: Vec<Section>,
}

impl RenderDescription {
    /// Section kinds in emission order.
    #[must_use]
    pub fn section_kinds(&self) -> Vec<&'static str> {
        self.sections.iter().map(Section::kind).collect()
    }

    /// Page body, if the layout carries one.
    #[must_use]
    pub fn body(&self) -> Option<&PageBody> {
        self.sections.iter().find_map(|section| match section {
            Section::Body(body) => Some(body),
            _ => None,
        })
    }

    /// Notices emitted during the pass.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        self.sections
            .iter()
            .find_map(|section| match section {
                Section::Notices(notices) => Some(notices.items.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }
}

/// One top-level layout section.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "section", rename_all = "camelCase")]
pub enum Section {
    /// Title, chrome and navigation.
    Header(Header),
    /// Transient messages for this pass.
    Notices(Notices),
    /// Content of the selected page.
    Body(PageBody),
    /// Caption and render timestamp.
    Footer(Footer),
}

impl Section {
    /// Serialised discriminator of the section.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Header(_) => "header",
            Self::Notices(_) => "notices",
            Self::Body(_) => "body",
            Self::Footer(_) => "footer",
        }
    }
}

/// Page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub title: String,
    pub chrome: Chrome,
    pub theme: Theme,
    pub navigation: Vec<NavEntry>,
}

/// Navigation entry; exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavEntry {
    pub menu: Menu,
    pub label: String,
    pub active: bool,
}

/// Notices raised while handling the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notices {
    pub items: Vec<Notice>,
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
}

/// Single transient message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// A link or button that triggers a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionLink {
    pub label: String,
    /// HTTP method the front end should use.
    pub method: String,
    pub href: String,
}

/// Content of the selected page.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum PageBody {
    Dashboard(DashboardPage),
    Home(HomePage),
    DataInput(DataInputPage),
    Visualization(VisualizationPage),
    About(AboutPage),
}

/// Static metric card with a trend delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KpiCard {
    pub label: String,
    pub value: String,
    pub delta: String,
}

/// KPI cards, charts, raw table and export controls.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPage {
    pub kpis: Vec<KpiCard>,
    /// Line, donut, bar and scatter charts, in that order.
    pub charts: Vec<Chart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_table: Option<RawTable>,
    pub export: ExportControls,
    pub refresh: ActionLink,
}

/// Chart in the dashboard grid.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Chart {
    Line(LineChart),
    Donut(DonutChart),
    Bar(BarChart),
    Scatter(ScatterChart),
}

impl Chart {
    /// Serialised chart type.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Line(_) => "line",
            Self::Donut(_) => "donut",
            Self::Bar(_) => "bar",
            Self::Scatter(_) => "scatter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<DatePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatePoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonutChart {
    pub title: String,
    pub slices: Vec<Slice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<XyPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct XyPoint {
    pub x: f64,
    pub y: f64,
}

/// Top rows of the filtered time series.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawTable {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub date: NaiveDate,
    pub revenue: f64,
    pub users: f64,
    pub conversion_rate: f64,
    pub bounce_rate: f64,
    pub region: String,
    pub product: String,
    pub sales: u32,
}

impl From<&TimeSeriesRow> for TableRow {
    fn from(row: &TimeSeriesRow) -> Self {
        Self {
            date: row.date,
            revenue: row.revenue,
            users: row.users,
            conversion_rate: row.conversion_rate,
            bounce_rate: row.bounce_rate,
            region: row.region.to_string(),
            product: row.product.to_string(),
            sales: row.sales,
        }
    }
}

/// CSV download and refresh controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportControls {
    pub download: ActionLink,
    pub file_name: String,
    pub row_count: usize,
    pub products: ActionLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub title: String,
    pub intro: String,
    pub features: Vec<String>,
    pub quick_actions: Vec<ActionLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataInputPage {
    pub title: String,
    pub upload: UploadWidget,
    pub manual_entry: ManualEntryForm,
}

/// Description of the CSV upload widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadWidget {
    pub label: String,
    pub accepted_extensions: Vec<String>,
    pub preview_rows: usize,
    pub submit: ActionLink,
}

/// Description of the manual entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntryForm {
    pub title: String,
    pub fields: Vec<FormField>,
    pub submit: ActionLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub input: FieldInput,
}

/// Input widget backing a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldInput {
    Text,
    Number { min: u8, max: u8, default: u8 },
    Select { options: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationPage {
    pub title: String,
    pub chart: WalkChart,
    pub metrics: Vec<KpiCard>,
}

/// Line chart over a cumulative random walk.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalkChart {
    pub points: Vec<WalkPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalkPoint {
    pub x: u32,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AboutPage {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub version_caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub caption: String,
    /// RFC 3339 UTC timestamp of the render pass.
    pub rendered_at: String,
}
