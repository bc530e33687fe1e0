//! OpenAPI documentation for the dashboard API.
//!
//! [`ApiDoc`] registers every HTTP endpoint and the render description
//! schemas. Swagger UI serves it at `/docs` in debug builds.

use utoipa::OpenApi;

use crate::domain::dashboard::{
    AboutPage, ActionLink, Bar, BarChart, Chart, DashboardPage, DataInputPage, DatePoint,
    DonutChart, ExportControls, FieldInput, Footer, FormField, Header, HomePage, KpiCard,
    LineChart, ManualEntryForm, NavEntry, Notice, NoticeLevel, Notices, PageBody, RawTable,
    RenderDescription, ScatterChart, Section, Slice, TableRow, UploadWidget, VisualizationPage,
    WalkChart, WalkPoint, XyPoint,
};
use crate::domain::{Category, Chrome, Error, ErrorCode, Menu, Theme, Variant};
use crate::inbound::http::dashboard::CacheClearResponse;
use crate::inbound::http::uploads::{
    ManualEntryRequest, ManualEntryResponse, UploadPreviewResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Synthetic dashboard API",
        description = "Per-session render descriptions, CSV exports and data input endpoints."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::dashboard::render_dashboard,
        crate::inbound::http::dashboard::export_time_series,
        crate::inbound::http::dashboard::export_product_summary,
        crate::inbound::http::dashboard::clear_cache,
        crate::inbound::http::uploads::preview,
        crate::inbound::http::uploads::submit_manual_entry,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error, ErrorCode, RenderDescription, Section, Header, NavEntry, Notices, Notice,
        NoticeLevel, ActionLink, PageBody, KpiCard, DashboardPage, Chart, LineChart, DatePoint,
        DonutChart, Slice, BarChart, Bar, ScatterChart, XyPoint, RawTable, TableRow,
        ExportControls, HomePage, DataInputPage, UploadWidget, ManualEntryForm, FormField,
        FieldInput, VisualizationPage, WalkChart, WalkPoint, AboutPage, Footer, Variant, Chrome,
        Theme, Menu, Category, CacheClearResponse, UploadPreviewResponse, ManualEntryRequest,
        ManualEntryResponse,
    )),
    tags(
        (name = "dashboard", description = "Render passes, exports and cache control"),
        (name = "data-input", description = "Upload previews and manual entries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
