//! Dashboard HTTP handlers.
//!
//! ```text
//! GET  /api/v1/dashboard
//! GET  /api/v1/dashboard/export.csv
//! GET  /api/v1/dashboard/products.csv
//! POST /api/v1/dashboard/cache/clear
//! ```

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, post, web};
use dashboard_data::{CsvError, product_summary_to_csv, time_series_to_csv};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    DEFAULT_ROWS, EXPORT_FILE_NAME, Error, PRODUCTS_FILE_NAME, RenderControls, RenderDescription,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::{no_store_header, private_no_cache_header};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, controls_error, parse_count, parse_date, parse_flag, parse_menu,
};

/// Raw control values from the query string.
///
/// Values arrive as strings so malformed input yields a field-level 400
/// rather than a generic deserialisation failure.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// `dashboard`, `home`, `data-input`, `visualization` or `about`.
    pub menu: Option<String>,
    pub dark_mode: Option<String>,
    pub show_raw: Option<String>,
    /// Raw table rows, 1 to 90.
    pub rows: Option<String>,
    /// Invalidate the session cache before rendering.
    pub refresh: Option<String>,
    pub show_alert: Option<String>,
    /// Inclusive `YYYY-MM-DD` lower bound.
    pub start_date: Option<String>,
    /// Inclusive `YYYY-MM-DD` upper bound.
    pub end_date: Option<String>,
}

impl DashboardQuery {
    fn into_controls(self) -> Result<RenderControls, Error> {
        let controls = RenderControls {
            menu: parse_menu(self.menu.as_deref())?,
            dark_mode: parse_flag(self.dark_mode.as_deref(), FieldName::new("darkMode"))?,
            show_raw: parse_flag(self.show_raw.as_deref(), FieldName::new("showRaw"))?,
            rows: parse_count(self.rows.as_deref(), FieldName::new("rows"), DEFAULT_ROWS)?,
            refresh: parse_flag(self.refresh.as_deref(), FieldName::new("refresh"))?,
            show_alert: parse_flag(self.show_alert.as_deref(), FieldName::new("showAlert"))?,
            start_date: parse_date(self.start_date.as_deref(), FieldName::new("startDate"))?,
            end_date: parse_date(self.end_date.as_deref(), FieldName::new("endDate"))?,
        };
        controls.validate().map_err(|err| controls_error(&err))
    }
}

/// Outcome of a cache clear request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheClearResponse {
    /// Whether the session held a dataset that was discarded.
    pub cleared: bool,
}

/// Run one render pass for the caller's session.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    params(DashboardQuery),
    responses(
        (
            status = 200,
            description = "Render description",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = RenderDescription
        ),
        (status = 400, description = "Invalid control value", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "renderDashboard"
)]
#[get("/dashboard")]
pub async fn render_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<DashboardQuery>,
) -> ApiResult<HttpResponse> {
    let controls = query.into_inner().into_controls()?;
    let session_id = session.session_id()?;
    debug!(session = %session_id, menu = %controls.menu, "render pass");
    let description = state.dashboard.render(session_id, controls).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(description))
}

/// Download the session's time series as CSV.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/export.csv",
    responses(
        (
            status = 200,
            description = "Time series CSV",
            content_type = "text/csv",
            headers(("Content-Disposition" = String, description = "Attachment file name")),
            body = String
        ),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "exportTimeSeries"
)]
#[get("/dashboard/export.csv")]
pub async fn export_time_series(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let dataset = state.dashboard.dataset(session.session_id()?).await?;
    let body = time_series_to_csv(&dataset.time_series).map_err(map_csv_error)?;
    Ok(csv_attachment(EXPORT_FILE_NAME, body))
}

/// Download the product summary as CSV.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/products.csv",
    responses(
        (
            status = 200,
            description = "Product summary CSV",
            content_type = "text/csv",
            headers(("Content-Disposition" = String, description = "Attachment file name")),
            body = String
        ),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "exportProductSummary"
)]
#[get("/dashboard/products.csv")]
pub async fn export_product_summary(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let dataset = state.dashboard.dataset(session.session_id()?).await?;
    let body = product_summary_to_csv(&dataset.product_summary).map_err(map_csv_error)?;
    Ok(csv_attachment(PRODUCTS_FILE_NAME, body))
}

/// Discard the session's cached dataset.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/cache/clear",
    responses(
        (status = 200, description = "Cache state after the request", body = CacheClearResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "clearDashboardCache"
)]
#[post("/dashboard/cache/clear")]
pub async fn clear_cache(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let cleared = state.dashboard.clear_cache(session.session_id()?).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(CacheClearResponse { cleared }))
}

fn csv_attachment(file_name: &str, body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(no_store_header())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name.to_owned())],
        })
        .body(body)
}

fn map_csv_error(err: CsvError) -> Error {
    error!(error = %err, "CSV export failed");
    Error::internal(format!("failed to encode CSV: {err}"))
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
