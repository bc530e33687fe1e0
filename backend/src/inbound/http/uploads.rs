//! Upload preview and manual entry handlers for the data input page.
//!
//! ```text
//! POST /api/v1/uploads/preview?fileName=<name>
//! POST /api/v1/manual-entry
//! ```

use actix_web::{HttpResponse, post, web};
use futures_util::StreamExt as _;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Category, Error, ManualEntry, UploadError, preview_upload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, entry_error, missing_field_error, upload_error};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UploadQuery {
    /// Original file name; must end in `.csv` or `.txt`.
    pub file_name: Option<String>,
}

/// Headers, leading records and record count of an uploaded file.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadPreviewResponse {
    pub file_name: String,
    pub headers: Vec<String>,
    /// At most five records.
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

/// Raw manual entry form values.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntryRequest {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntryResponse {
    pub name: String,
    pub age: u8,
    pub category: Category,
    /// Confirmation line, e.g. `Submitted: Ada, 36, B`.
    pub summary: String,
}

impl From<ManualEntry> for ManualEntryResponse {
    fn from(entry: ManualEntry) -> Self {
        Self {
            summary: entry.summary(),
            name: entry.name().to_owned(),
            age: entry.age(),
            category: entry.category(),
        }
    }
}

/// Preview an uploaded CSV or text file.
///
/// The body is streamed as raw bytes and reading stops as soon as it passes
/// the configured limit.
#[utoipa::path(
    post,
    path = "/api/v1/uploads/preview",
    params(UploadQuery),
    request_body(content = String, content_type = "text/csv"),
    responses(
        (
            status = 200,
            description = "Upload preview",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = UploadPreviewResponse
        ),
        (status = 400, description = "Unsupported, oversized or malformed upload", body = Error)
    ),
    tags = ["data-input"],
    operation_id = "previewUpload"
)]
#[post("/uploads/preview")]
pub async fn preview(
    state: web::Data<HttpState>,
    query: web::Query<UploadQuery>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let file_name = query
        .into_inner()
        .file_name
        .ok_or_else(|| missing_field_error(FieldName::new("fileName")))?;
    let body = read_limited(payload, state.upload_limit_bytes).await?;
    let previewed = preview_upload(&file_name, &body, state.upload_limit_bytes)
        .map_err(|err| upload_error(&err))?;
    info!(file_name = %file_name, total_rows = previewed.total_rows, "upload previewed");
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(UploadPreviewResponse {
            file_name,
            headers: previewed.headers,
            rows: previewed.rows,
            total_rows: previewed.total_rows,
        }))
}

/// Validate a manual entry and echo the submission.
#[utoipa::path(
    post,
    path = "/api/v1/manual-entry",
    request_body = ManualEntryRequest,
    responses(
        (status = 200, description = "Accepted entry", body = ManualEntryResponse),
        (status = 400, description = "Invalid entry", body = Error)
    ),
    tags = ["data-input"],
    operation_id = "submitManualEntry"
)]
#[post("/manual-entry")]
pub async fn submit_manual_entry(
    payload: web::Json<ManualEntryRequest>,
) -> ApiResult<web::Json<ManualEntryResponse>> {
    let ManualEntryRequest {
        name,
        age,
        category,
    } = payload.into_inner();
    let age = age.ok_or_else(|| missing_field_error(FieldName::new("age")))?;
    let category = category.ok_or_else(|| missing_field_error(FieldName::new("category")))?;
    let entry = ManualEntry::new(name.as_deref().unwrap_or_default(), age, &category)
        .map_err(|err| entry_error(&err))?;
    info!(category = %entry.category(), "manual entry submitted");
    Ok(web::Json(ManualEntryResponse::from(entry)))
}

/// Collect the body, failing once more than `limit` bytes have arrived.
async fn read_limited(mut payload: web::Payload, limit: usize) -> Result<web::BytesMut, Error> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| {
            Error::invalid_request(format!("failed to read upload body: {err}"))
        })?;
        body.extend_from_slice(&chunk);
        if body.len() > limit {
            return Err(upload_error(&UploadError::TooLarge {
                size: body.len(),
                limit,
            }));
        }
    }
    Ok(body)
}
