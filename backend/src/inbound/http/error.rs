//! HTTP rendering of domain errors.
//!
//! Statuses follow the domain code. Error bodies are never cached, carry the
//! request's trace id in both the body and the `trace-id` header, and hide
//! internal messages. Client rejections are logged with their
//! `details.code` so validation noise can be filtered apart from faults.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::Value;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::validation::malformed_json_error;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Machine-readable rejection reason, e.g. `out_of_range` or `malformed_csv`.
fn detail_code(error: &Error) -> Option<&str> {
    error
        .details()
        .and_then(|details| details.get("code"))
        .and_then(Value::as_str)
}

/// Internal errors keep only their trace id; details and message stay in
/// the logs.
fn public_view(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let redacted = Error::internal(INTERNAL_MESSAGE);
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                trace_id = self.trace_id(),
                message = self.message(),
                "request failed"
            );
        } else {
            debug!(
                trace_id = self.trace_id(),
                code = detail_code(self),
                message = self.message(),
                "request rejected"
            );
        }

        let mut builder = HttpResponse::build(status);
        builder.insert_header(no_store_header());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(public_view(self))
    }
}

/// `JsonConfig` hook turning unreadable or mistyped JSON bodies into
/// `invalid_request` errors with `details.code = "malformed_json"`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    malformed_json_error(err.to_string()).into()
}
