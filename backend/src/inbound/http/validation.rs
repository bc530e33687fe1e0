//! Validation helpers shared by the HTTP handlers.
//!
//! Every failure becomes an `invalid_request` [`Error`] whose details carry
//! the offending `field`, the raw `value` where one exists, and a stable
//! machine-readable `code`.

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::{ControlsError, EntryError, Error, Menu, UploadError};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidMenu,
    InvalidBoolean,
    InvalidInteger,
    InvalidDate,
    OutOfRange,
    InvertedRange,
    NameTooLong,
    UnknownCategory,
    UnsupportedFileType,
    UploadTooLarge,
    MalformedCsv,
    MalformedJson,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidMenu => "invalid_menu",
            Self::InvalidBoolean => "invalid_boolean",
            Self::InvalidInteger => "invalid_integer",
            Self::InvalidDate => "invalid_date",
            Self::OutOfRange => "out_of_range",
            Self::InvertedRange => "inverted_range",
            Self::NameTooLong => "name_too_long",
            Self::UnknownCategory => "unknown_category",
            Self::UnsupportedFileType => "unsupported_file_type",
            Self::UploadTooLarge => "upload_too_large",
            Self::MalformedCsv => "malformed_csv",
            Self::MalformedJson => "malformed_json",
        }
    }
}

/// Name of a request field as clients spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    ValidationError::new(field, format!("missing required field: {}", field.as_str()))
        .with_code(ErrorCode::MissingField)
}

/// Parse an optional `true`/`false` query flag, defaulting to `false`.
pub(crate) fn parse_flag(value: Option<&str>, field: FieldName) -> Result<bool, Error> {
    match value.map(str::trim) {
        None => Ok(false),
        Some(raw) if raw.eq_ignore_ascii_case("true") || raw == "1" => Ok(true),
        Some(raw) if raw.eq_ignore_ascii_case("false") || raw == "0" => Ok(false),
        Some(raw) => Err(ValidationError::new(
            field,
            format!("{} must be true or false", field.as_str()),
        )
        .with_value(ErrorCode::InvalidBoolean, raw)),
    }
}

pub(crate) fn parse_menu(value: Option<&str>) -> Result<Menu, Error> {
    value.map_or(Ok(Menu::default()), |raw| {
        raw.trim().parse().map_err(|_| {
            let expected: Vec<_> = Menu::ALL.iter().map(|menu| menu.as_str()).collect();
            ValidationError::new(
                FieldName::new("menu"),
                format!("menu must be one of {}", expected.join(", ")),
            )
            .with_value(ErrorCode::InvalidMenu, raw)
        })
    })
}

pub(crate) fn parse_count(
    value: Option<&str>,
    field: FieldName,
    default: usize,
) -> Result<usize, Error> {
    value.map_or(Ok(default), |raw| {
        raw.trim().parse().map_err(|_| {
            ValidationError::new(
                field,
                format!("{} must be a positive integer", field.as_str()),
            )
            .with_value(ErrorCode::InvalidInteger, raw)
        })
    })
}

/// Parse an optional `YYYY-MM-DD` date.
pub(crate) fn parse_date(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    value
        .map(|raw| {
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                ValidationError::new(field, format!("{} must be a YYYY-MM-DD date", field.as_str()))
                    .with_value(ErrorCode::InvalidDate, raw)
            })
        })
        .transpose()
}

pub(crate) fn controls_error(err: &ControlsError) -> Error {
    let field = FieldName::new(err.field());
    let message = err.to_string();
    match err {
        ControlsError::UnknownMenu { value } => {
            ValidationError::new(field, message).with_value(ErrorCode::InvalidMenu, value.as_str())
        }
        ControlsError::RowsOutOfRange { value, .. } => ValidationError::new(field, message)
            .with_value(ErrorCode::OutOfRange, value.to_string()),
        ControlsError::DateOutOfRange { value, .. } => ValidationError::new(field, message)
            .with_value(ErrorCode::OutOfRange, value.to_string()),
        ControlsError::InvertedDateRange { start, .. } => ValidationError::new(field, message)
            .with_value(ErrorCode::InvertedRange, start.to_string()),
        ControlsError::Calendar(_) => Error::internal(message),
    }
}

pub(crate) fn upload_error(err: &UploadError) -> Error {
    let message = err.to_string();
    match err {
        UploadError::UnsupportedFileType { file_name } => {
            ValidationError::new(FieldName::new("fileName"), message)
                .with_value(ErrorCode::UnsupportedFileType, file_name.as_str())
        }
        UploadError::TooLarge { size, .. } => ValidationError::new(FieldName::new("body"), message)
            .with_value(ErrorCode::UploadTooLarge, size.to_string()),
        UploadError::Malformed(_) => {
            ValidationError::new(FieldName::new("body"), message).with_code(ErrorCode::MalformedCsv)
        }
    }
}

/// A JSON body that failed to parse or deserialise.
pub(crate) fn malformed_json_error(message: impl Into<String>) -> Error {
    ValidationError::new(FieldName::new("body"), message).with_code(ErrorCode::MalformedJson)
}

pub(crate) fn entry_error(err: &EntryError) -> Error {
    let field = FieldName::new(err.field());
    let message = err.to_string();
    match err {
        EntryError::NameTooLong { length, .. } => ValidationError::new(field, message)
            .with_value(ErrorCode::NameTooLong, length.to_string()),
        EntryError::AgeOutOfRange { value, .. } => ValidationError::new(field, message)
            .with_value(ErrorCode::OutOfRange, value.to_string()),
        EntryError::UnknownCategory { value } => ValidationError::new(field, message)
            .with_value(ErrorCode::UnknownCategory, value.as_str()),
    }
}
