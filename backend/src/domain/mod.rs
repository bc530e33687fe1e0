//! Domain types and use cases for the dashboard service.
//!
//! Purpose: keep rendering, control validation and error semantics free of
//! transport concerns. Inbound adapters translate requests into these types
//! and map [`Error`] onto their own envelopes.
//!
//! Public surface:
//! - [`DashboardService`]: render passes, exports and cache clearing.
//! - [`RenderControls`] and [`Menu`]: validated control values.
//! - [`Variant`]: seed policy, chrome and theme selection.
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failures.

pub mod controls;
pub mod dashboard;
pub mod data_input;
pub mod error;
pub mod ports;
pub mod service;
pub mod session_id;
pub mod trace_id;
pub mod variant;

pub use self::controls::{ControlsError, DEFAULT_ROWS, Menu, RenderControls, series_bounds};
pub use self::dashboard::{EXPORT_FILE_NAME, PRODUCTS_FILE_NAME, RenderDescription, render};
pub use self::data_input::{
    Category, EntryError, ManualEntry, PREVIEW_ROWS, UploadError, preview_upload,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::service::DashboardService;
pub use self::session_id::SessionId;
pub use self::trace_id::TraceId;
pub use self::variant::{Chrome, Theme, Variant, VariantParseError};
