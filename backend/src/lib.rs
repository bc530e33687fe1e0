//! Synthetic analytics dashboard backend.
//!
//! The crate follows a hexagonal layout: [`domain`] renders pages against a
//! per-session dataset port, [`outbound`] implements that port in memory,
//! and [`inbound`] exposes the use cases over HTTP. [`server`] wires the
//! pieces into an Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
