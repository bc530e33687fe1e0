//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only reach the domain via
//! [`DashboardService`], so they stay testable without a real registry.

use crate::domain::DashboardService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub dashboard: DashboardService,
    /// Largest accepted upload body, in bytes.
    pub upload_limit_bytes: usize,
}

impl HttpState {
    #[must_use]
    pub const fn new(dashboard: DashboardService, upload_limit_bytes: usize) -> Self {
        Self {
            dashboard,
            upload_limit_bytes,
        }
    }
}
