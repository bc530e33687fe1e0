//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use dashboard_data::SeedPolicy;

use crate::domain::Variant;
use crate::inbound::http::session_config::SessionSettings;

/// Everything [`super::create_server`] needs to build the application.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) variant: Variant,
    pub(crate) seed_policy: SeedPolicy,
    pub(crate) upload_limit_bytes: usize,
    pub(crate) session_idle: Duration,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Build a configuration for `variant` using its default seed policy,
    /// a 1 MiB upload limit and a two hour idle window.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, variant: Variant) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            variant,
            seed_policy: variant.seed_policy(),
            upload_limit_bytes: 1_048_576,
            session_idle: Duration::from_secs(2 * 60 * 60),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[must_use]
    pub const fn with_seed_policy(mut self, seed_policy: SeedPolicy) -> Self {
        self.seed_policy = seed_policy;
        self
    }

    #[must_use]
    pub const fn with_upload_limit(mut self, bytes: usize) -> Self {
        self.upload_limit_bytes = bytes;
        self
    }

    /// Sessions idle for longer than `idle` lose their cached dataset.
    #[must_use]
    pub const fn with_session_idle(mut self, idle: Duration) -> Self {
        self.session_idle = idle;
        self
    }

    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
