//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `DASHBOARD_*` environment variables or a
//! configuration file, with the defaults below when none are given.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use dashboard_data::SeedPolicy;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{Variant, VariantParseError};

const DEFAULT_PORT: u16 = 8080;

/// Settings for the dashboard server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct DashboardSettings {
    /// Dashboard flavour: `template`, `analytics` or `styled`.
    pub variant: Option<String>,
    /// Fixed seed overriding the variant's seed policy.
    pub seed: Option<u64>,
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// Largest accepted upload body, in bytes.
    #[ortho_config(default = 1_048_576)]
    pub upload_limit_bytes: usize,
    /// Minutes of inactivity before a session's dataset is dropped.
    #[ortho_config(default = 120)]
    pub session_idle_minutes: u64,
}

impl DashboardSettings {
    /// Configured variant, defaulting to [`Variant::Analytics`].
    ///
    /// # Errors
    ///
    /// Returns [`VariantParseError`] for an unrecognised name.
    pub fn variant(&self) -> Result<Variant, VariantParseError> {
        self.variant
            .as_deref()
            .map_or(Ok(Variant::default()), str::parse)
    }

    /// Seed policy for new sessions: the explicit seed if set, otherwise
    /// the variant's own policy.
    #[must_use]
    pub const fn seed_policy(&self, variant: Variant) -> SeedPolicy {
        match self.seed {
            Some(seed) => SeedPolicy::Fixed(seed),
            None => variant.seed_policy(),
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    #[must_use]
    pub const fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_minutes.saturating_mul(60))
    }
}
