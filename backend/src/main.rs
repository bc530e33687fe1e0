//! Dashboard server entry point.

use actix_web::web;
use color_eyre::eyre::{Context as _, Result};
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use backend::server::{ServerConfig, create_server};
use backend::settings::DashboardSettings;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DashboardSettings::load().wrap_err("failed to load dashboard settings")?;
    let variant = settings.variant()?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())?;
    info!(
        fingerprint = %session.fingerprint(),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let config = ServerConfig::new(session, settings.bind_addr(), variant)
        .with_seed_policy(settings.seed_policy(variant))
        .with_upload_limit(settings.upload_limit_bytes)
        .with_session_idle(settings.session_idle());
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err("failed to start dashboard server")?;
    server.await.wrap_err("dashboard server exited with an error")
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("dashboard")
        .endpoint("/metrics")
        .build()
        .map_err(|e| color_eyre::eyre::eyre!("failed to configure Prometheus metrics: {e}"))
}
