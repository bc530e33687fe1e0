//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession, TtlExtensionPolicy},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite, time};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

pub use self::config::ServerConfig;
#[cfg(feature = "metrics")]
use self::metrics::MetricsLayer;
use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::DashboardService;
use crate::inbound::http::dashboard::{
    clear_cache, export_product_summary, export_time_series, render_dashboard,
};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::uploads::{preview, submit_manual_entry};
use crate::outbound::session_cache::InMemorySessionDatasets;

/// Shared pieces cloned into every worker's app.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
    /// Cookie lifetime, renewed on every request so it tracks the
    /// server-side idle window.
    pub session_ttl: time::Duration,
}

/// Build the HTTP state: one session registry shared by all workers.
#[must_use]
pub fn build_http_state(config: &ServerConfig, clock: Arc<dyn Clock>) -> HttpState {
    let sessions =
        InMemorySessionDatasets::new(config.seed_policy, clock.clone(), config.session_idle);
    HttpState::new(
        DashboardService::new(config.variant, Arc::new(sessions), clock),
        config.upload_limit_bytes,
    )
}

/// Assemble the application: API scope behind the cookie session, probes
/// and, in debug builds, Swagger UI.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
        session_ttl,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(session_ttl)
                .session_ttl_extension_policy(TtlExtensionPolicy::OnEveryRequest),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(render_dashboard)
        .service(export_time_series)
        .service(export_product_summary)
        .service(clear_cache)
        .service(preview)
        .service(submit_manual_entry);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind an Actix server for `config` and mark `health_state` ready.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config, Arc::new(DefaultClock)));
    let session_ttl = time::Duration::try_from(config.session_idle)
        .unwrap_or(time::Duration::hours(2));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        variant,
        seed_policy,
        #[cfg(feature = "metrics")]
        prometheus,
        ..
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
            session_ttl,
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, %variant, ?seed_policy, "dashboard server listening");
    health_state.mark_ready();
    Ok(server)
}
