//! Server harness and shared world for dashboard endpoint scenarios.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServerHandle;
use actix_web::{HttpServer, web};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use backend::domain::{DashboardService, Variant};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::session_cache::InMemorySessionDatasets;
use backend::server::{AppDependencies, build_app};

/// Idle window used by the harness registry.
pub(crate) const IDLE_WINDOW: Duration = Duration::from_secs(2 * 60 * 60);

/// Upload limit used by the harness server.
pub(crate) const UPLOAD_LIMIT: usize = 4_096;

/// Clock the scenarios can move forward to age sessions.
pub(crate) struct SteppedClock(Mutex<DateTime<Utc>>);

impl SteppedClock {
    fn starting_at(start: DateTime<Utc>) -> Self {
        Self(Mutex::new(start))
    }

    pub(crate) fn advance(&self, delta: TimeDelta) {
        let mut now = self.0.lock().expect("clock lock");
        *now += delta;
    }
}

impl Clock for SteppedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }
}

/// Response captured from the most recent request.
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub(crate) status: u16,
    pub(crate) trace_id: Option<String>,
    pub(crate) content_type: Option<String>,
    pub(crate) content_disposition: Option<String>,
    pub(crate) body: Vec<u8>,
}

pub(crate) struct DashboardWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) clock: Arc<SteppedClock>,
    pub(crate) session_cookie: Option<String>,
    pub(crate) responses: Vec<Recorded>,
}

pub(crate) type SharedWorld = Rc<RefCell<DashboardWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the world
    // while calling `block_on`. The future must not try to lock the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

async fn spawn_dashboard_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);
    let health_data = web::Data::new(HealthState::new());
    health_data.mark_ready();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: health_data.clone(),
            http_state: http_data.clone(),
            key: key.clone(),
            cookie_secure: false,
            same_site: SameSite::Lax,
            session_ttl: CookieDuration::hours(2),
        })
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    (runtime, local)
}

fn stepped_clock() -> Arc<SteppedClock> {
    let start = Utc
        .with_ymd_and_hms(2024, 6, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp");
    Arc::new(SteppedClock::starting_at(start))
}

/// Analytics variant: unseeded, so every fresh dataset differs.
fn analytics_state(clock: Arc<SteppedClock>) -> HttpState {
    let variant = Variant::Analytics;
    let sessions = InMemorySessionDatasets::new(variant.seed_policy(), clock.clone(), IDLE_WINDOW);
    HttpState::new(
        DashboardService::new(variant, Arc::new(sessions), clock),
        UPLOAD_LIMIT,
    )
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let clock = stepped_clock();
    let http_state = analytics_state(clock.clone());

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_dashboard_server(http_state).await })
        .expect("server should start");

    let world = Rc::new(RefCell::new(DashboardWorld {
        runtime,
        local,
        base_url,
        server,
        clock,
        session_cookie: None,
        responses: Vec::new(),
    }));

    WorldFixture { world }
}
