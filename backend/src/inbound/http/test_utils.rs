//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use dashboard_data::{SeedPolicy, generate_dataset};
use mockable::DefaultClock;

use crate::domain::ports::{MockSessionDatasets, SessionDataset};
use crate::domain::{DashboardService, Variant};
use crate::inbound::http::state::HttpState;
use crate::outbound::session_cache::InMemorySessionDatasets;

/// Upload limit used by handler tests.
pub const TEST_UPLOAD_LIMIT: usize = 256;

/// Cookie session middleware with a fresh key and an insecure `session`
/// cookie, for plain HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state backed by a real in-memory registry.
pub fn registry_state(variant: Variant) -> HttpState {
    let clock = Arc::new(DefaultClock);
    let sessions = InMemorySessionDatasets::new(
        variant.seed_policy(),
        clock.clone(),
        std::time::Duration::from_secs(3_600),
    );
    HttpState::new(
        DashboardService::new(variant, Arc::new(sessions), clock),
        TEST_UPLOAD_LIMIT,
    )
}

/// Handler state whose port always serves the seeded dataset.
pub fn seeded_mock_state() -> HttpState {
    let dataset = Arc::new(generate_dataset(SeedPolicy::Fixed(42)).expect("seeded dataset"));
    let mut sessions = MockSessionDatasets::new();
    sessions.expect_fetch().returning(move |_| {
        Ok(SessionDataset {
            dataset: Arc::clone(&dataset),
            policy: SeedPolicy::Fixed(42),
        })
    });
    sessions.expect_invalidate().returning(|_| Ok(true));
    HttpState::new(
        DashboardService::new(Variant::Styled, Arc::new(sessions), Arc::new(DefaultClock)),
        TEST_UPLOAD_LIMIT,
    )
}
