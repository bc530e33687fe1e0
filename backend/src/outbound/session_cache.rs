//! In-memory registry of per-session dataset caches.
//!
//! Each session id maps to its own [`DatasetProvider`], so invalidating one
//! session never touches another. Entries idle for longer than the configured
//! window are evicted lazily on the next registry access.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashboard_data::{DatasetProvider, SeedPolicy};
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::SessionId;
use crate::domain::ports::{SessionDataset, SessionDatasets, SessionDatasetsError};

struct Entry {
    provider: Arc<DatasetProvider>,
    last_seen: DateTime<Utc>,
}

/// Session dataset adapter backed by a mutex-guarded map.
pub struct InMemorySessionDatasets {
    policy: SeedPolicy,
    clock: Arc<dyn Clock>,
    idle_timeout: TimeDelta,
    entries: Mutex<HashMap<SessionId, Entry>>,
}

impl InMemorySessionDatasets {
    /// Create an empty registry whose providers use `policy`.
    pub fn new(policy: SeedPolicy, clock: Arc<dyn Clock>, idle_timeout: Duration) -> Self {
        let idle_timeout = TimeDelta::from_std(idle_timeout).unwrap_or_else(|err| {
            warn!(error = %err, "session idle timeout out of range; sessions never expire");
            TimeDelta::MAX
        });
        Self {
            policy,
            clock,
            idle_timeout,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live sessions, after evicting idle ones.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut entries = self.lock();
        self.evict_idle(&mut entries, self.clock.utc());
        entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop a session and its cached dataset.
    pub fn end_session(&self, session: SessionId) -> bool {
        self.lock().remove(&session).is_some()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn evict_idle(&self, entries: &mut HashMap<SessionId, Entry>, now: DateTime<Utc>) {
        let before = entries.len();
        entries.retain(|_, entry| now.signed_duration_since(entry.last_seen) <= self.idle_timeout);
        let evicted = before.saturating_sub(entries.len());
        if evicted > 0 {
            debug!(evicted, remaining = entries.len(), "evicted idle sessions");
        }
    }

    /// Provider for `session`, created on first use; refreshes its idle timer.
    fn provider_for(&self, session: SessionId) -> Arc<DatasetProvider> {
        let now = self.clock.utc();
        let mut entries = self.lock();
        self.evict_idle(&mut entries, now);
        let entry = entries.entry(session).or_insert_with(|| {
            debug!(%session, "creating session dataset cache");
            Entry {
                provider: Arc::new(DatasetProvider::new(self.policy)),
                last_seen: now,
            }
        });
        entry.last_seen = now;
        Arc::clone(&entry.provider)
    }

    fn existing_provider(&self, session: SessionId) -> Option<Arc<DatasetProvider>> {
        let now = self.clock.utc();
        let mut entries = self.lock();
        self.evict_idle(&mut entries, now);
        entries.get_mut(&session).map(|entry| {
            entry.last_seen = now;
            Arc::clone(&entry.provider)
        })
    }
}

#[async_trait]
impl SessionDatasets for InMemorySessionDatasets {
    async fn fetch(&self, session: SessionId) -> Result<SessionDataset, SessionDatasetsError> {
        let provider = self.provider_for(session);
        let dataset = provider.fetch()?;
        Ok(SessionDataset {
            dataset,
            policy: provider.policy(),
        })
    }

    async fn invalidate(&self, session: SessionId) -> Result<bool, SessionDatasetsError> {
        Ok(self
            .existing_provider(session)
            .is_some_and(|provider| provider.invalidate()))
    }
}
