//! Dashboard use cases driven by the HTTP adapter.

use std::sync::Arc;

use dashboard_data::{Dataset, random_walk};
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::dashboard::{RenderContext, RenderDescription, WALK_POINTS, render};
use crate::domain::ports::{SessionDataset, SessionDatasets, SessionDatasetsError};
use crate::domain::{Error, Menu, RenderControls, SessionId, Variant};

/// Renders dashboard passes against a session's cached dataset.
#[derive(Clone)]
pub struct DashboardService {
    variant: Variant,
    sessions: Arc<dyn SessionDatasets>,
    clock: Arc<dyn Clock>,
}

impl DashboardService {
    /// Create a service for `variant`.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use std::time::Duration;
    /// # use backend::domain::{DashboardService, Variant};
    /// # use backend::outbound::session_cache::InMemorySessionDatasets;
    /// # use mockable::DefaultClock;
    /// let clock = Arc::new(DefaultClock);
    /// let sessions = InMemorySessionDatasets::new(
    ///     Variant::Styled.seed_policy(),
    ///     clock.clone(),
    ///     Duration::from_secs(7_200),
    /// );
    /// let service = DashboardService::new(Variant::Styled, Arc::new(sessions), clock);
    /// assert_eq!(service.variant(), Variant::Styled);
    /// ```
    pub fn new(
        variant: Variant,
        sessions: Arc<dyn SessionDatasets>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            variant,
            sessions,
            clock,
        }
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Run one render pass for `session`.
    ///
    /// A `refresh` control invalidates the session cache before the fetch, so
    /// the pass renders freshly generated data. The "Cache cleared!" notice
    /// follows the control, not whether a dataset was actually held.
    ///
    /// # Errors
    ///
    /// Returns an internal [`Error`] when the dataset cannot be produced.
    pub async fn render(
        &self,
        session: SessionId,
        controls: RenderControls,
    ) -> Result<RenderDescription, Error> {
        if controls.refresh {
            let cleared = self.clear_cache(session).await?;
            debug!(%session, cleared, "refresh requested");
        }

        let SessionDataset { dataset, policy } = self
            .sessions
            .fetch(session)
            .await
            .map_err(map_sessions_error)?;
        let walk = if controls.menu == Menu::Visualization {
            random_walk(policy, WALK_POINTS)
        } else {
            Vec::new()
        };

        Ok(render(&RenderContext {
            variant: self.variant,
            controls: &controls,
            dataset: &dataset,
            cache_cleared: controls.refresh,
            walk: &walk,
            rendered_at: self.clock.utc(),
        }))
    }

    /// Return the session's cached dataset for export.
    ///
    /// # Errors
    ///
    /// Returns an internal [`Error`] when the dataset cannot be produced.
    pub async fn dataset(&self, session: SessionId) -> Result<Arc<Dataset>, Error> {
        self.sessions
            .fetch(session)
            .await
            .map(|entry| entry.dataset)
            .map_err(map_sessions_error)
    }

    /// Invalidate the session cache, reporting whether a dataset was held.
    ///
    /// # Errors
    ///
    /// Returns an internal [`Error`] when the adapter fails.
    pub async fn clear_cache(&self, session: SessionId) -> Result<bool, Error> {
        let cleared = self
            .sessions
            .invalidate(session)
            .await
            .map_err(map_sessions_error)?;
        info!(%session, cleared, "session cache invalidated");
        Ok(cleared)
    }
}

fn map_sessions_error(err: SessionDatasetsError) -> Error {
    error!(error = %err, "session dataset unavailable");
    Error::internal(format!("failed to load dataset: {err}"))
}
