//! Driven port for per-session dataset caches.
//!
//! Each session owns one memoised dataset. Reads within a session share the
//! cached value until the session invalidates it; sessions never observe
//! each other's datasets.

use std::sync::Arc;

use async_trait::async_trait;
use dashboard_data::{Dataset, GenerationError, SeedPolicy};

use crate::domain::SessionId;

/// Dataset returned for a session together with the policy that made it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDataset {
    /// Memoised dataset; repeated reads return the same allocation.
    pub dataset: Arc<Dataset>,
    /// Seed policy of the session's provider.
    pub policy: SeedPolicy,
}

/// Errors raised by session dataset adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionDatasetsError {
    /// The dataset could not be generated.
    #[error("dataset generation failed: {0}")]
    Generation(#[from] GenerationError),
}

/// Port for fetching and invalidating session-scoped datasets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionDatasets: Send + Sync {
    /// Return the session's cached dataset, creating the entry on first use.
    async fn fetch(&self, session: SessionId) -> Result<SessionDataset, SessionDatasetsError>;

    /// Drop the session's cached dataset, reporting whether one was held.
    async fn invalidate(&self, session: SessionId) -> Result<bool, SessionDatasetsError>;
}
