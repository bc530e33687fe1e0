//! Memoised dataset access.

use std::sync::Arc;

use crate::error::GenerationError;
use crate::generator::{SeedPolicy, generate_dataset};
use crate::memo::Memo;
use crate::rows::Dataset;

/// Owns a seed policy and the memoised dataset it produced.
///
/// One provider exists per session. Reads return the cached dataset until
/// [`DatasetProvider::invalidate`] is called; the next read regenerates
/// using the same policy.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use dashboard_data::{DatasetProvider, SeedPolicy};
///
/// let provider = DatasetProvider::new(SeedPolicy::Fixed(42));
/// let first = provider.fetch().expect("dataset");
/// assert!(provider.invalidate());
/// let second = provider.fetch().expect("dataset");
///
/// assert!(!Arc::ptr_eq(&first, &second));
/// assert_eq!(first, second);
/// ```
#[derive(Debug)]
pub struct DatasetProvider {
    policy: SeedPolicy,
    memo: Memo<Dataset>,
}

impl DatasetProvider {
    /// Creates a provider with an empty cache.
    #[must_use]
    pub const fn new(policy: SeedPolicy) -> Self {
        Self {
            policy,
            memo: Memo::new(),
        }
    }

    /// Seed policy used for every generation pass.
    #[must_use]
    pub const fn policy(&self) -> SeedPolicy {
        self.policy
    }

    /// Returns the cached dataset, generating it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when generation fails; the cache stays
    /// empty in that case.
    pub fn fetch(&self) -> Result<Arc<Dataset>, GenerationError> {
        self.memo.get_or_try_compute(|| generate_dataset(self.policy))
    }

    /// Drops the cached dataset, reporting whether one was held.
    pub fn invalidate(&self) -> bool {
        self.memo.invalidate()
    }

    /// Returns `true` while a dataset is cached.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.memo.is_valid()
    }
}
