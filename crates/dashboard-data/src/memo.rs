//! Single-entry memoisation.
//!
//! [`Memo`] caches the result of a zero-argument computation until it is
//! explicitly invalidated. There is no expiry and no size bound; the entry
//! lives as long as its owner.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Caches one computed value behind an [`Arc`].
///
/// The slot is locked for the duration of a computation, so concurrent
/// readers observe the same `Arc` rather than racing to compute twice.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use dashboard_data::Memo;
///
/// let memo = Memo::new();
/// let first = memo.get_or_compute(|| vec![1, 2, 3]);
/// let second = memo.get_or_compute(|| vec![4, 5, 6]);
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert!(memo.invalidate());
/// assert!(!memo.is_valid());
/// ```
#[derive(Debug)]
pub struct Memo<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Memo<T> {
    /// Creates an empty memo.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached value, computing and storing it when absent.
    pub fn get_or_compute<F>(&self, compute: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        let mut slot = self.lock();
        if let Some(value) = slot.as_ref() {
            return Arc::clone(value);
        }
        let value = Arc::new(compute());
        *slot = Some(Arc::clone(&value));
        value
    }

    /// Returns the cached value, computing it with a fallible closure.
    ///
    /// A failed computation leaves the memo empty.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `compute`.
    pub fn get_or_try_compute<F, E>(&self, compute: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut slot = self.lock();
        if let Some(value) = slot.as_ref() {
            return Ok(Arc::clone(value));
        }
        let value = Arc::new(compute()?);
        *slot = Some(Arc::clone(&value));
        Ok(value)
    }

    /// Clears the cached value, reporting whether one was present.
    pub fn invalidate(&self) -> bool {
        self.lock().take().is_some()
    }

    /// Returns `true` while a cached value is held.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lock().is_some()
    }

    // A panic inside `compute` poisons the lock without storing a value, so
    // the slot is still consistent and safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Option<Arc<T>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
