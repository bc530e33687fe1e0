//! Cache-control policies shared by HTTP handlers.

/// Per-session responses must be revalidated before reuse.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Header tuple for per-session responses.
#[must_use]
pub const fn private_no_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_CACHE_MUST_REVALIDATE)
}

/// Downloads are generated per session and must never be cached.
#[must_use]
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", "no-store")
}
