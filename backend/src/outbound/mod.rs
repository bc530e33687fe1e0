//! Outbound adapters implementing domain ports.
//!
//! - **session_cache**: in-process registry of per-session dataset caches
//!
//! Adapters translate between domain types and their storage. They contain
//! no rendering logic.

pub mod session_cache;
