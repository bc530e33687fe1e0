//! Request middleware.
//!
//! Middleware here handles request lifecycle concerns such as trace
//! correlation. Session handling is configured in [`crate::server`].

pub mod trace;

pub use trace::Trace;
