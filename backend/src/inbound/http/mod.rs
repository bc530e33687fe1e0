//! HTTP inbound adapter exposing the dashboard REST endpoints.

pub mod cache_control;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod uploads;
pub mod validation;

pub use error::ApiResult;
