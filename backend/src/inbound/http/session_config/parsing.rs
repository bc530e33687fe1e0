//! Environment parsing helpers for session configuration.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// A boolean toggle and the value debug builds fall back to.
pub(super) struct BoolEnvConfig {
    name: &'static str,
    default_value: bool,
}

impl BoolEnvConfig {
    pub(super) const fn new(name: &'static str, default_value: bool) -> Self {
        Self {
            name,
            default_value,
        }
    }
}

/// Read a boolean toggle, passing parsed values through `validate`.
pub(super) fn parse_bool_env<E, F>(
    env: &E,
    mode: BuildMode,
    config: BoolEnvConfig,
    validate: F,
) -> Result<bool, SessionConfigError>
where
    E: Env,
    F: FnOnce(bool, BuildMode) -> Result<bool, SessionConfigError>,
{
    let BoolEnvConfig {
        name,
        default_value,
    } = config;
    let Some(value) = env.string(name) else {
        return debug_warn_or_error(
            mode,
            default_value,
            SessionConfigError::MissingEnv { name },
            || warn!(name, default = default_value, "session toggle not set; using default"),
        );
    };
    match parse_bool(&value) {
        Some(flag) => validate(flag, mode),
        None => warn_invalid_or_error(mode, default_value, name, value, BOOL_EXPECTED),
    }
}

fn warn_invalid_or_error<T: std::fmt::Debug>(
    mode: BuildMode,
    fallback: T,
    name: &'static str,
    value: String,
    expected: &'static str,
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn!(name, value = %value, default = ?fallback, "invalid session toggle; using default");
        Ok(fallback)
    } else {
        Err(SessionConfigError::InvalidEnv {
            name,
            value,
            expected,
        })
    }
}

/// Return `fallback` after `warn_fn` in debug builds, `error` otherwise.
pub(super) fn debug_warn_or_error<T, F>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: F,
) -> Result<T, SessionConfigError>
where
    F: FnOnce(),
{
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(super) fn parse_same_site_value(
    value: String,
    mode: BuildMode,
    cookie_secure: bool,
    default_same_site: SameSite,
) -> Result<SameSite, SessionConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" => {
            validate_same_site_none(mode, cookie_secure)?;
            Ok(SameSite::None)
        }
        _ => warn_invalid_or_error(
            mode,
            default_same_site,
            SAMESITE_ENV,
            value,
            SAMESITE_EXPECTED,
        ),
    }
}

fn validate_same_site_none(mode: BuildMode, cookie_secure: bool) -> Result<(), SessionConfigError> {
    if cookie_secure {
        return Ok(());
    }
    debug_warn_or_error(mode, (), SessionConfigError::InsecureSameSiteNone, || {
        warn!("SESSION_SAMESITE=None without a secure cookie; browsers may reject it");
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
