//! Environment parsing helpers for identity configuration.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, IdentityConfigError, SAMESITE_ENV};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Name and debug-mode fallback of a boolean variable.
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

pub(super) fn parse_bool_env<E: Env, F>(
    env: &E,
    mode: BuildMode,
    config: BoolEnvConfig,
    value_validator: F,
) -> Result<bool, IdentityConfigError>
where
    F: FnOnce(bool, BuildMode) -> Result<bool, IdentityConfigError>,
{
    let BoolEnvConfig {
        name,
        default_value,
    } = config;
    match env.string(name) {
        Some(value) => match parse_bool(&value) {
            Some(flag) => value_validator(flag, mode),
            None => {
                let shown = value.clone();
                debug_warn_or_error(
                    mode,
                    default_value,
                    IdentityConfigError::InvalidEnv {
                        name,
                        value,
                        expected: BOOL_EXPECTED,
                    },
                    || warn!(value = %shown, "invalid {name}; defaulting to {default_value}"),
                )
            }
        },
        None => debug_warn_or_error(
            mode,
            default_value,
            IdentityConfigError::MissingEnv { name },
            || warn!("{name} not set; defaulting to {default_value}"),
        ),
    }
}

/// Fall back in debug builds, fail in release builds.
pub(super) fn debug_warn_or_error<T, F>(
    mode: BuildMode,
    fallback: T,
    error: IdentityConfigError,
    warn_fn: F,
) -> Result<T, IdentityConfigError>
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
) -> Result<SameSite, IdentityConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" => {
            if !cookie_secure {
                debug_warn_or_error(mode, (), IdentityConfigError::InsecureSameSiteNone, || {
                    warn!(
                        "IDENTITY_SAMESITE=None with IDENTITY_COOKIE_SECURE=0; \
                         browsers may reject the cookie"
                    );
                })?;
            }
            Ok(SameSite::None)
        }
        _ => {
            let shown = value.clone();
            debug_warn_or_error(
                mode,
                default_same_site,
                IdentityConfigError::InvalidEnv {
                    name: SAMESITE_ENV,
                    value,
                    expected: SAMESITE_EXPECTED,
                },
                || warn!(value = %shown, "invalid IDENTITY_SAMESITE, using default"),
            )
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
