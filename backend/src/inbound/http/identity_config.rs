//! Identity token and cookie configuration.
//!
//! Reads the token signing secret and the identity cookie attributes from the
//! environment. Release builds insist on explicit, valid values; debug builds
//! fall back to defaults with a warning so local development needs no setup.

use std::fmt;
use std::path::PathBuf;

use actix_web::cookie::SameSite;
use mockable::Env;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

pub mod fingerprint;
mod parsing;

use self::parsing::{BoolEnvConfig, debug_warn_or_error, parse_bool_env, parse_same_site_value};

const TOKEN_SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
/// Minimum secret length accepted in release builds.
pub const TOKEN_SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;
const COOKIE_SECURE_ENV: &str = "IDENTITY_COOKIE_SECURE";
const SAMESITE_ENV: &str = "IDENTITY_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Defaults and warnings for anything missing.
    Debug,
    /// Every toggle must be present and valid.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use staybook::inbound::http::identity_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Where the active signing secret came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SecretSource {
    /// Read from a key file.
    File(PathBuf),
    /// Generated at start-up; tokens die with the process.
    Ephemeral,
}

/// HMAC secret used to sign identity tokens. Wiped on drop.
pub struct TokenSecret {
    bytes: Zeroizing<Vec<u8>>,
    source: SecretSource,
}

impl TokenSecret {
    /// Wrap secret bytes read from `path`.
    pub fn from_file_bytes(bytes: Vec<u8>, path: PathBuf) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
            source: SecretSource::File(path),
        }
    }

    /// Generate a random secret from the operating system RNG.
    pub fn ephemeral() -> Self {
        let mut bytes = vec![0_u8; EPHEMERAL_SECRET_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self {
            bytes: Zeroizing::new(bytes),
            source: SecretSource::Ephemeral,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn source(&self) -> &SecretSource {
        &self.source
    }

    /// Short, non-reversible identifier for logs.
    pub fn fingerprint(&self) -> String {
        fingerprint::secret_fingerprint(self.as_bytes())
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSecret")
            .field("source", &self.source)
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

/// Identity settings derived from the environment.
#[derive(Debug)]
pub struct IdentitySettings {
    /// Token signing secret.
    pub secret: TokenSecret,
    /// Whether the `token` cookie is marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for the `token` cookie.
    pub same_site: SameSite,
}

/// Errors raised while validating identity configuration.
#[derive(thiserror::Error, Debug)]
pub enum IdentityConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("IDENTITY_SAMESITE=None requires IDENTITY_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build identity settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use staybook::inbound::http::identity_config::{BuildMode, identity_settings_from_env};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let path = std::env::temp_dir().join("token_secret_example");
/// std::fs::write(&path, vec![b'k'; 32])?;
///
/// let path_str = path.to_string_lossy().into_owned();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "TOKEN_SECRET_FILE" => Some(path_str.clone()),
///     "IDENTITY_COOKIE_SECURE" => Some("1".to_owned()),
///     "IDENTITY_SAMESITE" => Some("Strict".to_owned()),
///     "TOKEN_ALLOW_EPHEMERAL" => Some("0".to_owned()),
///     _ => None,
/// });
///
/// let settings = identity_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
///
/// std::fs::remove_file(&path)?;
/// # Ok(())
/// # }
/// ```
pub fn identity_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<IdentitySettings, IdentityConfigError> {
    let cookie_secure = parse_bool_env(
        env,
        mode,
        BoolEnvConfig::new(COOKIE_SECURE_ENV, true),
        |flag, _| Ok(flag),
    )?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = parse_bool_env(
        env,
        mode,
        BoolEnvConfig::new(ALLOW_EPHEMERAL_ENV, false),
        |flag, mode| {
            if flag && !mode.is_debug() {
                Err(IdentityConfigError::EphemeralNotAllowed)
            } else {
                Ok(flag)
            }
        },
    )?;
    let secret = secret_from_env(env, mode, allow_ephemeral)?;

    Ok(IdentitySettings {
        secret,
        cookie_secure,
        same_site,
    })
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, IdentityConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    match env.string(SAMESITE_ENV) {
        Some(value) => parse_same_site_value(value, mode, cookie_secure, default_same_site),
        None => debug_warn_or_error(
            mode,
            default_same_site,
            IdentityConfigError::MissingEnv { name: SAMESITE_ENV },
            || warn!("IDENTITY_SAMESITE not set; using default"),
        ),
    }
}

fn secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<TokenSecret, IdentityConfigError> {
    let path = PathBuf::from(
        env.string(SECRET_FILE_ENV)
            .unwrap_or_else(|| TOKEN_SECRET_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < TOKEN_SECRET_MIN_LEN {
                bytes.zeroize();
                return Err(IdentityConfigError::SecretTooShort {
                    path,
                    length,
                    min_len: TOKEN_SECRET_MIN_LEN,
                });
            }
            Ok(TokenSecret::from_file_bytes(bytes, path))
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using ephemeral token secret; issued tokens will not survive a restart"
            );
            Ok(TokenSecret::ephemeral())
        }
        Err(error) => Err(IdentityConfigError::SecretRead {
            path,
            source: error,
        }),
    }
}
