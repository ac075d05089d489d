//! Session cookie configuration read from the environment.
//!
//! Debug builds fall back to permissive defaults with a warning; release
//! builds refuse to start unless every toggle is set explicitly.

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use std::path::PathBuf;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Minimum key length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// Shortest key material [`Key::derive_from`] accepts.
const SESSION_KEY_DERIVE_MIN_LEN: usize = 32;
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_backend::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
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

    /// Return `fallback` after a warning in debug builds, `error` otherwise.
    fn tolerate<T>(
        self,
        fallback: T,
        error: SessionConfigError,
        warning: impl FnOnce(),
    ) -> Result<T, SessionConfigError> {
        if self.is_debug() {
            warning();
            Ok(fallback)
        } else {
            Err(error)
        }
    }
}

/// Session settings derived from configuration toggles.
pub struct SessionSettings {
    /// Signing key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// Configured `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file exists but is too short.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` requires a secure cookie setting in release builds.
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// Release builds must not allow ephemeral session keys.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use recipe_backend::inbound::http::session_config::{
///     session_settings_from_env, BuildMode,
/// };
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("recipe_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let key_path_str = key_path.to_string_lossy().into_owned();
/// let mut env = MockEnv::new();
/// env.expect_string()
///     .returning(move |name| match name {
///         "SESSION_KEY_FILE" => Some(key_path_str.clone()),
///         "SESSION_COOKIE_SECURE" => Some("1".to_string()),
///         "SESSION_SAMESITE" => Some("Strict".to_string()),
///         "SESSION_ALLOW_EPHEMERAL" => Some("0".to_string()),
///         _ => None,
///     });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = bool_toggle(env, mode, COOKIE_SECURE_ENV, true)?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = bool_toggle(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key_from_env(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn bool_toggle<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    default: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        return mode.tolerate(default, SessionConfigError::MissingEnv { name }, || {
            warn!(default, "{name} not set; using default");
        });
    };
    if let Some(flag) = parse_bool(&value) {
        return Ok(flag);
    }
    let error = SessionConfigError::InvalidEnv {
        name,
        value: value.clone(),
        expected: BOOL_EXPECTED,
    };
    mode.tolerate(default, error, || {
        warn!(value = %value, default, "invalid {name}; using default");
    })
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };

    let Some(value) = env.string(SAMESITE_ENV) else {
        return mode.tolerate(
            fallback,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
            || warn!("SESSION_SAMESITE not set; using default"),
        );
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => mode.tolerate(
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || {
                warn!(
                    "SESSION_SAMESITE=None with SESSION_COOKIE_SECURE=0; browsers may reject the cookie"
                );
            },
        ),
        _ => {
            let error = SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            };
            mode.tolerate(fallback, error, || {
                warn!(value = %value, "invalid SESSION_SAMESITE; using default");
            })
        }
    }
}

fn session_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_string()),
    );
    let ephemeral_ok = mode.is_debug() || allow_ephemeral;

    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(error) if ephemeral_ok => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };

    let length = bytes.len();
    let min_len = if mode.is_debug() {
        SESSION_KEY_DERIVE_MIN_LEN
    } else {
        SESSION_KEY_MIN_LEN
    };
    if length < min_len {
        bytes.zeroize();
        if ephemeral_ok {
            warn!(
                path = %path.display(),
                length,
                "session key too short; using temporary key (dev only)"
            );
            return Ok(Key::generate());
        }
        return Err(SessionConfigError::KeyTooShort {
            path,
            length,
            min_len,
        });
    }

    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
