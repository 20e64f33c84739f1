//! Session cookie settings read from the environment.
//!
//! Release builds insist on explicit toggles and a persistent key. Debug
//! builds warn and fall back to permissive defaults so a fresh checkout runs
//! without secrets.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

pub const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const DEFAULT_KEY_PATH: &str = "/var/run/secrets/session_key";
/// Shortest key file accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
// `Key::derive_from` panics below this.
const DERIVE_MIN_LEN: usize = 32;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Whether missing or invalid toggles are fatal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Mode of the running binary.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Cookie key and attributes for the session middleware.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read the session cookie settings.
///
/// # Errors
/// Returns [`SessionConfigError`] in release builds when a toggle is missing
/// or invalid, or when no usable key file exists.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let reader = ToggleReader { env, mode };
    let cookie_secure = reader.read(COOKIE_SECURE_ENV, BOOL_EXPECTED, true, parse_bool)?;
    let fallback_same_site = match mode {
        BuildMode::Debug => SameSite::Lax,
        BuildMode::Release => SameSite::Strict,
    };
    let same_site = reader.read(
        SAMESITE_ENV,
        SAMESITE_EXPECTED,
        fallback_same_site,
        parse_same_site,
    )?;
    if same_site == SameSite::None && !cookie_secure {
        match mode {
            BuildMode::Release => return Err(SessionConfigError::InsecureSameSiteNone),
            BuildMode::Debug => warn!("SESSION_SAMESITE=None without a secure cookie"),
        }
    }
    let allow_ephemeral = reader.read(ALLOW_EPHEMERAL_ENV, BOOL_EXPECTED, false, parse_bool)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = load_key(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

struct ToggleReader<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<E: Env> ToggleReader<'_, E> {
    fn read<T: Copy>(
        &self,
        name: &'static str,
        expected: &'static str,
        fallback: T,
        parse: fn(&str) -> Option<T>,
    ) -> Result<T, SessionConfigError> {
        let Some(value) = self.env.string(name) else {
            return match self.mode {
                BuildMode::Release => Err(SessionConfigError::MissingEnv { name }),
                BuildMode::Debug => {
                    warn!(variable = name, "session toggle not set; using default");
                    Ok(fallback)
                }
            };
        };
        match (parse(&value), self.mode) {
            (Some(parsed), _) => Ok(parsed),
            (None, BuildMode::Debug) => {
                warn!(variable = name, value = %value, "invalid session toggle; using default");
                Ok(fallback)
            }
            (None, BuildMode::Release) => Err(SessionConfigError::InvalidEnv {
                name,
                value,
                expected,
            }),
        }
    }
}

fn load_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| DEFAULT_KEY_PATH.to_owned()),
    );
    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            let result = if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                })
            } else if length < DERIVE_MIN_LEN {
                warn!(
                    path = %path.display(),
                    length,
                    "session key too short to derive from; using an ephemeral key"
                );
                Ok(Key::generate())
            } else {
                Ok(Key::derive_from(&bytes))
            };
            bytes.zeroize();
            result
        }
        Err(_) if mode == BuildMode::Debug || allow_ephemeral => {
            warn!(path = %path.display(), "session key unreadable; using an ephemeral key");
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "lax" => Some(SameSite::Lax),
        "strict" => Some(SameSite::Strict),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use mockable::MockEnv;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    use super::*;

    fn env_with(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .returning(move |name| vars.get(name).cloned());
        env
    }

    fn key_file(len: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(&vec![b'k'; len]).expect("write key");
        file
    }

    fn release_vars(path: &str) -> Vec<(&'static str, String)> {
        vec![
            (KEY_FILE_ENV, path.to_owned()),
            (COOKIE_SECURE_ENV, "1".to_owned()),
            (SAMESITE_ENV, "Strict".to_owned()),
            (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
        ]
    }

    fn as_refs<'a>(vars: &'a [(&'static str, String)]) -> Vec<(&'static str, &'a str)> {
        vars.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }

    #[rstest]
    fn release_accepts_complete_configuration() {
        let file = key_file(SESSION_KEY_MIN_LEN);
        let vars = release_vars(&file.path().to_string_lossy());
        let settings = session_settings_from_env(&env_with(&as_refs(&vars)), BuildMode::Release)
            .expect("valid settings");

        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Strict);
    }

    #[rstest]
    #[case(COOKIE_SECURE_ENV)]
    #[case(SAMESITE_ENV)]
    #[case(ALLOW_EPHEMERAL_ENV)]
    fn release_rejects_missing_toggles(#[case] missing: &str) {
        let file = key_file(SESSION_KEY_MIN_LEN);
        let vars: Vec<_> = release_vars(&file.path().to_string_lossy())
            .into_iter()
            .filter(|(name, _)| *name != missing)
            .collect();

        let err = session_settings_from_env(&env_with(&as_refs(&vars)), BuildMode::Release)
            .err()
            .expect("missing toggle");
        assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
    }

    #[rstest]
    fn release_rejects_short_keys() {
        let file = key_file(16);
        let vars = release_vars(&file.path().to_string_lossy());

        let err = session_settings_from_env(&env_with(&as_refs(&vars)), BuildMode::Release)
            .err()
            .expect("short key");
        assert!(matches!(err, SessionConfigError::KeyTooShort { length: 16, .. }));
    }

    #[rstest]
    fn release_rejects_ephemeral_keys() {
        let file = key_file(SESSION_KEY_MIN_LEN);
        let mut vars = release_vars(&file.path().to_string_lossy());
        vars.retain(|(name, _)| *name != ALLOW_EPHEMERAL_ENV);
        vars.push((ALLOW_EPHEMERAL_ENV, "1".to_owned()));

        let err = session_settings_from_env(&env_with(&as_refs(&vars)), BuildMode::Release)
            .err()
            .expect("ephemeral rejected");
        assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
    }

    #[rstest]
    fn release_rejects_same_site_none_without_secure() {
        let file = key_file(SESSION_KEY_MIN_LEN);
        let path = file.path().to_string_lossy().into_owned();
        let env = env_with(&[
            (KEY_FILE_ENV, path.as_str()),
            (COOKIE_SECURE_ENV, "0"),
            (SAMESITE_ENV, "None"),
            (ALLOW_EPHEMERAL_ENV, "0"),
        ]);

        let err = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("insecure none");
        assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
    }

    #[rstest]
    fn debug_falls_back_to_defaults() {
        let env = env_with(&[
            (KEY_FILE_ENV, "/nonexistent/session_key"),
            (COOKIE_SECURE_ENV, "perhaps"),
        ]);

        let settings =
            session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Lax);
    }

    #[rstest]
    fn debug_tolerates_keys_too_short_to_derive() {
        let file = key_file(8);
        let path = file.path().to_string_lossy().into_owned();
        let env = env_with(&[(KEY_FILE_ENV, path.as_str())]);

        assert!(session_settings_from_env(&env, BuildMode::Debug).is_ok());
    }
}
