//! Application settings loaded via OrthoConfig.
//!
//! Sources, lowest precedence first: defaults, config file, `TOURS_*`
//! environment variables, command-line flags.

use std::net::SocketAddr;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::DEFAULT_IDLE_TIMEOUT_HOURS;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings rejected after loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid bind address '{value}'")]
    BindAddr { value: String },
    #[error("session idle timeout must be at least one hour, got {hours}")]
    IdleTimeout { hours: i64 },
    #[error("bcrypt cost must be between 4 and 31, got {cost}")]
    BcryptCost { cost: u32 },
}

/// Runtime configuration for the tour booking server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TOURS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the in-memory stores are used.
    pub database_url: Option<String>,
    /// Seed the demo catalogue into an empty tour store.
    #[ortho_config(default = false)]
    pub seed_tours: bool,
    /// Account promoted to admin at startup.
    pub admin_email: Option<String>,
    /// Password used when the admin account has to be created.
    pub admin_password: Option<String>,
    /// Hours a session may sit idle before it expires.
    pub session_idle_hours: Option<i64>,
    /// bcrypt work factor.
    pub bcrypt_cost: Option<u32>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    /// Parsed listen address.
    ///
    /// # Errors
    /// Returns [`ConfigError::BindAddr`] when the value is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| ConfigError::BindAddr {
            value: raw.to_owned(),
        })
    }

    /// Session idle timeout.
    ///
    /// # Errors
    /// Returns [`ConfigError::IdleTimeout`] for values below one hour.
    pub fn idle_timeout(&self) -> Result<TimeDelta, ConfigError> {
        let hours = self.session_idle_hours.unwrap_or(DEFAULT_IDLE_TIMEOUT_HOURS);
        if hours < 1 {
            return Err(ConfigError::IdleTimeout { hours });
        }
        Ok(TimeDelta::hours(hours))
    }

    /// bcrypt cost within the range the algorithm accepts.
    ///
    /// # Errors
    /// Returns [`ConfigError::BcryptCost`] outside `4..=31`.
    pub fn bcrypt_cost(&self) -> Result<u32, ConfigError> {
        let cost = self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST);
        if (4..=31).contains(&cost) {
            Ok(cost)
        } else {
            Err(ConfigError::BcryptCost { cost })
        }
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 8] = [
        "TOURS_BIND_ADDR",
        "TOURS_DATABASE_URL",
        "TOURS_SEED_TOURS",
        "TOURS_ADMIN_EMAIL",
        "TOURS_ADMIN_PASSWORD",
        "TOURS_SESSION_IDLE_HOURS",
        "TOURS_BCRYPT_COST",
        "TOURS_DB_MAX_CONNECTIONS",
    ];

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("tour-booking")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert_eq!(
            settings.bind_addr(),
            Ok(DEFAULT_BIND_ADDR.parse().expect("default addr"))
        );
        assert_eq!(settings.database_url(), None);
        assert!(!settings.seed_tours);
        assert_eq!(settings.idle_timeout(), Ok(TimeDelta::hours(24)));
        assert_eq!(settings.bcrypt_cost(), Ok(bcrypt::DEFAULT_COST));
        assert_eq!(settings.db_max_connections(), 10);
    }

    #[rstest]
    fn environment_overrides_defaults() {
        let _guard = lock_env([
            ("TOURS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("TOURS_DATABASE_URL", Some("postgres://localhost/tours".to_owned())),
            ("TOURS_SEED_TOURS", Some("true".to_owned())),
            ("TOURS_ADMIN_EMAIL", Some("ops@example.com".to_owned())),
            ("TOURS_SESSION_IDLE_HOURS", Some("2".to_owned())),
            ("TOURS_BCRYPT_COST", Some("6".to_owned())),
        ]);

        let settings = load();
        assert_eq!(
            settings.bind_addr(),
            Ok("127.0.0.1:9000".parse().expect("addr"))
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/tours"));
        assert!(settings.seed_tours);
        assert_eq!(settings.admin_email.as_deref(), Some("ops@example.com"));
        assert_eq!(settings.idle_timeout(), Ok(TimeDelta::hours(2)));
        assert_eq!(settings.bcrypt_cost(), Ok(6));
    }

    #[rstest]
    #[case("TOURS_BIND_ADDR", "not-an-address")]
    #[case("TOURS_SESSION_IDLE_HOURS", "0")]
    #[case("TOURS_BCRYPT_COST", "99")]
    fn out_of_range_values_are_rejected(#[case] name: &str, #[case] value: &str) {
        let _guard = lock_env([(name, Some(value.to_owned()))]);

        let settings = load();
        let failed = settings.bind_addr().is_err()
            || settings.idle_timeout().is_err()
            || settings.bcrypt_cost().is_err();
        assert!(failed, "{name}={value} should be rejected");
    }
}
