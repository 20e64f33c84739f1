//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use chrono::TimeDelta;

use crate::domain::DEFAULT_IDLE_TIMEOUT_HOURS;
use crate::inbound::http::session_config::SessionSettings;

/// Listener and session cookie settings for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) idle_timeout: TimeDelta,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            idle_timeout: TimeDelta::hours(DEFAULT_IDLE_TIMEOUT_HOURS),
        }
    }

    /// Cookie lifetime; matches the server-side session idle timeout.
    #[must_use]
    pub fn with_idle_timeout(mut self, idle_timeout: TimeDelta) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
