//! Server-side session records keyed by token fingerprint.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{SessionFingerprint, SessionRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "session store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "session store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a freshly opened session.
    async fn create(&self, record: &SessionRecord) -> Result<(), SessionStoreError>;

    /// Look up a session by fingerprint.
    async fn find(
        &self,
        fingerprint: &SessionFingerprint,
    ) -> Result<Option<SessionRecord>, SessionStoreError>;

    /// Record activity on a session.
    async fn touch(
        &self,
        fingerprint: &SessionFingerprint,
        at: DateTime<Utc>,
    ) -> Result<(), SessionStoreError>;

    /// Remove a session. Unknown fingerprints are ignored.
    async fn delete(&self, fingerprint: &SessionFingerprint) -> Result<(), SessionStoreError>;

    /// Remove every session last seen before `cutoff`, returning how many
    /// were dropped.
    async fn delete_idle_before(&self, cutoff: DateTime<Utc>) -> Result<usize, SessionStoreError>;
}
