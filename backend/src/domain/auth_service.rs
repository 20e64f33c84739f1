//! Session authenticator.
//!
//! Implements [`Authenticator`] over the user repository, the session store
//! and a password hasher. Hashing runs on the blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AuthSession, Authenticator, PasswordHashError, PasswordHasher, SessionStore,
    SessionStoreError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    AuthError, DEFAULT_IDLE_TIMEOUT_HOURS, Email, Error, FieldErrors, Identity, LoginCredentials,
    PasswordHash, Registration, Role, SessionRecord, SessionToken, TraceId, User, UserId,
};

/// Authenticator backed by a user repository and a session store.
#[derive(Clone)]
pub struct AuthService<U, S> {
    users: Arc<U>,
    sessions: Arc<S>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock + Send + Sync>,
    idle_timeout: TimeDelta,
}

impl<U, S> AuthService<U, S> {
    /// Create a service with the default idle timeout.
    pub fn new(
        users: Arc<U>,
        sessions: Arc<S>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            clock,
            idle_timeout: TimeDelta::hours(DEFAULT_IDLE_TIMEOUT_HOURS),
        }
    }

    /// Override how long a session may sit idle before it expires.
    #[must_use]
    pub fn with_idle_timeout(mut self, idle_timeout: TimeDelta) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }
}

pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail => email_taken(),
    }
}

fn map_session_error(error: SessionStoreError) -> Error {
    match error {
        SessionStoreError::Connection { message } => {
            Error::service_unavailable(format!("session store unavailable: {message}"))
        }
        SessionStoreError::Query { message } => {
            Error::internal(format!("session store error: {message}"))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn email_taken() -> Error {
    FieldErrors::single("email", "email_taken", "User already exists").into()
}

impl<U, S> AuthService<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    async fn hash_password(&self, password: Zeroizing<String>) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        TraceId::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hash_error)
    }

    async fn verify_password(
        &self,
        password: Zeroizing<String>,
        hash: PasswordHash,
    ) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        TraceId::spawn_blocking(move || hasher.verify(password.as_str(), &hash))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
            .map_err(map_hash_error)
    }

    async fn open_session(&self, identity: Identity) -> Result<AuthSession, Error> {
        let token = SessionToken::generate();
        let now = self.clock.utc();
        let record = SessionRecord {
            fingerprint: token.fingerprint(),
            identity: identity.clone(),
            created_at: now,
            last_seen_at: now,
        };
        self.sessions
            .create(&record)
            .await
            .map_err(map_session_error)?;
        self.purge_idle_sessions(now).await;
        Ok(AuthSession { token, identity })
    }

    /// Drop sessions nobody presented within the idle window. A failed purge
    /// does not block the sign-in that triggered it.
    async fn purge_idle_sessions(&self, now: DateTime<Utc>) {
        match self.sessions.delete_idle_before(now - self.idle_timeout).await {
            Ok(0) => {}
            Ok(removed) => debug!(removed, "purged idle sessions"),
            Err(err) => warn!(error = %err, "idle session purge failed"),
        }
    }

    async fn lookup(&self, email: &str) -> Result<Option<User>, Error> {
        // A malformed address cannot belong to an account.
        let Ok(email) = Email::parse(email) else {
            return Ok(None);
        };
        self.users
            .find_by_email(&email)
            .await
            .map_err(map_user_error)
    }
}

#[async_trait]
impl<U, S> Authenticator for AuthService<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error> {
        if self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(email_taken());
        }

        let hash = self
            .hash_password(Zeroizing::new(registration.password().to_owned()))
            .await?;
        let user = User::new(
            UserId::random(),
            registration.name().clone(),
            registration.email().clone(),
            Role::User,
            hash,
            self.clock.utc(),
        );
        self.users.insert(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), "account registered");
        self.open_session(user.identity()).await
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        let password = Zeroizing::new(credentials.password().to_owned());
        let Some(user) = self.lookup(credentials.email()).await? else {
            self.verify_password(password, self.hasher.dummy_hash().clone())
                .await?;
            debug!("login attempt for unknown account");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self
            .verify_password(password, user.password_hash().clone())
            .await?
        {
            warn!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        info!(user_id = %user.id(), "login succeeded");
        self.open_session(user.identity()).await
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Identity, Error> {
        let fingerprint = token.fingerprint();
        let Some(record) = self
            .sessions
            .find(&fingerprint)
            .await
            .map_err(map_session_error)?
        else {
            return Err(AuthError::NotAuthenticated.into());
        };

        let now = self.clock.utc();
        if record.is_expired(now, self.idle_timeout) {
            self.sessions
                .delete(&fingerprint)
                .await
                .map_err(map_session_error)?;
            debug!(user_id = %record.identity.user_id, "session expired");
            return Err(AuthError::NotAuthenticated.into());
        }

        self.sessions
            .touch(&fingerprint, now)
            .await
            .map_err(map_session_error)?;
        Ok(record.identity)
    }

    async fn logout(&self, token: &SessionToken) -> Result<(), Error> {
        self.sessions
            .delete(&token.fingerprint())
            .await
            .map_err(map_session_error)
    }
}
