//! Driving port for registration, login and session resolution.
//!
//! Inbound adapters hold only the opaque [`SessionToken`]; every request
//! turns it back into an [`Identity`] through [`Authenticator::resolve`].

use async_trait::async_trait;

use crate::domain::{Error, Identity, LoginCredentials, Registration, SessionToken};

/// A freshly opened session.
#[derive(Debug)]
pub struct AuthSession {
    /// Token to hand to the client.
    pub token: SessionToken,
    /// Identity bound to the session.
    pub identity: Identity,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Create an account and open a session for it.
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error>;

    /// Check credentials and open a session.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error>;

    /// Resolve a presented token to the caller's identity.
    async fn resolve(&self, token: &SessionToken) -> Result<Identity, Error>;

    /// Close the session behind `token`, if any.
    async fn logout(&self, token: &SessionToken) -> Result<(), Error>;
}
