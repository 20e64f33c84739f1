//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie carries only the opaque session token. Who the caller is gets
//! decided by [`crate::domain::ports::Authenticator::resolve`], never by
//! cookie contents.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AuthError, Error, SessionToken};

pub(crate) const TOKEN_KEY: &str = "token";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the session token in the cookie, replacing any previous one.
    ///
    /// The cookie is renewed so a pre-login session id is never reused.
    pub fn persist_token(&self, token: &SessionToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(TOKEN_KEY, token.as_str())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the token from the cookie, if present.
    pub fn token(&self) -> Result<Option<SessionToken>, Error> {
        let raw = self
            .0
            .get::<String>(TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw
            .filter(|value| !value.is_empty())
            .map(SessionToken::from_client))
    }

    /// Require a token or return `401 Unauthorized`.
    pub fn require_token(&self) -> Result<SessionToken, Error> {
        self.token()?
            .ok_or_else(|| AuthError::NotAuthenticated.into())
    }

    /// Drop the cookie entirely.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
