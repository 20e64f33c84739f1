//! Port abstraction for account persistence.
use async_trait::async_trait;

use crate::domain::{Email, Role, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail => "email address already registered",
    }
}

/// Store of registered accounts, keyed by id and unique by email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Fails with [`UserRepositoryError::DuplicateEmail`] when the email is
    /// taken; the check and the insert are atomic.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch an account by its normalised email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// All accounts, oldest first.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Change an account's role. Returns `false` when no account matched.
    async fn set_role(&self, id: UserId, role: Role) -> Result<bool, UserRepositoryError>;
}
