//! Driving port for the admin account listing.

use async_trait::async_trait;

use crate::domain::{Error, Identity, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered account. Administrators only.
    async fn list_users(&self, actor: &Identity) -> Result<Vec<User>, Error>;
}
