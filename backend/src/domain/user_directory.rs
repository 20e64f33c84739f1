//! Admin account listing.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth_service::map_user_error;
use crate::domain::ports::{UserRepository, UsersQuery};
use crate::domain::{Error, Identity, User, require_admin};

/// [`UsersQuery`] implementation over a [`UserRepository`].
#[derive(Clone)]
pub struct UserDirectoryService<U> {
    users: Arc<U>,
}

impl<U> UserDirectoryService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> UsersQuery for UserDirectoryService<U>
where
    U: UserRepository,
{
    async fn list_users(&self, actor: &Identity) -> Result<Vec<User>, Error> {
        require_admin(actor)?;
        self.users.list().await.map_err(map_user_error)
    }
}
