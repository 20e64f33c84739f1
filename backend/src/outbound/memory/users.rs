//! In-memory user repository.
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Email, Role, User, UserId};

use super::lock;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = lock(&self.users);
        if users.iter().any(|existing| existing.email() == user.email()) {
            return Err(UserRepositoryError::duplicate_email());
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        Ok(lock(&self.users)
            .iter()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(lock(&self.users).iter().find(|user| user.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(lock(&self.users).clone())
    }

    async fn set_role(&self, id: UserId, role: Role) -> Result<bool, UserRepositoryError> {
        let mut users = lock(&self.users);
        let Some(slot) = users.iter_mut().find(|user| user.id() == id) else {
            return Ok(false);
        };
        *slot = slot.clone().with_role(role);
        Ok(true)
    }
}
