//! PostgreSQL-backed [`UserRepository`].

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Email, PasswordHash, Role, User, UserId, UserName};

use super::error_mapping::{DieselFailure, classify};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    match classify(&error) {
        DieselFailure::UniqueViolation => UserRepositoryError::duplicate_email(),
        DieselFailure::Connection(message) => UserRepositoryError::connection(message),
        DieselFailure::Query(message) => UserRepositoryError::query(message),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let corrupt = |err: &dyn std::fmt::Display| {
        UserRepositoryError::query(format!("stored user {} is invalid: {err}", row.id))
    };
    let name = UserName::new(&row.name).map_err(|err| corrupt(&err))?;
    let email = Email::parse(&row.email).map_err(|err| corrupt(&err))?;
    let role = Role::from_str(&row.role).map_err(|err| corrupt(&err))?;
    Ok(User::new(
        UserId::from_uuid(row.id),
        name,
        email,
        role,
        PasswordHash::new(row.password_hash),
        row.created_at,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            name: user.name().as_str(),
            email: user.email().as_str(),
            role: user.role().as_str(),
            password_hash: user.password_hash().as_str(),
            created_at: user.created_at(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn set_role(&self, id: UserId, role: Role) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(users::table.find(id.as_uuid()))
            .set(users::role.eq(role.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated == 1)
    }
}
