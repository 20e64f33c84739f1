//! PostgreSQL-backed [`SessionStore`].

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{Identity, Role, SessionFingerprint, SessionRecord, UserId};

use super::error_mapping::{DieselFailure, classify};
use super::models::SessionRow;
use super::pool::{DbPool, PoolError};
use super::schema::sessions;

#[derive(Clone)]
pub struct DieselSessionStore {
    pool: DbPool,
}

impl DieselSessionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SessionStoreError {
    SessionStoreError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> SessionStoreError {
    match classify(&error) {
        DieselFailure::Connection(message) => SessionStoreError::connection(message),
        DieselFailure::UniqueViolation => SessionStoreError::query("session already exists"),
        DieselFailure::Query(message) => SessionStoreError::query(message),
    }
}

fn record_to_row(record: &SessionRecord) -> SessionRow {
    SessionRow {
        fingerprint: record.fingerprint.as_str().to_owned(),
        user_id: *record.identity.user_id.as_uuid(),
        user_name: record.identity.name.clone(),
        user_email: record.identity.email.clone(),
        user_role: record.identity.role.as_str().to_owned(),
        created_at: record.created_at,
        last_seen_at: record.last_seen_at,
    }
}

fn row_to_record(row: SessionRow) -> Result<SessionRecord, SessionStoreError> {
    let role = Role::from_str(&row.user_role)
        .map_err(|err| SessionStoreError::query(format!("stored session is invalid: {err}")))?;
    Ok(SessionRecord {
        fingerprint: SessionFingerprint::new(row.fingerprint),
        identity: Identity {
            user_id: UserId::from_uuid(row.user_id),
            name: row.user_name,
            email: row.user_email,
            role,
        },
        created_at: row.created_at,
        last_seen_at: row.last_seen_at,
    })
}

#[async_trait]
impl SessionStore for DieselSessionStore {
    async fn create(&self, record: &SessionRecord) -> Result<(), SessionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(sessions::table)
            .values(&record_to_row(record))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find(
        &self,
        fingerprint: &SessionFingerprint,
    ) -> Result<Option<SessionRecord>, SessionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = sessions::table
            .find(fingerprint.as_str())
            .select(SessionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_record).transpose()
    }

    async fn touch(
        &self,
        fingerprint: &SessionFingerprint,
        at: DateTime<Utc>,
    ) -> Result<(), SessionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(sessions::table.find(fingerprint.as_str()))
            .set(sessions::last_seen_at.eq(at))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, fingerprint: &SessionFingerprint) -> Result<(), SessionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(sessions::table.find(fingerprint.as_str()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete_idle_before(&self, cutoff: DateTime<Utc>) -> Result<usize, SessionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(sessions::table.filter(sessions::last_seen_at.lt(cutoff)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::SessionToken;

    #[rstest]
    fn records_survive_the_row_mapping() {
        let now = Utc::now();
        let record = SessionRecord {
            fingerprint: SessionToken::generate().fingerprint(),
            identity: Identity {
                user_id: UserId::random(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
                role: Role::Admin,
            },
            created_at: now,
            last_seen_at: now,
        };
        let restored = row_to_record(record_to_row(&record)).expect("valid row");
        assert_eq!(restored, record);
    }
}
