//! In-memory session store.
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{SessionFingerprint, SessionRecord};

use super::lock;

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionFingerprint, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, record: &SessionRecord) -> Result<(), SessionStoreError> {
        lock(&self.sessions).insert(record.fingerprint.clone(), record.clone());
        Ok(())
    }

    async fn find(
        &self,
        fingerprint: &SessionFingerprint,
    ) -> Result<Option<SessionRecord>, SessionStoreError> {
        Ok(lock(&self.sessions).get(fingerprint).cloned())
    }

    async fn touch(
        &self,
        fingerprint: &SessionFingerprint,
        at: DateTime<Utc>,
    ) -> Result<(), SessionStoreError> {
        if let Some(record) = lock(&self.sessions).get_mut(fingerprint) {
            record.last_seen_at = at;
        }
        Ok(())
    }

    async fn delete(&self, fingerprint: &SessionFingerprint) -> Result<(), SessionStoreError> {
        lock(&self.sessions).remove(fingerprint);
        Ok(())
    }

    async fn delete_idle_before(&self, cutoff: DateTime<Utc>) -> Result<usize, SessionStoreError> {
        let mut sessions = lock(&self.sessions);
        let before = sessions.len();
        sessions.retain(|_, record| record.last_seen_at >= cutoff);
        Ok(before - sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use rstest::rstest;

    use super::*;
    use crate::domain::{Identity, Role, SessionToken, UserId};

    fn record_seen_at(last_seen_at: DateTime<Utc>) -> SessionRecord {
        SessionRecord {
            fingerprint: SessionToken::generate().fingerprint(),
            identity: Identity {
                user_id: UserId::random(),
                name: "Ana".into(),
                email: "ana@example.com".into(),
                role: Role::User,
            },
            created_at: last_seen_at,
            last_seen_at,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn records_round_trip_until_deleted() {
        let store = InMemorySessionStore::new();
        let opened = Utc::now();
        let record = record_seen_at(opened);
        store.create(&record).await.expect("create");

        let later = opened + TimeDelta::minutes(5);
        store.touch(&record.fingerprint, later).await.expect("touch");
        let found = store
            .find(&record.fingerprint)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(found.last_seen_at, later);

        store.delete(&record.fingerprint).await.expect("delete");
        assert!(store.find(&record.fingerprint).await.expect("find").is_none());
        store
            .delete(&record.fingerprint)
            .await
            .expect("deleting twice is fine");
    }

    #[rstest]
    #[tokio::test]
    async fn abandoned_sessions_are_purged() {
        let store = InMemorySessionStore::new();
        let now = Utc::now();
        let abandoned = record_seen_at(now - TimeDelta::hours(30));
        let boundary = record_seen_at(now - TimeDelta::hours(24));
        let active = record_seen_at(now - TimeDelta::minutes(5));
        for record in [&abandoned, &boundary, &active] {
            store.create(record).await.expect("create");
        }

        let removed = store
            .delete_idle_before(now - TimeDelta::hours(24))
            .await
            .expect("purge");

        assert_eq!(removed, 1);
        assert!(store.find(&abandoned.fingerprint).await.expect("find").is_none());
        assert!(store.find(&boundary.fingerprint).await.expect("find").is_some());
        assert!(store.find(&active.fingerprint).await.expect("find").is_some());
    }
}
