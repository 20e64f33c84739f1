//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for `cfg(test)` and behind the `test-support` feature.

use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use chrono::{DateTime, Local, NaiveDate, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordHash, TourDraft};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{
    InMemoryBookingRepository, InMemorySessionStore, InMemoryTourRepository,
    InMemoryUserRepository,
};
use crate::server::{AppDependencies, ServiceOptions, http_state_from_repositories};

/// Clock whose current instant is set by the test.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forwards (or backwards for negative deltas).
    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    /// Jump to an absolute instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

static PLAIN_DUMMY: LazyLock<PasswordHash> = LazyLock::new(|| PasswordHash::new("plain:\u{0}"));

/// Reversible "hasher" so tests do not pay for bcrypt rounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextHasher;

impl PasswordHasher for PlainTextHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("plain:{plaintext}")))
    }

    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        Ok(hash
            .as_str()
            .strip_prefix("plain:")
            .is_some_and(|stored| stored == plaintext))
    }

    fn dummy_hash(&self) -> &PasswordHash {
        &PLAIN_DUMMY
    }
}

/// A valid, bookable tour draft with room for ten or more participants.
pub fn sample_draft(name: &str, price: i64) -> TourDraft {
    TourDraft {
        name: name.to_owned(),
        description: format!("{name} with a local guide"),
        price,
        duration: 3,
        max_group_size: 12,
        location: "Rome, Italy".to_owned(),
        image: "https://images.example.com/tour.jpg".to_owned(),
        images: Vec::new(),
        featured: false,
        rating: 4.5,
        num_reviews: 10,
        difficulty: Some("easy".to_owned()),
        category: Some("cultural".to_owned()),
        start_dates: vec![NaiveDate::from_ymd_opt(2026, 9, 1).unwrap_or_default()],
        available: true,
    }
}

/// In-memory stores plus a controllable clock, wired into [`HttpState`].
///
/// Tests keep the store handles to seed data or inspect state directly.
pub struct MemoryBackend {
    pub users: Arc<InMemoryUserRepository>,
    pub tours: Arc<InMemoryTourRepository>,
    pub bookings: Arc<InMemoryBookingRepository>,
    pub sessions: Arc<InMemorySessionStore>,
    pub clock: Arc<MutableClock>,
}

impl MemoryBackend {
    /// Fresh empty stores with the clock set to `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            tours: Arc::new(InMemoryTourRepository::new()),
            bookings: Arc::new(InMemoryBookingRepository::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            clock: Arc::new(MutableClock::new(now)),
        }
    }

    /// Handler state over these stores, hashing with [`PlainTextHasher`].
    pub fn http_state(&self) -> HttpState {
        let options = ServiceOptions {
            clock: self.clock.clone(),
            hasher: Arc::new(PlainTextHasher),
            idle_timeout: TimeDelta::hours(crate::domain::DEFAULT_IDLE_TIMEOUT_HOURS),
        };
        http_state_from_repositories(
            self.users.clone(),
            self.tours.clone(),
            self.bookings.clone(),
            self.sessions.clone(),
            &options,
        )
    }

    /// Full application wiring for [`crate::server::build_app`], with a
    /// fresh cookie key and a non-secure cookie for plain HTTP tests.
    pub fn app_dependencies(&self) -> AppDependencies {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(self.http_state()),
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
            idle_timeout: TimeDelta::hours(crate::domain::DEFAULT_IDLE_TIMEOUT_HOURS),
        }
    }
}
