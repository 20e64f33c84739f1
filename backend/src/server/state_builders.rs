//! Builders wiring repositories into services and HTTP state.
//!
//! The same generic wiring serves both storage backends: Diesel repositories
//! when a database URL is configured, in-memory stores otherwise.

use std::sync::Arc;

use chrono::TimeDelta;
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{
    BookingRepository, PasswordHashError, PasswordHasher, SessionStore, TourRepository,
    UserRepository,
};
use crate::domain::{AuthService, BookingService, TourCatalogueService, UserDirectoryService};
use crate::example_data::{StartupSeedingError, seed_tours_on_startup};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{
    InMemoryBookingRepository, InMemorySessionStore, InMemoryTourRepository,
    InMemoryUserRepository,
};
use crate::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselSessionStore, DieselTourRepository,
    DieselUserRepository, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};
use crate::outbound::security::BcryptPasswordHasher;

use super::bootstrap::{BootstrapError, bootstrap_admin};
use super::settings::{AppSettings, ConfigError};

/// Cross-cutting collaborators shared by every service.
#[derive(Clone)]
pub struct ServiceOptions {
    pub clock: Arc<dyn Clock + Send + Sync>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub idle_timeout: TimeDelta,
}

/// Failures while preparing application state.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Hasher(#[from] PasswordHashError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Seeding(#[from] StartupSeedingError),
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
}

/// Build the driving ports over the given stores.
pub fn http_state_from_repositories<U, T, B, S>(
    users: Arc<U>,
    tours: Arc<T>,
    bookings: Arc<B>,
    sessions: Arc<S>,
    options: &ServiceOptions,
) -> HttpState
where
    U: UserRepository + 'static,
    T: TourRepository + 'static,
    B: BookingRepository + 'static,
    S: SessionStore + 'static,
{
    let authenticator = AuthService::new(
        Arc::clone(&users),
        sessions,
        Arc::clone(&options.hasher),
        Arc::clone(&options.clock),
    )
    .with_idle_timeout(options.idle_timeout);
    let catalogue = Arc::new(TourCatalogueService::new(
        Arc::clone(&tours),
        Arc::clone(&options.clock),
    ));
    let booking_service = Arc::new(BookingService::new(
        bookings,
        tours,
        Arc::clone(&users),
        Arc::clone(&options.clock),
    ));

    HttpState::new(HttpStatePorts {
        authenticator: Arc::new(authenticator),
        tours: catalogue.clone(),
        tour_admin: catalogue,
        bookings: booking_service.clone(),
        booking_query: booking_service,
        users: Arc::new(UserDirectoryService::new(users)),
    })
}

/// Build HTTP state from settings, running migrations, seeding and the
/// admin bootstrap as configured.
///
/// # Errors
/// Returns [`StartupError`] when settings are invalid or a startup step
/// fails.
pub async fn build_http_state(
    settings: &AppSettings,
    clock: Arc<dyn Clock + Send + Sync>,
) -> Result<HttpState, StartupError> {
    let options = ServiceOptions {
        clock,
        hasher: Arc::new(BcryptPasswordHasher::new(settings.bcrypt_cost()?)?),
        idle_timeout: settings.idle_timeout()?,
    };

    match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url).await?;
            let pool =
                DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
                    .await?;
            info!(max_connections = settings.db_max_connections(), "using PostgreSQL stores");
            prepare(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselTourRepository::new(pool.clone())),
                Arc::new(DieselBookingRepository::new(pool.clone())),
                Arc::new(DieselSessionStore::new(pool)),
                settings,
                &options,
            )
            .await
        }
        None => {
            info!("no database configured; using in-memory stores");
            prepare(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryTourRepository::new()),
                Arc::new(InMemoryBookingRepository::new()),
                Arc::new(InMemorySessionStore::new()),
                settings,
                &options,
            )
            .await
        }
    }
}

async fn prepare<U, T, B, S>(
    users: Arc<U>,
    tours: Arc<T>,
    bookings: Arc<B>,
    sessions: Arc<S>,
    settings: &AppSettings,
    options: &ServiceOptions,
) -> Result<HttpState, StartupError>
where
    U: UserRepository + 'static,
    T: TourRepository + 'static,
    B: BookingRepository + 'static,
    S: SessionStore + 'static,
{
    if settings.seed_tours {
        seed_tours_on_startup(tours.as_ref(), options.clock.as_ref()).await?;
    }
    if let Some(email) = settings.admin_email.as_deref() {
        bootstrap_admin(
            users.as_ref(),
            options.hasher.as_ref(),
            options.clock.as_ref(),
            email,
            settings.admin_password.as_deref(),
        )
        .await?;
    }
    Ok(http_state_from_repositories(
        users, tours, bookings, sessions, options,
    ))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::TourQuery;
    use crate::test_support::MutableClock;

    fn settings(seed_tours: bool) -> AppSettings {
        AppSettings {
            bind_addr: None,
            database_url: None,
            seed_tours,
            admin_email: None,
            admin_password: None,
            session_idle_hours: None,
            bcrypt_cost: Some(4),
            db_max_connections: None,
        }
    }

    #[rstest]
    #[case(false, 0)]
    #[case(true, 5)]
    #[tokio::test]
    async fn memory_state_honours_the_seed_flag(#[case] seed: bool, #[case] expected: usize) {
        let state = build_http_state(&settings(seed), Arc::new(MutableClock::new(Utc::now())))
            .await
            .expect("state");

        let tours = state.tours.list(&TourQuery::default()).await.expect("list");
        assert_eq!(tours.len(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_settings_stop_startup() {
        let mut bad = settings(false);
        bad.session_idle_hours = Some(0);

        let result = build_http_state(&bad, Arc::new(MutableClock::new(Utc::now()))).await;
        assert!(matches!(result, Err(StartupError::Config(_))));
    }
}
