//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.
//!
//! Row structs and table definitions stay private to this module; every
//! repository converts rows back through the domain constructors, so stored
//! data is revalidated on the way out.
//!
//! ```ignore
//! use tour_booking::outbound::persistence::{DbPool, DieselTourRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tours")).await?;
//! let tours = DieselTourRepository::new(pool);
//! ```

mod diesel_booking_repository;
mod diesel_session_store;
mod diesel_tour_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_session_store::DieselSessionStore;
pub use diesel_tour_repository::DieselTourRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
