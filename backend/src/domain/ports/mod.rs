//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (repositories, session store, password hasher) are
//! implemented by outbound adapters. Driving ports are implemented by domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod booking_command;
mod booking_query;
mod booking_repository;
mod password_hasher;
mod session_store;
mod tour_catalogue;
mod tour_repository;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::{AuthSession, Authenticator};
#[cfg(test)]
pub use booking_command::MockBookingCommand;
pub use booking_command::{BookingCommand, CreateBooking};
#[cfg(test)]
pub use booking_query::MockBookingQuery;
pub use booking_query::{AdminBookingView, BookingOwner, BookingQuery, BookingView};
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
#[cfg(test)]
pub use tour_catalogue::{MockTourCatalogue, MockTourCommand};
pub use tour_catalogue::{TourCatalogue, TourCommand};
#[cfg(test)]
pub use tour_repository::MockTourRepository;
pub use tour_repository::{TourRepository, TourRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
