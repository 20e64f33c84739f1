//! Port abstraction for booking persistence.
use async_trait::async_trait;

use crate::domain::{Booking, BookingId, BookingStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking repository query failed: {message}",
        /// An active booking already holds the same user, tour and date.
        Duplicate => "an active booking already exists for this user, tour and date",
    }
}

/// Store of bookings.
///
/// Adapters guarantee that at most one non-cancelled booking exists per
/// `(user, tour, date)`, atomically with respect to concurrent writers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new active booking, failing with
    /// [`BookingRepositoryError::Duplicate`] on a slot collision.
    async fn insert_active(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Fetch a booking by id.
    async fn find(&self, id: BookingId) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Bookings owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Every booking, newest first.
    async fn list_all(&self) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Cancel a booking that is still active.
    ///
    /// The status check and the write happen atomically. Returns `None` when
    /// the id is unknown or the booking is already cancelled.
    async fn cancel_active(
        &self,
        id: BookingId,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Set a booking's status and return the updated booking.
    ///
    /// Returns `None` for an unknown id. Moving a cancelled booking back to
    /// an active status fails with [`BookingRepositoryError::Duplicate`] when
    /// its slot is taken.
    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, BookingRepositoryError>;
}
