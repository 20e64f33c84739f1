//! Driving port for booking reads.

use async_trait::async_trait;

use crate::domain::{Booking, BookingId, Error, Identity, TourSummary, User, UserId};

/// A booking with its tour summary attached.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingView {
    pub booking: Booking,
    pub tour: TourSummary,
}

/// Owner details shown on the admin booking list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOwner {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&User> for BookingOwner {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
        }
    }
}

/// A booking with owner and tour attached.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminBookingView {
    pub booking: Booking,
    pub user: BookingOwner,
    pub tour: TourSummary,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// The caller's own bookings, newest first.
    async fn list_for_user(&self, actor: &Identity) -> Result<Vec<BookingView>, Error>;

    /// One booking visible to the caller.
    async fn get_for_user(&self, actor: &Identity, id: BookingId) -> Result<BookingView, Error>;

    /// Every booking, newest first. Administrators only.
    async fn list_all(&self, actor: &Identity) -> Result<Vec<AdminBookingView>, Error>;
}
