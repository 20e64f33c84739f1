//! Driving port for booking mutations.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Booking, BookingId, BookingStatus, ContactInfo, Error, Identity, TourId};

/// Request to reserve a tour date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBooking {
    pub tour_id: TourId,
    pub date: NaiveDate,
    pub participants: u32,
    pub contact: ContactInfo,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Validate and persist a pending booking for `actor`.
    async fn create(&self, actor: &Identity, request: CreateBooking) -> Result<Booking, Error>;

    /// Cancel a booking on behalf of its owner or an administrator.
    async fn cancel(&self, actor: &Identity, id: BookingId) -> Result<Booking, Error>;

    /// Overwrite a booking's status. Administrators only.
    async fn set_status(
        &self,
        actor: &Identity,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, Error>;
}
