//! In-memory booking repository.
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingId, BookingStatus, UserId};

use super::lock;

#[derive(Debug, Default)]
pub struct InMemoryBookingRepository {
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn holds_slot(existing: &Booking, candidate: &Booking) -> bool {
    existing.id != candidate.id
        && existing.status.is_active()
        && existing.user_id == candidate.user_id
        && existing.tour_id == candidate.tour_id
        && existing.date == candidate.date
}

/// Newest first; among equal timestamps the later insertion wins.
fn newest_first(mut bookings: Vec<Booking>) -> Vec<Booking> {
    bookings.reverse();
    bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    bookings
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert_active(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut bookings = lock(&self.bookings);
        if bookings.iter().any(|existing| holds_slot(existing, booking)) {
            return Err(BookingRepositoryError::duplicate());
        }
        bookings.push(booking.clone());
        Ok(())
    }

    async fn find(&self, id: BookingId) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(lock(&self.bookings)
            .iter()
            .find(|booking| booking.id == id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, BookingRepositoryError> {
        let owned = lock(&self.bookings)
            .iter()
            .filter(|booking| booking.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(owned))
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(newest_first(lock(&self.bookings).clone()))
    }

    async fn cancel_active(
        &self,
        id: BookingId,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut bookings = lock(&self.bookings);
        let Some(booking) = bookings
            .iter_mut()
            .find(|booking| booking.id == id && booking.status.is_active())
        else {
            return Ok(None);
        };
        booking.status = BookingStatus::Cancelled;
        Ok(Some(booking.clone()))
    }

    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut bookings = lock(&self.bookings);
        let Some(index) = bookings.iter().position(|booking| booking.id == id) else {
            return Ok(None);
        };

        let mut updated = bookings[index].clone();
        updated.status = status;
        if status.is_active() && bookings.iter().any(|existing| holds_slot(existing, &updated)) {
            return Err(BookingRepositoryError::duplicate());
        }
        bookings[index] = updated.clone();
        Ok(Some(updated))
    }
}
