//! Booking workflow service.
//!
//! Creation runs its checks in a fixed order: request shape, tour
//! existence, availability, capacity, then the duplicate check performed
//! atomically by the store on insert. "Today" is the UTC calendar date of
//! the injected clock.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::auth_service::map_user_error;
use crate::domain::ports::{
    AdminBookingView, BookingCommand, BookingOwner, BookingQuery, BookingRepository,
    BookingRepositoryError, BookingView, CreateBooking, TourRepository, UserRepository,
};
use crate::domain::tour_service::{map_tour_error, tour_not_found};
use crate::domain::{
    Booking, BookingId, BookingRuleViolation, BookingStatus, Error, FieldErrors, Identity, TourId,
    TourSummary, require_admin,
};

/// Booking service over the booking, tour and user stores.
#[derive(Clone)]
pub struct BookingService<B, T, U> {
    bookings: Arc<B>,
    tours: Arc<T>,
    users: Arc<U>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl<B, T, U> BookingService<B, T, U> {
    pub fn new(
        bookings: Arc<B>,
        tours: Arc<T>,
        users: Arc<U>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            bookings,
            tours,
            users,
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}

fn map_booking_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
        BookingRepositoryError::Duplicate => BookingRuleViolation::DuplicateBooking.into(),
    }
}

fn booking_not_found() -> Error {
    Error::not_found("Booking not found").with_details(json!({ "entity": "booking" }))
}

impl<B, T, U> BookingService<B, T, U>
where
    B: BookingRepository,
    T: TourRepository,
    U: UserRepository,
{
    async fn find_booking(&self, id: BookingId) -> Result<Booking, Error> {
        self.bookings
            .find(id)
            .await
            .map_err(map_booking_error)?
            .ok_or_else(booking_not_found)
    }

    async fn tour_summaries(
        &self,
        bookings: &[Booking],
    ) -> Result<HashMap<TourId, TourSummary>, Error> {
        let mut ids: Vec<TourId> = bookings.iter().map(|booking| booking.tour_id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let tours = self.tours.find_many(&ids).await.map_err(map_tour_error)?;
        Ok(tours
            .iter()
            .map(|tour| (tour.id(), tour.summary()))
            .collect())
    }

    fn attach_tour(
        summaries: &HashMap<TourId, TourSummary>,
        booking: &Booking,
    ) -> Result<TourSummary, Error> {
        summaries.get(&booking.tour_id).cloned().ok_or_else(|| {
            Error::internal(format!(
                "booking {} references missing tour {}",
                booking.id, booking.tour_id
            ))
        })
    }
}

#[async_trait]
impl<B, T, U> BookingCommand for BookingService<B, T, U>
where
    B: BookingRepository,
    T: TourRepository,
    U: UserRepository,
{
    async fn create(&self, actor: &Identity, request: CreateBooking) -> Result<Booking, Error> {
        if request.date < self.today() {
            return Err(FieldErrors::single(
                "date",
                "in_past",
                "Booking date cannot be in the past",
            )
            .into());
        }

        let tour = self
            .tours
            .find(request.tour_id)
            .await
            .map_err(map_tour_error)?
            .filter(|tour| !tour.is_archived())
            .ok_or_else(tour_not_found)?;
        if !tour.available() {
            return Err(BookingRuleViolation::TourUnavailable.into());
        }

        let booking = Booking::price_for(
            &tour,
            actor.user_id,
            request.date,
            request.participants,
            request.contact,
            self.clock.utc(),
        )?;
        self.bookings
            .insert_active(&booking)
            .await
            .map_err(map_booking_error)?;
        info!(
            booking_id = %booking.id,
            tour_id = %booking.tour_id,
            user_id = %booking.user_id,
            total_price = booking.total_price,
            "booking created"
        );
        Ok(booking)
    }

    async fn cancel(&self, actor: &Identity, id: BookingId) -> Result<Booking, Error> {
        let booking = self.find_booking(id).await?;
        if !actor.can_act_for(booking.user_id) {
            return Err(Error::forbidden("Not authorized to cancel this booking"));
        }
        booking.ensure_cancellable(self.today())?;

        // The booking existed a moment ago, so a miss means a concurrent
        // cancel won.
        let cancelled = self
            .bookings
            .cancel_active(id)
            .await
            .map_err(map_booking_error)?
            .ok_or(BookingRuleViolation::AlreadyCancelled)?;
        info!(booking_id = %id, user_id = %actor.user_id, "booking cancelled");
        Ok(cancelled)
    }

    async fn set_status(
        &self,
        actor: &Identity,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, Error> {
        require_admin(actor)?;
        let updated = self
            .bookings
            .update_status(id, status)
            .await
            .map_err(map_booking_error)?
            .ok_or_else(booking_not_found)?;
        info!(booking_id = %id, status = %status, "booking status overridden");
        Ok(updated)
    }
}

#[async_trait]
impl<B, T, U> BookingQuery for BookingService<B, T, U>
where
    B: BookingRepository,
    T: TourRepository,
    U: UserRepository,
{
    async fn list_for_user(&self, actor: &Identity) -> Result<Vec<BookingView>, Error> {
        let bookings = self
            .bookings
            .list_for_user(actor.user_id)
            .await
            .map_err(map_booking_error)?;
        let summaries = self.tour_summaries(&bookings).await?;
        bookings
            .into_iter()
            .map(|booking| {
                let tour = Self::attach_tour(&summaries, &booking)?;
                Ok(BookingView { booking, tour })
            })
            .collect()
    }

    async fn get_for_user(&self, actor: &Identity, id: BookingId) -> Result<BookingView, Error> {
        let booking = self.find_booking(id).await?;
        // Other people's bookings are reported as missing.
        if !actor.can_act_for(booking.user_id) {
            return Err(booking_not_found());
        }
        let summaries = self.tour_summaries(std::slice::from_ref(&booking)).await?;
        let tour = Self::attach_tour(&summaries, &booking)?;
        Ok(BookingView { booking, tour })
    }

    async fn list_all(&self, actor: &Identity) -> Result<Vec<AdminBookingView>, Error> {
        require_admin(actor)?;
        let bookings = self.bookings.list_all().await.map_err(map_booking_error)?;
        let summaries = self.tour_summaries(&bookings).await?;
        let owners: HashMap<_, BookingOwner> = self
            .users
            .list()
            .await
            .map_err(map_user_error)?
            .iter()
            .map(|user| (user.id(), BookingOwner::from(user)))
            .collect();

        bookings
            .into_iter()
            .map(|booking| {
                let tour = Self::attach_tour(&summaries, &booking)?;
                let user = owners.get(&booking.user_id).cloned().ok_or_else(|| {
                    Error::internal(format!(
                        "booking {} references missing user {}",
                        booking.id, booking.user_id
                    ))
                })?;
                Ok(AdminBookingView {
                    booking,
                    user,
                    tour,
                })
            })
            .collect()
    }
}
