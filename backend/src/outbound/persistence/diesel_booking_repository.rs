//! PostgreSQL-backed [`BookingRepository`].
//!
//! Slot uniqueness is enforced by the `bookings_active_unique` partial
//! index; its violations surface as [`BookingRepositoryError::Duplicate`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingId, BookingStatus, ContactInfo, TourId, UserId};

use super::error_mapping::{DieselFailure, classify};
use super::models::{BookingRow, NewBookingRow};
use super::pool::{DbPool, PoolError};
use super::schema::bookings;

#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookingRepositoryError {
    BookingRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    match classify(&error) {
        DieselFailure::UniqueViolation => BookingRepositoryError::duplicate(),
        DieselFailure::Connection(message) => BookingRepositoryError::connection(message),
        DieselFailure::Query(message) => BookingRepositoryError::query(message),
    }
}

fn row_to_booking(row: BookingRow) -> Result<Booking, BookingRepositoryError> {
    let id = row.id;
    let corrupt = move |what: String| {
        BookingRepositoryError::query(format!("stored booking {id} is invalid: {what}"))
    };
    let participants = u32::try_from(row.participants).map_err(|err| corrupt(err.to_string()))?;
    let total_price = u64::try_from(row.total_price).map_err(|err| corrupt(err.to_string()))?;
    let status = row
        .status
        .parse::<BookingStatus>()
        .map_err(|err| corrupt(err.to_string()))?;
    let contact = ContactInfo::new(&row.contact_name, &row.contact_email, &row.contact_phone)
        .map_err(|err| corrupt(err.to_string()))?;
    Ok(Booking {
        id: BookingId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        tour_id: TourId::from_uuid(row.tour_id),
        date: row.booking_date,
        participants,
        total_price,
        status,
        contact,
        created_at: row.created_at,
    })
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert_active(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let total_price = i64::try_from(booking.total_price)
            .map_err(|_| BookingRepositoryError::query("total price exceeds storage range"))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewBookingRow {
            id: *booking.id.as_uuid(),
            user_id: *booking.user_id.as_uuid(),
            tour_id: *booking.tour_id.as_uuid(),
            booking_date: booking.date,
            participants: i64::from(booking.participants),
            total_price,
            status: booking.status.as_str(),
            contact_name: booking.contact.name(),
            contact_email: booking.contact.email(),
            contact_phone: booking.contact.phone(),
            created_at: booking.created_at,
        };
        diesel::insert_into(bookings::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find(&self, id: BookingId) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = bookings::table
            .find(id.as_uuid())
            .select(BookingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_booking).transpose()
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BookingRow> = bookings::table
            .filter(bookings::user_id.eq(user_id.as_uuid()))
            .order((bookings::created_at.desc(), bookings::id.desc()))
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_booking).collect()
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BookingRow> = bookings::table
            .order((bookings::created_at.desc(), bookings::id.desc()))
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_booking).collect()
    }

    async fn cancel_active(
        &self,
        id: BookingId,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let cancelled = BookingStatus::Cancelled.as_str();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(
            bookings::table
                .filter(bookings::id.eq(id.as_uuid()))
                .filter(bookings::status.ne(cancelled)),
        )
        .set(bookings::status.eq(cancelled))
        .returning(BookingRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        row.map(row_to_booking).transpose()
    }

    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(bookings::table.find(id.as_uuid()))
            .set(bookings::status.eq(status.as_str()))
            .returning(BookingRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_booking).transpose()
    }
}
