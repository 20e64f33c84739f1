//! Diesel row structs. Internal to the persistence adapters.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{bookings, sessions, tours, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tours)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TourRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub duration: i64,
    pub max_group_size: i64,
    pub location: String,
    pub image: String,
    pub images: Vec<String>,
    pub featured: bool,
    pub rating: f32,
    pub num_reviews: i64,
    pub difficulty: String,
    pub category: String,
    pub start_dates: Vec<NaiveDate>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

/// Column values written on insert and update. `seq` is assigned by the
/// database.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tours)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TourValues<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub price: i64,
    pub duration: i64,
    pub max_group_size: i64,
    pub location: &'a str,
    pub image: &'a str,
    pub images: &'a [String],
    pub featured: bool,
    pub rating: f32,
    pub num_reviews: i64,
    pub difficulty: &'a str,
    pub category: &'a str,
    pub start_dates: &'a [NaiveDate],
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tour_id: Uuid,
    pub booking_date: NaiveDate,
    pub participants: i64,
    pub total_price: i64,
    pub status: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tour_id: Uuid,
    pub booking_date: NaiveDate,
    pub participants: i64,
    pub total_price: i64,
    pub status: &'a str,
    pub contact_name: &'a str,
    pub contact_email: &'a str,
    pub contact_phone: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SessionRow {
    pub fingerprint: String,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub user_role: String,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}
