//! JSON payloads and OpenAPI schema definitions shared by the handlers.
//!
//! Domain types remain framework-agnostic by not deriving `Serialize` or
//! `ToSchema`. The response structs here mirror them in the wire shape
//! (camelCase keys) and are built through `From` conversions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{AdminBookingView, BookingOwner, BookingView};
use crate::domain::{Booking, ContactInfo, Identity, Tour, TourSummary, User};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or breaks a booking rule.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Maximum group size for this tour is 10")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field error list (`errors`) or a booking rule `code`.
    details: Option<serde_json::Value>,
}

/// Confirmation message body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Logged out successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public account details returned after register and login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub id: Uuid,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
}

impl From<&Identity> for AccountResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: *identity.user_id.as_uuid(),
            name: identity.name.clone(),
            email: identity.email.clone(),
        }
    }
}

/// The signed-in caller, including role.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CurrentUserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[schema(example = "user")]
    pub role: String,
}

impl From<&Identity> for CurrentUserResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: *identity.user_id.as_uuid(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            role: identity.role.as_str().to_owned(),
        }
    }
}

/// Account row in the admin user list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for AdminUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            name: user.name().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
            role: user.role().as_str().to_owned(),
            created_at: user.created_at(),
        }
    }
}

/// Catalogue entry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourResponse {
    pub id: Uuid,
    #[schema(example = "Paris City Explorer")]
    pub name: String,
    pub description: String,
    #[schema(example = 299)]
    pub price: u32,
    #[schema(example = 3)]
    pub duration: u32,
    #[schema(example = 15)]
    pub max_group_size: u32,
    #[schema(example = "Paris, France")]
    pub location: String,
    pub image: String,
    pub images: Vec<String>,
    pub featured: bool,
    pub rating: f32,
    pub num_reviews: u32,
    #[schema(example = "easy")]
    pub difficulty: String,
    #[schema(example = "city")]
    pub category: String,
    pub start_dates: Vec<NaiveDate>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Tour> for TourResponse {
    fn from(tour: &Tour) -> Self {
        Self {
            id: *tour.id().as_uuid(),
            name: tour.name().to_owned(),
            description: tour.description().to_owned(),
            price: tour.price(),
            duration: tour.duration(),
            max_group_size: tour.max_group_size(),
            location: tour.location().to_owned(),
            image: tour.image().to_owned(),
            images: tour.images().to_vec(),
            featured: tour.featured(),
            rating: tour.rating(),
            num_reviews: tour.num_reviews(),
            difficulty: tour.difficulty().as_str().to_owned(),
            category: tour.category().as_str().to_owned(),
            start_dates: tour.start_dates().to_vec(),
            available: tour.available(),
            created_at: tour.created_at(),
        }
    }
}

/// Tour fields embedded in booking listings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TourSummaryResponse {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub location: String,
    pub price: u32,
    pub duration: u32,
}

impl From<&TourSummary> for TourSummaryResponse {
    fn from(summary: &TourSummary) -> Self {
        Self {
            id: *summary.id.as_uuid(),
            name: summary.name.clone(),
            image: summary.image.clone(),
            location: summary.location.clone(),
            price: summary.price,
            duration: summary.duration,
        }
    }
}

/// Contact details captured with a booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ContactInfoPayload {
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "+44 20 7946 0958")]
    pub phone: String,
}

impl From<&ContactInfo> for ContactInfoPayload {
    fn from(contact: &ContactInfo) -> Self {
        Self {
            name: contact.name().to_owned(),
            email: contact.email().to_owned(),
            phone: contact.phone().to_owned(),
        }
    }
}

/// A reservation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tour_id: Uuid,
    #[schema(example = "2026-09-01")]
    pub date: NaiveDate,
    #[schema(example = 2)]
    pub participants: u32,
    #[schema(example = 200)]
    pub total_price: u64,
    #[schema(example = "pending")]
    pub status: String,
    pub contact_info: ContactInfoPayload,
    pub created_at: DateTime<Utc>,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: *booking.id.as_uuid(),
            user_id: *booking.user_id.as_uuid(),
            tour_id: *booking.tour_id.as_uuid(),
            date: booking.date,
            participants: booking.participants,
            total_price: booking.total_price,
            status: booking.status.as_str().to_owned(),
            contact_info: ContactInfoPayload::from(&booking.contact),
            created_at: booking.created_at,
        }
    }
}

/// A booking with its tour summary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingViewResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,
    pub tour: TourSummaryResponse,
}

impl From<&BookingView> for BookingViewResponse {
    fn from(view: &BookingView) -> Self {
        Self {
            booking: BookingResponse::from(&view.booking),
            tour: TourSummaryResponse::from(&view.tour),
        }
    }
}

/// Owner details shown to administrators.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingOwnerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&BookingOwner> for BookingOwnerResponse {
    fn from(owner: &BookingOwner) -> Self {
        Self {
            id: *owner.id.as_uuid(),
            name: owner.name.clone(),
            email: owner.email.clone(),
        }
    }
}

/// A booking with owner and tour, as listed for administrators.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminBookingViewResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,
    pub user: BookingOwnerResponse,
    pub tour: TourSummaryResponse,
}

impl From<&AdminBookingView> for AdminBookingViewResponse {
    fn from(view: &AdminBookingView) -> Self {
        Self {
            booking: BookingResponse::from(&view.booking),
            user: BookingOwnerResponse::from(&view.user),
            tour: TourSummaryResponse::from(&view.tour),
        }
    }
}
