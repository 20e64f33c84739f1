//! Administrator endpoints.
//!
//! ```text
//! GET /api/admin/users
//! GET /api/admin/bookings
//! PATCH /api/admin/bookings/{id}/status {"status":"confirmed"}
//! ```

use actix_web::{get, patch, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BookingId, BookingStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    AdminBookingViewResponse, AdminUserResponse, BookingResponse, ErrorSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;

/// Status override body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct StatusRequest {
    #[schema(example = "confirmed")]
    pub status: String,
}

/// Every registered account.
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Accounts", body = [AdminUserResponse]),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listUsers"
)]
#[get("/admin/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AdminUserResponse>>> {
    let actor = state.identify(&session).await?;
    let users = state.users.list_users(&actor).await?;
    Ok(web::Json(users.iter().map(AdminUserResponse::from).collect()))
}

/// Every booking with owner and tour, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/bookings",
    responses(
        (status = 200, description = "Bookings", body = [AdminBookingViewResponse]),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listAllBookings"
)]
#[get("/admin/bookings")]
pub async fn list_all_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AdminBookingViewResponse>>> {
    let actor = state.identify(&session).await?;
    let views = state.booking_query.list_all(&actor).await?;
    Ok(web::Json(views.iter().map(AdminBookingViewResponse::from).collect()))
}

/// Overwrite a booking's status. The cancellation cutoff does not apply.
#[utoipa::path(
    patch,
    path = "/api/admin/bookings/{id}/status",
    params(("id" = String, Path, description = "Booking id")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Booking updated", body = BookingResponse),
        (status = 400, description = "Unknown status", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 404, description = "Booking not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "setBookingStatus"
)]
#[patch("/admin/bookings/{id}/status")]
pub async fn set_booking_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<StatusRequest>,
) -> ApiResult<web::Json<BookingResponse>> {
    let actor = state.identify(&session).await?;
    let id = BookingId::from(parse_uuid(&path, "id")?);
    let status = payload.status.parse::<BookingStatus>()?;
    let booking = state.bookings.set_status(&actor, id, status).await?;
    Ok(web::Json(BookingResponse::from(&booking)))
}
