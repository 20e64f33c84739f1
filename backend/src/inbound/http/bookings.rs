//! Booking handlers for signed-in users.
//!
//! ```text
//! GET /api/bookings
//! GET /api/bookings/{id}
//! POST /api/bookings {"tourId":"…","date":"2026-09-01","participants":2,"contactInfo":{…}}
//! PATCH /api/bookings/{id}/cancel
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreateBooking;
use crate::domain::{BookingId, ContactInfo, FieldErrors, TourId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    BookingResponse, BookingViewResponse, ContactInfoPayload, ErrorSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_date, parse_uuid};

/// Reservation request. Prices are computed server-side.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingRequest {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub tour_id: String,
    #[schema(example = "2026-09-01")]
    pub date: String,
    #[schema(example = 2)]
    pub participants: Option<i64>,
    pub contact_info: Option<ContactInfoPayload>,
}

impl TryFrom<BookingRequest> for CreateBooking {
    type Error = FieldErrors;

    fn try_from(value: BookingRequest) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::default();
        let tour_id = value
            .tour_id
            .parse::<TourId>()
            .map_err(|_| errors.push("tourId", "invalid_uuid", "tourId must be a valid UUID"))
            .ok();
        let date = parse_date(&value.date, "date")
            .map_err(|err| errors.extend(err))
            .ok();
        let participants = match value.participants {
            Some(raw) => u32::try_from(raw.max(0)).unwrap_or(u32::MAX),
            None => {
                errors.push("participants", "required", "Please provide participants");
                0
            }
        };
        let payload = value.contact_info.unwrap_or_default();
        let contact = ContactInfo::new(&payload.name, &payload.email, &payload.phone)
            .map_err(|err| errors.extend(err))
            .ok();

        match (tour_id, date, contact) {
            (Some(tour_id), Some(date), Some(contact)) => errors.finish(Self {
                tour_id,
                date,
                participants,
                contact,
            }),
            _ => Err(errors),
        }
    }
}

fn booking_id(raw: &str) -> ApiResult<BookingId> {
    parse_uuid(raw, "id").map(BookingId::from)
}

/// The caller's bookings, newest first.
#[utoipa::path(
    get,
    path = "/api/bookings",
    responses(
        (status = 200, description = "Own bookings", body = [BookingViewResponse]),
        (status = 401, description = "Not signed in", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "listMyBookings"
)]
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<BookingViewResponse>>> {
    let actor = state.identify(&session).await?;
    let views = state.booking_query.list_for_user(&actor).await?;
    Ok(web::Json(views.iter().map(BookingViewResponse::from).collect()))
}

/// One booking owned by the caller. Administrators may read any booking.
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(("id" = String, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking", body = BookingViewResponse),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Booking not found", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "getBooking"
)]
#[get("/bookings/{id}")]
pub async fn get_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookingViewResponse>> {
    let actor = state.identify(&session).await?;
    let view = state
        .booking_query
        .get_for_user(&actor, booking_id(&path)?)
        .await?;
    Ok(web::Json(BookingViewResponse::from(&view)))
}

/// Reserve a tour date.
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Invalid fields or booking rule broken", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Tour not found", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<BookingRequest>,
) -> ApiResult<HttpResponse> {
    let actor = state.identify(&session).await?;
    let request = CreateBooking::try_from(payload.into_inner())?;
    let booking = state.bookings.create(&actor, request).await?;
    Ok(HttpResponse::Created().json(BookingResponse::from(&booking)))
}

/// Cancel a booking at least seven days before it starts.
#[utoipa::path(
    patch,
    path = "/api/bookings/{id}/cancel",
    params(("id" = String, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingResponse),
        (status = 400, description = "Cutoff passed or already cancelled", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Booking not found", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "cancelBooking"
)]
#[patch("/bookings/{id}/cancel")]
pub async fn cancel_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookingResponse>> {
    let actor = state.identify(&session).await?;
    let booking = state.bookings.cancel(&actor, booking_id(&path)?).await?;
    Ok(web::Json(BookingResponse::from(&booking)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::{NaiveDate, Utc};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::MockBookingCommand;
    use crate::domain::{Booking, BookingRuleViolation, BookingStatus, Role};
    use crate::inbound::http::test_utils::{
        SEED_SESSION_PATH, authenticator_for, identity, mock_ports, session_cookie, test_app,
    };

    fn contact() -> Value {
        json!({ "name": "Alice", "email": "alice@example.com", "phone": "555-0100" })
    }

    #[rstest]
    fn request_errors_are_collected() {
        let errors = CreateBooking::try_from(BookingRequest {
            tour_id: "nope".into(),
            date: "next tuesday".into(),
            participants: None,
            contact_info: None,
        })
        .expect_err("invalid request");

        for field in ["tourId", "date", "participants", "contactInfo.name"] {
            assert!(errors.contains(field), "missing {field}");
        }
    }

    #[rstest]
    fn negative_participants_reach_the_capacity_rule_as_zero() {
        let request = CreateBooking::try_from(BookingRequest {
            tour_id: TourId::random().to_string(),
            date: "2026-09-01".into(),
            participants: Some(-3),
            contact_info: Some(ContactInfoPayload {
                name: "Alice".into(),
                email: "alice@example.com".into(),
                phone: "555".into(),
            }),
        })
        .expect("valid shape");

        assert_eq!(request.participants, 0);
    }

    #[actix_web::test]
    async fn create_returns_the_priced_booking() {
        let alice = identity(Role::User);
        let owner = alice.user_id;
        let mut command = MockBookingCommand::new();
        command
            .expect_create()
            .withf(|_, request| request.participants == 2)
            .times(1)
            .returning(move |_, request| {
                Ok(Booking {
                    id: BookingId::random(),
                    user_id: owner,
                    tour_id: request.tour_id,
                    date: request.date,
                    participants: request.participants,
                    total_price: 200,
                    status: BookingStatus::Pending,
                    contact: request.contact,
                    created_at: Utc::now(),
                })
            });
        let mut ports = mock_ports();
        ports.authenticator = Arc::new(authenticator_for(alice));
        ports.bookings = Arc::new(command);
        let app = actix_test::init_service(test_app(ports)).await;
        let seeded = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri(SEED_SESSION_PATH).to_request(),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/bookings")
                .cookie(session_cookie(&seeded))
                .set_json(json!({
                    "tourId": TourId::random().to_string(),
                    "date": "2026-09-01",
                    "participants": 2,
                    "contactInfo": contact(),
                    "totalPrice": 1
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["totalPrice"], 200);
        assert_eq!(body["status"], "pending");
        assert_eq!(
            body["date"],
            NaiveDate::from_ymd_opt(2026, 9, 1)
                .expect("date")
                .to_string()
        );
    }

    #[actix_web::test]
    async fn rule_violations_carry_their_code() {
        let mut command = MockBookingCommand::new();
        command.expect_cancel().returning(|_, _| {
            Err(BookingRuleViolation::CutoffViolation {
                days_until_start: 3,
            }
            .into())
        });
        let mut ports = mock_ports();
        ports.authenticator = Arc::new(authenticator_for(identity(Role::User)));
        ports.bookings = Arc::new(command);
        let app = actix_test::init_service(test_app(ports)).await;
        let seeded = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri(SEED_SESSION_PATH).to_request(),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri(&format!("/api/bookings/{}/cancel", BookingId::random()))
                .cookie(session_cookie(&seeded))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "cutoff_violation");
        assert_eq!(body["details"]["daysUntilStart"], 3);
    }

    #[actix_web::test]
    async fn listing_requires_a_session() {
        let app = actix_test::init_service(test_app(mock_ports())).await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/api/bookings").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
