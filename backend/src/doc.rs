//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! request and response schemas, and the session cookie security scheme.
//! Swagger UI serves it at `/docs`; `cargo run --bin openapi-dump` prints it.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::admin::StatusRequest;
use crate::inbound::http::auth::{LoginRequest, RegisterRequest};
use crate::inbound::http::bookings::BookingRequest;
use crate::inbound::http::schemas::{
    AccountResponse, AdminBookingViewResponse, AdminUserResponse, BookingOwnerResponse,
    BookingResponse, BookingViewResponse, ContactInfoPayload, CurrentUserResponse,
    ErrorCodeSchema, ErrorSchema, MessageResponse, TourResponse, TourSummaryResponse,
};
use crate::inbound::http::tours::{TourPatchRequest, TourRequest};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /api/auth/register and /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Tour booking API",
        description = "Tour catalogue, bookings and administration behind a session cookie."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::me,
        crate::inbound::http::auth::logout,
        crate::inbound::http::tours::list_tours,
        crate::inbound::http::tours::get_tour,
        crate::inbound::http::tours::create_tour,
        crate::inbound::http::tours::update_tour,
        crate::inbound::http::tours::delete_tour,
        crate::inbound::http::bookings::list_bookings,
        crate::inbound::http::bookings::get_booking,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::cancel_booking,
        crate::inbound::http::admin::list_users,
        crate::inbound::http::admin::list_all_bookings,
        crate::inbound::http::admin::set_booking_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        MessageResponse,
        RegisterRequest,
        LoginRequest,
        AccountResponse,
        CurrentUserResponse,
        TourRequest,
        TourPatchRequest,
        TourResponse,
        TourSummaryResponse,
        BookingRequest,
        ContactInfoPayload,
        BookingResponse,
        BookingViewResponse,
        BookingOwnerResponse,
        AdminBookingViewResponse,
        AdminUserResponse,
        StatusRequest,
    )),
    tags(
        (name = "auth", description = "Registration and sessions"),
        (name = "tours", description = "Tour catalogue"),
        (name = "bookings", description = "Reservations of the signed-in user"),
        (name = "admin", description = "Administrator operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        for field in ["code", "message", "traceId", "details"] {
            assert_object_schema_has_field(error_schema, field);
        }
    }

    #[test]
    fn tour_schema_uses_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let tour = schemas.get("TourResponse").expect("TourResponse schema");

        assert_object_schema_has_field(tour, "maxGroupSize");
        assert_object_schema_has_field(tour, "startDates");
    }

    #[test]
    fn every_api_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/me",
            "/api/auth/logout",
            "/api/tours",
            "/api/tours/{id}",
            "/api/bookings",
            "/api/bookings/{id}",
            "/api/bookings/{id}/cancel",
            "/api/admin/users",
            "/api/admin/bookings",
            "/api/admin/bookings/{id}/status",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
