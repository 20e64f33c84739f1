//! HTTP helpers shared by the integration suites.
//!
//! Every request runs through a freshly initialised [`build_app`]; the
//! stores, cookie key and clock live in the [`AppDependencies`] so state
//! survives between calls exactly as it does across server workers.

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::{Value, json};
use tour_booking::domain::TRACE_ID_HEADER;
use tour_booking::server::{AppDependencies, build_app};

pub const SESSION_COOKIE: &str = "session";
pub const PASSWORD: &str = "secret123";

/// Outcome of a single request.
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
    pub session: Option<Cookie<'static>>,
    pub trace_id: Option<String>,
}

pub async fn send(deps: &AppDependencies, request: TestRequest) -> Reply {
    let app = test::init_service(build_app(deps.clone())).await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let session = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned);
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Reply {
        status,
        body,
        session,
        trace_id,
    }
}

/// Attach the session cookie when one is held.
pub fn authed(request: TestRequest, session: Option<&Cookie<'static>>) -> TestRequest {
    match session {
        Some(cookie) => request.cookie(cookie.clone()),
        None => request,
    }
}

pub async fn register(deps: &AppDependencies, name: &str, email: &str) -> Reply {
    send(
        deps,
        TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "name": name, "email": email, "password": PASSWORD })),
    )
    .await
}

pub async fn login(deps: &AppDependencies, email: &str, password: &str) -> Reply {
    send(
        deps,
        TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": email, "password": password })),
    )
    .await
}

pub fn booking_body(tour_id: &str, date: &str, participants: i64) -> Value {
    json!({
        "tourId": tour_id,
        "date": date,
        "participants": participants,
        "contactInfo": {
            "name": "Alice",
            "email": "alice@example.com",
            "phone": "+33 1 23 45 67 89"
        }
    })
}

pub fn tour_body(name: &str, price: i64) -> Value {
    json!({
        "name": name,
        "description": format!("{name} with a local guide"),
        "price": price,
        "duration": 3,
        "maxGroupSize": 12,
        "location": "Lisbon, Portugal",
        "image": "https://images.example.com/tour.jpg",
        "startDates": ["2026-09-01"]
    })
}
