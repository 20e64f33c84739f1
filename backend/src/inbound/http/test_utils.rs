//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, web};

use crate::domain::ports::{
    MockAuthenticator, MockBookingCommand, MockBookingQuery, MockTourCatalogue, MockTourCommand,
    MockUsersQuery,
};
use crate::domain::{Identity, Role, SessionToken, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::validation::{json_config, query_config};
use crate::inbound::http::{ApiResult, configure_api};

/// Route that stores a fixed token in the session cookie.
pub const SEED_SESSION_PATH: &str = "/test/session";

async fn seed_session(session: SessionContext) -> ApiResult<HttpResponse> {
    session.persist_token(&SessionToken::from_client("test-token"))?;
    Ok(HttpResponse::Ok().finish())
}

/// App exposing the `/api` routes over `ports`, plus [`SEED_SESSION_PATH`].
pub fn test_app(
    ports: HttpStatePorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(ports)))
        .app_data(json_config())
        .app_data(query_config())
        .wrap(test_session_middleware())
        .route(SEED_SESSION_PATH, web::post().to(seed_session))
        .service(web::scope("/api").configure(configure_api))
}

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Ports bundle where every port is a mock with no expectations.
///
/// Tests replace the ports they exercise; a call to any other port panics.
pub fn mock_ports() -> HttpStatePorts {
    HttpStatePorts {
        authenticator: Arc::new(MockAuthenticator::new()),
        tours: Arc::new(MockTourCatalogue::new()),
        tour_admin: Arc::new(MockTourCommand::new()),
        bookings: Arc::new(MockBookingCommand::new()),
        booking_query: Arc::new(MockBookingQuery::new()),
        users: Arc::new(MockUsersQuery::new()),
    }
}

/// An authenticator that resolves every token to `identity`.
pub fn authenticator_for(identity: Identity) -> MockAuthenticator {
    let mut authenticator = MockAuthenticator::new();
    authenticator
        .expect_resolve()
        .returning(move |_| Ok(identity.clone()));
    authenticator
}

/// Caller identity with the given role.
pub fn identity(role: Role) -> Identity {
    Identity {
        user_id: UserId::random(),
        name: "Alice".into(),
        email: "alice@example.com".into(),
        role,
    }
}
