//! Account and session handlers.
//!
//! ```text
//! POST /api/auth/register {"name":"Alice","email":"alice@example.com","password":"secret1"}
//! POST /api/auth/login {"email":"alice@example.com","password":"secret1"}
//! GET /api/auth/me
//! POST /api/auth/logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    AccountResponse, CurrentUserResponse, ErrorSchema, MessageResponse,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Sign-up body. Missing fields are reported as field errors.
#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

/// Login body.
#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid fields or email already registered",
            body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(&name, &email, &password)?;
    let signed_in = state.authenticator.register(registration).await?;
    session.persist_token(&signed_in.token)?;
    Ok(HttpResponse::Created().json(AccountResponse::from(&signed_in.identity)))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AccountResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&email, &password)?;
    let signed_in = state.authenticator.login(credentials).await?;
    session.persist_token(&signed_in.token)?;
    Ok(HttpResponse::Ok().json(AccountResponse::from(&signed_in.identity)))
}

/// The signed-in caller.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = CurrentUserResponse),
        (status = 401, description = "No session or session expired", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CurrentUserResponse>> {
    let identity = state.identify(&session).await?;
    Ok(web::Json(CurrentUserResponse::from(&identity)))
}

/// Revoke the session and clear the cookie. Succeeds without a session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MessageResponse>> {
    match session.token()? {
        Some(token) => state.authenticator.logout(&token).await?,
        None => debug!("logout without a session"),
    }
    session.purge();
    Ok(web::Json(MessageResponse::new("Logged out successfully")))
}
