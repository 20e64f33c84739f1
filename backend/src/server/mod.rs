//! Server construction and middleware wiring.

mod bootstrap;
mod config;
mod settings;
mod state_builders;

pub use bootstrap::{AdminBootstrap, BootstrapError, bootstrap_admin};
pub use config::ServerConfig;
pub use settings::{AppSettings, ConfigError};
pub use state_builders::{
    ServiceOptions, StartupError, build_http_state, http_state_from_repositories,
};

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use chrono::TimeDelta;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::doc::ApiDoc;
use crate::inbound::http::configure_api;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_config, query_config};
use crate::middleware::Trace;

/// Everything [`build_app`] needs; cloned into every worker.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
    pub idle_timeout: TimeDelta,
}

fn session_middleware(deps: &AppDependencies) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), deps.key.clone())
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(deps.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(deps.same_site)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(CookieDuration::seconds(deps.idle_timeout.num_seconds())),
        )
        .build()
}

/// Assemble the application: `/api` routes behind the session cookie,
/// health probes and Swagger UI at `/docs`.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = session_middleware(&deps);
    let api = web::scope("/api").wrap(session).configure(configure_api);

    App::new()
        .app_data(deps.health_state)
        .app_data(deps.http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live)
        .service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Bind the listener and start serving.
///
/// Readiness flips once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        idle_timeout,
    } = config;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        key,
        cookie_secure,
        same_site,
        idle_timeout,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
