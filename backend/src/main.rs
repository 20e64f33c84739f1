//! Server entry-point: loads settings, prepares stores and serves the API.

use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use tour_booking::inbound::http::health::HealthState;
use tour_booking::inbound::http::session_config::{BuildMode, session_settings_from_env};
use tour_booking::server::{AppSettings, ServerConfig, build_http_state, create_server};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    let result = if json {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).compact().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = AppSettings::load_from_iter(std::env::args_os())?;
    let bind_addr = settings.bind_addr()?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::current())?;
    let http_state = build_http_state(&settings, Arc::new(DefaultClock)).await?;
    let config = ServerConfig::new(session, bind_addr).with_idle_timeout(settings.idle_timeout()?);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), web::Data::new(http_state), config)?;
    info!(%bind_addr, "listening");
    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}
