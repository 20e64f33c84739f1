//! HTTP inbound adapter exposing the REST endpoints under `/api`.

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tours;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api` handler. Mount inside `web::scope("/api")`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register)
        .service(auth::login)
        .service(auth::me)
        .service(auth::logout)
        .service(tours::list_tours)
        .service(tours::get_tour)
        .service(tours::create_tour)
        .service(tours::update_tour)
        .service(tours::delete_tour)
        .service(bookings::list_bookings)
        .service(bookings::get_booking)
        .service(bookings::create_booking)
        .service(bookings::cancel_booking)
        .service(admin::list_users)
        .service(admin::list_all_bookings)
        .service(admin::set_booking_status);
}
