//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    Authenticator, BookingCommand, BookingQuery, TourCatalogue, TourCommand, UsersQuery,
};
use crate::domain::{Error, Identity};
use crate::inbound::http::session::SessionContext;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub authenticator: Arc<dyn Authenticator>,
    pub tours: Arc<dyn TourCatalogue>,
    pub tour_admin: Arc<dyn TourCommand>,
    pub bookings: Arc<dyn BookingCommand>,
    pub booking_query: Arc<dyn BookingQuery>,
    pub users: Arc<dyn UsersQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub authenticator: Arc<dyn Authenticator>,
    pub tours: Arc<dyn TourCatalogue>,
    pub tour_admin: Arc<dyn TourCommand>,
    pub bookings: Arc<dyn BookingCommand>,
    pub booking_query: Arc<dyn BookingQuery>,
    pub users: Arc<dyn UsersQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            authenticator,
            tours,
            tour_admin,
            bookings,
            booking_query,
            users,
        } = ports;
        Self {
            authenticator,
            tours,
            tour_admin,
            bookings,
            booking_query,
            users,
        }
    }

    /// Resolve the caller behind the session cookie, or fail with 401.
    pub async fn identify(&self, session: &SessionContext) -> Result<Identity, Error> {
        let token = session.require_token()?;
        self.authenticator.resolve(&token).await
    }
}
