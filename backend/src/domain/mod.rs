//! Domain primitives, aggregates and services.
//!
//! Purpose: hold the booking rules, the catalogue query and the session
//! model independently of HTTP and storage. Adapters reach persistence only
//! through [`ports`].
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure envelope.
//! - [`Tour`], [`Booking`], [`User`]: validated aggregates.
//! - [`TourQuery`]: catalogue filter and sort.
//! - Services implementing the driving ports: [`AuthService`],
//!   [`TourCatalogueService`], [`BookingService`], [`UserDirectoryService`].

pub mod auth;
pub mod auth_service;
pub mod authorization;
pub mod booking;
pub mod booking_service;
pub mod error;
pub mod ids;
pub mod ports;
pub mod session;
pub mod tour;
pub mod tour_query;
pub mod tour_service;
pub mod trace_id;
pub mod user;
pub mod user_directory;
pub mod validation;

pub use self::auth::{AuthError, LoginCredentials, PASSWORD_MIN_LEN, Registration};
pub use self::auth_service::AuthService;
pub use self::authorization::require_admin;
pub use self::booking::{
    Booking, BookingRuleViolation, BookingStatus, CANCELLATION_CUTOFF_DAYS, ContactInfo,
    MAX_TOTAL_PRICE,
};
pub use self::booking_service::BookingService;
pub use self::error::{Error, ErrorCode};
pub use self::ids::{BookingId, TourId, UserId};
pub use self::session::{
    DEFAULT_IDLE_TIMEOUT_HOURS, SessionFingerprint, SessionRecord, SessionToken,
};
pub use self::tour::{
    Category, Difficulty, RATING_MAX, StoredTour, TOUR_NAME_MAX, Tour, TourDraft, TourPatch,
    TourSummary,
};
pub use self::tour_query::{DurationBand, PriceBand, TourQuery, TourSort};
pub use self::tour_service::TourCatalogueService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Email, Identity, PasswordHash, Role, USER_NAME_MAX, UnknownRole, User, UserName,
    UserValidationError,
};
pub use self::user_directory::UserDirectoryService;
pub use self::validation::{FieldError, FieldErrors};
