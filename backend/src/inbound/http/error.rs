//! Rendering of [`Error`] as HTTP responses.
//!
//! The JSON body is the error envelope itself. Internal failures are logged
//! in full and replaced by a generic message; rejected requests are logged
//! at debug level with their machine-readable reason.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by every handler.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

impl ErrorCode {
    /// HTTP status carried by errors of this kind.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The envelope as sent to clients: internal errors keep only the trace id.
fn public_body(err: &Error) -> Error {
    if err.code() != ErrorCode::InternalError {
        return err.clone();
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    match err.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    }
}

fn log_failure(err: &Error) {
    let trace_id = err.trace_id().unwrap_or_default();
    match err.code() {
        ErrorCode::InternalError => error!(trace_id, message = err.message(), "request failed"),
        ErrorCode::ServiceUnavailable => {
            warn!(trace_id, message = err.message(), "store unavailable");
        }
        code => {
            let reason = err
                .details()
                .and_then(|details| details.get("code"))
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default();
            debug!(trace_id, ?code, reason, message = err.message(), "request rejected");
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.code().status()
    }

    fn error_response(&self) -> HttpResponse {
        log_failure(self);
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(public_body(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced in a handler");
        Self::internal(REDACTED_MESSAGE)
    }
}
