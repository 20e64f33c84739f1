//! Shared validation helpers for inbound HTTP adapters.
//!
//! Extractor failures (malformed JSON, bad query strings) are rewritten into
//! the same `invalid_request` envelope the domain produces, so clients only
//! ever see one error shape.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::web;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, FieldErrors};

/// JSON body extractor configuration with domain-shaped errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| json_error(&err).into())
}

/// Query string extractor configuration with domain-shaped errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| query_error(&err).into())
}

fn json_error(err: &JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::ContentType => {
            Error::invalid_request("Content-Type must be application/json")
                .with_details(json!({ "code": "unsupported_media_type" }))
        }
        JsonPayloadError::Deserialize(inner) => {
            Error::invalid_request(format!("Invalid request body: {inner}"))
                .with_details(json!({ "code": "malformed_body" }))
        }
        other => Error::invalid_request(format!("Invalid request body: {other}"))
            .with_details(json!({ "code": "malformed_body" })),
    }
}

fn query_error(err: &QueryPayloadError) -> Error {
    Error::invalid_request(format!("Invalid query string: {err}"))
        .with_details(json!({ "code": "malformed_query" }))
}

/// Parse a UUID supplied in a path segment or body field.
pub(crate) fn parse_uuid(value: &str, field: &'static str) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        FieldErrors::single(field, "invalid_uuid", format!("{field} must be a valid id")).into()
    })
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, whose UTC date is used.
pub(crate) fn parse_date(value: &str, field: &'static str) -> Result<NaiveDate, FieldErrors> {
    let raw = value.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| {
            DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc).date_naive())
        })
        .map_err(|_| {
            FieldErrors::single(
                field,
                "invalid_date",
                format!("{field} must be a date in YYYY-MM-DD format"),
            )
        })
}
