//! Field-level validation failures shared by domain constructors.
//!
//! Constructors collect every problem they find instead of stopping at the
//! first one, so clients can fix a whole form in a single round trip.

use serde_json::{Value, json};

use super::Error;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: &'static str,
    code: &'static str,
    message: String,
}

impl FieldError {
    /// Build a field error from its parts.
    pub fn new(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    /// Name of the offending field as clients spell it.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Stable machine-readable reason.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// Human-readable reason.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    fn to_json(&self) -> Value {
        json!({
            "field": self.field,
            "code": self.code,
            "message": self.message,
        })
    }
}

/// Ordered list of field errors.
///
/// # Examples
/// ```
/// use tour_booking::domain::FieldErrors;
///
/// let mut errors = FieldErrors::default();
/// errors.push("name", "empty", "Please provide a tour name");
/// assert_eq!(errors.len(), 1);
/// assert!(errors.finish(()).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Build a list holding exactly one error.
    pub fn single(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, code, message)])
    }

    /// Record another failure.
    pub fn push(&mut self, field: &'static str, code: &'static str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, code, message));
    }

    /// Append every error from `other`.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Number of recorded failures.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no failure has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over recorded failures.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether a failure was recorded for `field`.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }

    /// Return `value` when nothing failed, otherwise the collected errors.
    ///
    /// # Errors
    /// Returns `self` when at least one failure was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        let message = match errors.0.as_slice() {
            [only] => only.message.clone(),
            _ => "Request validation failed".to_owned(),
        };
        let list: Vec<Value> = errors.0.iter().map(FieldError::to_json).collect();
        Self::invalid_request(message).with_details(json!({ "errors": list }))
    }
}
