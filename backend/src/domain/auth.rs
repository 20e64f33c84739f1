//! Authentication primitives: login credentials, registrations and the
//! authentication failure taxonomy.
//!
//! Inbound adapters hand raw strings to these constructors before talking to
//! the [`crate::domain::ports::Authenticator`] port.

use std::fmt;

use zeroize::Zeroizing;

use super::{Email, Error, FieldErrors, UserName, UserValidationError};

/// Minimum accepted length of a new password.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Authentication and authorisation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Both cases share one shape.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// No session, or the session expired or was revoked.
    #[error("Not authorized, please log in")]
    NotAuthenticated,
    /// Authenticated but lacking the admin role.
    #[error("Not authorized as admin")]
    Forbidden,
}

impl From<AuthError> for Error {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::InvalidCredentials | AuthError::NotAuthenticated => {
                Self::unauthorized(value.to_string())
            }
            AuthError::Forbidden => Self::forbidden(value.to_string()),
        }
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and lower-cased; it is not checked for shape so a
///   malformed address fails like any other unknown account.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use tour_booking::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Alice@Example.com", "secret1")
///     .expect("valid credentials");
/// assert_eq!(creds.email(), "alice@example.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    ///
    /// # Errors
    /// Returns [`FieldErrors`] when the email or password is blank.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, FieldErrors> {
        let normalised = email.trim().to_lowercase();
        let mut errors = FieldErrors::default();
        if normalised.is_empty() {
            errors.push("email", "empty", "Please provide an email");
        }
        if password.is_empty() {
            errors.push("password", "empty", "Please provide a password");
        }
        errors.finish(Self {
            email: normalised,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for the account lookup.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated sign-up request.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    name: UserName,
    email: Email,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate every registration field, reporting all failures together.
    ///
    /// # Errors
    /// Returns [`FieldErrors`] listing each invalid field.
    ///
    /// # Examples
    /// ```
    /// use tour_booking::domain::Registration;
    ///
    /// let errors = Registration::try_from_parts("", "nope", "123").unwrap_err();
    /// assert_eq!(errors.len(), 3);
    /// ```
    pub fn try_from_parts(name: &str, email: &str, password: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = UserName::new(name)
            .map_err(|err| errors.push("name", name_code(&err), err.to_string()))
            .ok();
        let email = Email::parse(email)
            .map_err(|err| errors.push("email", "invalid", err.to_string()))
            .ok();
        if password.chars().count() < PASSWORD_MIN_LEN {
            errors.push(
                "password",
                "too_short",
                format!("Password must be at least {PASSWORD_MIN_LEN} characters"),
            );
        }

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(Self {
                name,
                email,
                password: Zeroizing::new(password.to_owned()),
            }),
            _ => Err(errors),
        }
    }

    /// Requested display name.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Requested login email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password to hash.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

const fn name_code(error: &UserValidationError) -> &'static str {
    match error {
        UserValidationError::EmptyName => "empty",
        UserValidationError::NameTooLong { .. } => "too_long",
        UserValidationError::InvalidEmail => "invalid",
    }
}
