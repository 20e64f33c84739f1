//! Account model: names, emails, roles and the authenticated identity.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::UserId;

/// Maximum length of an account display name.
pub const USER_NAME_MAX: usize = 50;

/// Validation errors for account fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The name is blank once trimmed.
    #[error("Please provide a name")]
    EmptyName,
    /// The name exceeds [`USER_NAME_MAX`] characters.
    #[error("Name cannot be more than {max} characters")]
    NameTooLong { max: usize },
    /// The email does not look like `local@domain.tld`.
    #[error("Please provide a valid email")]
    InvalidEmail,
}

/// Trimmed, non-empty account display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a name.
    ///
    /// # Errors
    /// Returns [`UserValidationError`] when the name is blank or too long.
    pub fn new(raw: &str) -> Result<Self, UserValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: USER_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        // Static pattern; failure means the source was edited incorrectly.
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap_or_else(|error| {
            panic!("email regex failed to compile: {error}");
        })
    })
}

/// Normalised (trimmed, lower-cased) email address.
///
/// # Examples
/// ```
/// use tour_booking::domain::Email;
///
/// let email = Email::parse("  Alice@Example.COM ").expect("valid email");
/// assert_eq!(email.as_str(), "alice@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Normalise and validate an email address.
    ///
    /// # Errors
    /// Returns [`UserValidationError::InvalidEmail`] for malformed input.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        let normalised = raw.trim().to_lowercase();
        if email_regex().is_match(&normalised) {
            Ok(Self(normalised))
        } else {
            Err(UserValidationError::InvalidEmail)
        }
    }

    /// Borrow the normalised address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    /// Regular customer account.
    #[default]
    User,
    /// Administrator allowed to manage tours and bookings.
    Admin,
}

impl Role {
    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Opaque password hash as produced by a [`crate::domain::ports::PasswordHasher`].
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Registered account as held by the user store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: Email,
    role: Role,
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
}

impl User {
    /// Assemble an account from validated parts.
    #[must_use]
    pub const fn new(
        id: UserId,
        name: UserName,
        email: Email,
        role: Role,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            role,
            password_hash,
            created_at,
        }
    }

    /// Account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Login email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Account role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Stored password hash.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Return a copy carrying a different role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Identity snapshot bound into a session.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.id,
            name: self.name.as_str().to_owned(),
            email: self.email.as_str().to_owned(),
            role: self.role,
        }
    }
}

/// Authenticated caller as resolved from a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Account identifier.
    pub user_id: UserId,
    /// Display name at login time.
    pub name: String,
    /// Email at login time.
    pub email: String,
    /// Role at login time.
    pub role: Role,
}

impl Identity {
    /// Whether the caller holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether the caller may act on a resource owned by `owner`.
    #[must_use]
    pub fn can_act_for(&self, owner: UserId) -> bool {
        self.user_id == owner || self.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", UserValidationError::EmptyName)]
    #[case("   ", UserValidationError::EmptyName)]
    fn blank_names_are_rejected(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserName::new(raw), Err(expected));
    }

    #[rstest]
    fn long_names_are_rejected() {
        let raw = "a".repeat(USER_NAME_MAX + 1);
        assert_eq!(
            UserName::new(&raw),
            Err(UserValidationError::NameTooLong {
                max: USER_NAME_MAX
            })
        );
    }

    #[rstest]
    fn names_are_trimmed() {
        let name = UserName::new("  Alice ").expect("valid name");
        assert_eq!(name.as_str(), "Alice");
    }

    #[rstest]
    #[case("alice")]
    #[case("alice@")]
    #[case("@example.com")]
    #[case("alice@example")]
    #[case("al ice@example.com")]
    fn malformed_emails_are_rejected(#[case] raw: &str) {
        assert_eq!(Email::parse(raw), Err(UserValidationError::InvalidEmail));
    }

    #[rstest]
    fn emails_are_normalised() {
        let email = Email::parse(" Bob@Example.ORG").expect("valid email");
        assert_eq!(email.as_str(), "bob@example.org");
    }

    #[rstest]
    #[case("user", Role::User)]
    #[case("admin", Role::Admin)]
    fn roles_parse(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>(), Ok(expected));
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    fn unknown_roles_fail() {
        assert!("root".parse::<Role>().is_err());
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$2b$04$secret");
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }

    #[rstest]
    fn identity_ownership_rules() {
        let owner = UserId::random();
        let user = Identity {
            user_id: owner,
            name: "Alice".into(),
            email: "alice@example.com".into(),
            role: Role::User,
        };
        let admin = Identity {
            user_id: UserId::random(),
            role: Role::Admin,
            ..user.clone()
        };
        let stranger = Identity {
            user_id: UserId::random(),
            ..user.clone()
        };

        assert!(user.can_act_for(owner));
        assert!(admin.can_act_for(owner));
        assert!(!stranger.can_act_for(owner));
    }
}
