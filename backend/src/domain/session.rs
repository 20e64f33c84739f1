//! Server-side session records.
//!
//! Clients only ever hold an opaque random [`SessionToken`]. The store keys
//! records by the token's SHA-256 [`SessionFingerprint`], so a leaked table
//! cannot be replayed as cookies.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::Identity;

const TOKEN_BYTES: usize = 32;

/// Default inactivity window after which a session expires.
pub const DEFAULT_IDLE_TIMEOUT_HOURS: i64 = 24;

/// Opaque bearer token handed to the client.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Draw a fresh token from the operating system RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0_u8; TOKEN_BYTES]);
        rand::rngs::OsRng.fill_bytes(bytes.as_mut_slice());
        Self(Zeroizing::new(hex::encode(bytes.as_slice())))
    }

    /// Rehydrate a token read back from a client cookie.
    pub fn from_client(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Borrow the encoded token for the cookie.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Digest under which the store keeps the session.
    #[must_use]
    pub fn fingerprint(&self) -> SessionFingerprint {
        SessionFingerprint(hex::encode(Sha256::digest(self.0.as_bytes())))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Hex-encoded SHA-256 of a session token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionFingerprint(String);

impl SessionFingerprint {
    /// Wrap a stored fingerprint.
    pub fn new(hex_digest: impl Into<String>) -> Self {
        Self(hex_digest.into())
    }

    /// Borrow the hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stored binding between a token fingerprint and an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Lookup key.
    pub fingerprint: SessionFingerprint,
    /// Identity snapshot taken at login.
    pub identity: Identity,
    /// When the session was opened.
    pub created_at: DateTime<Utc>,
    /// Last request that presented the token.
    pub last_seen_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Whether the session has been idle longer than `idle_timeout` at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, idle_timeout: Duration) -> bool {
        now.signed_duration_since(self.last_seen_at) > idle_timeout
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;
    use crate::domain::{Role, UserId};

    fn record(last_seen_at: DateTime<Utc>) -> SessionRecord {
        SessionRecord {
            fingerprint: SessionToken::generate().fingerprint(),
            identity: Identity {
                user_id: UserId::random(),
                name: "Alice".into(),
                email: "alice@example.com".into(),
                role: Role::User,
            },
            created_at: last_seen_at,
            last_seen_at,
        }
    }

    #[rstest]
    fn tokens_are_unique_hex() {
        let first = SessionToken::generate();
        let second = SessionToken::generate();
        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), TOKEN_BYTES * 2);
        assert!(first.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[rstest]
    fn fingerprint_is_stable_and_differs_from_token() {
        let token = SessionToken::from_client("abc");
        assert_eq!(token.fingerprint(), SessionToken::from_client("abc").fingerprint());
        assert_ne!(token.fingerprint().as_str(), token.as_str());
    }

    #[rstest]
    #[case(Duration::hours(23), false)]
    #[case(Duration::hours(24), false)]
    #[case(Duration::hours(24) + Duration::seconds(1), true)]
    fn idle_expiry_is_inclusive_of_the_window(#[case] idle: Duration, #[case] expired: bool) {
        let seen = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().expect("valid");
        let session = record(seen);
        assert_eq!(
            session.is_expired(seen + idle, Duration::hours(DEFAULT_IDLE_TIMEOUT_HOURS)),
            expired
        );
    }

    #[rstest]
    fn token_debug_is_redacted() {
        assert_eq!(format!("{:?}", SessionToken::from_client("abc")), "SessionToken(..)");
    }
}
