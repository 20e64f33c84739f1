//! `bcrypt`-backed implementation of the password hashing port.

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Password hasher using bcrypt with a configurable work factor.
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
    dummy: PasswordHash,
}

impl BcryptPasswordHasher {
    /// Build a hasher with the given cost.
    ///
    /// Computes the dummy hash used for unknown accounts up front, so the
    /// cost is validated here.
    ///
    /// # Errors
    /// Returns [`PasswordHashError::Hashing`] when `cost` is outside the
    /// range bcrypt accepts.
    pub fn new(cost: u32) -> Result<Self, PasswordHashError> {
        let dummy = bcrypt::hash("no account uses this password", cost)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(Self {
            cost,
            dummy: PasswordHash::new(dummy),
        })
    }

    /// Configured work factor.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        bcrypt::hash(plaintext, self.cost)
            .map(PasswordHash::new)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        bcrypt::verify(plaintext, hash.as_str())
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn dummy_hash(&self) -> &PasswordHash {
        &self.dummy
    }
}
