//! Password hashing primitive.
//!
//! The trait is synchronous; callers run it on a blocking thread.
use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by hashing adapters.
    pub enum PasswordHashError {
        /// Hashing or verification could not run.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a storable hash from a plaintext password.
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;

    /// A well-formed hash that matches no password, verified for unknown
    /// accounts so lookups cost the same either way.
    fn dummy_hash(&self) -> &PasswordHash;
}
