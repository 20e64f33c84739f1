//! Startup promotion of the configured administrator account.

use mockable::Clock;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{PasswordHashError, PasswordHasher, UserRepository, UserRepositoryError};
use crate::domain::{Email, FieldErrors, Registration, Role, User, UserId, UserValidationError};

const ADMIN_DISPLAY_NAME: &str = "Administrator";

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("admin email is invalid: {0}")]
    Email(#[from] UserValidationError),
    #[error("admin credentials are invalid: {0}")]
    Credentials(#[from] FieldErrors),
    #[error("user store error during admin bootstrap: {0}")]
    Store(#[from] UserRepositoryError),
    #[error("could not hash admin password: {0}")]
    Hash(#[from] PasswordHashError),
}

/// What happened to the configured admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminBootstrap {
    AlreadyAdmin,
    Promoted,
    Created,
    /// No account exists and no password was configured to create one.
    Skipped,
}

/// Ensure `email` names an administrator.
///
/// An existing account is promoted. A missing one is created only when a
/// password is supplied.
///
/// # Errors
/// Returns [`BootstrapError`] for malformed credentials or store failures.
pub async fn bootstrap_admin<U>(
    users: &U,
    hasher: &dyn PasswordHasher,
    clock: &(dyn Clock + Send + Sync),
    email: &str,
    password: Option<&str>,
) -> Result<AdminBootstrap, BootstrapError>
where
    U: UserRepository + ?Sized,
{
    let parsed = Email::parse(email)?;
    if let Some(user) = users.find_by_email(&parsed).await? {
        if user.role() == Role::Admin {
            return Ok(AdminBootstrap::AlreadyAdmin);
        }
        users.set_role(user.id(), Role::Admin).await?;
        info!(user_id = %user.id(), "existing account promoted to admin");
        return Ok(AdminBootstrap::Promoted);
    }

    let Some(password) = password else {
        warn!("admin email has no account and no admin password is set; skipping");
        return Ok(AdminBootstrap::Skipped);
    };
    let registration = Registration::try_from_parts(ADMIN_DISPLAY_NAME, email, password)?;
    let hash = hasher.hash(registration.password())?;
    let admin = User::new(
        UserId::random(),
        registration.name().clone(),
        registration.email().clone(),
        Role::Admin,
        hash,
        clock.utc(),
    );
    users.insert(&admin).await?;
    info!(user_id = %admin.id(), "admin account created");
    Ok(AdminBootstrap::Created)
}
