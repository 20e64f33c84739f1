//! Admin authorisation gate.

use super::{AuthError, Identity};

/// Allow the call only when `identity` holds the admin role.
///
/// # Errors
/// Returns [`AuthError::Forbidden`] for non-admin callers.
///
/// # Examples
/// ```
/// use tour_booking::domain::{AuthError, Identity, Role, UserId, require_admin};
///
/// let caller = Identity {
///     user_id: UserId::random(),
///     name: "Alice".into(),
///     email: "alice@example.com".into(),
///     role: Role::User,
/// };
/// assert_eq!(require_admin(&caller), Err(AuthError::Forbidden));
/// ```
pub fn require_admin(identity: &Identity) -> Result<(), AuthError> {
    if identity.is_admin() {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::{Role, UserId};

    #[rstest]
    #[case(Role::Admin, Ok(()))]
    #[case(Role::User, Err(AuthError::Forbidden))]
    fn gate_follows_role(#[case] role: Role, #[case] expected: Result<(), AuthError>) {
        let identity = Identity {
            user_id: UserId::random(),
            name: "Casey".into(),
            email: "casey@example.com".into(),
            role,
        };
        assert_eq!(require_admin(&identity), expected);
    }
}
