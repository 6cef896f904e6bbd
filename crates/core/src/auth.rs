//! Login and registration.

use crate::models::{NewUser, Role, User};
use crate::store::Store;
use crate::{BankError, BankResult};
use chrono::Utc;
use std::sync::Arc;

/// Account authentication on top of a [`Store`].
#[derive(Clone, Debug)]
pub struct AuthService {
    store: Arc<Store>,
}

impl AuthService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Authenticates `username`/`password` for a caller expecting `expected_role`.
    ///
    /// On success the account's `lastLogin` is set to now, `loginCount` is incremented, and
    /// the updated account is returned.
    ///
    /// # Errors
    ///
    /// - `BankError::InvalidCredentials` if no account matches both fields.
    /// - `BankError::RoleMismatch` if the account exists but holds another role. The login is
    ///   not recorded.
    pub fn login(&self, username: &str, password: &str, expected_role: Role) -> BankResult<User> {
        let Some(user) = self.store.find_user_by_credentials(username, password) else {
            tracing::warn!("failed login for '{}'", username);
            return Err(BankError::InvalidCredentials);
        };

        if user.role != expected_role {
            tracing::warn!(
                "login for '{}' expected role {} but account is {}",
                username,
                expected_role,
                user.role
            );
            return Err(BankError::RoleMismatch {
                expected: expected_role,
                actual: user.role,
            });
        }

        let recorded = self.store.update(|doc| {
            let stored = doc.user_mut(&user.id)?;
            stored.last_login = Some(Utc::now());
            stored.login_count = stored.login_count.saturating_add(1);
            Some(stored.clone())
        })?;

        tracing::info!("user {} logged in as {}", user.id, expected_role);
        Ok(recorded.unwrap_or(user))
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns `BankError::UsernameExists` when the username is taken (exact comparison),
    /// plus any error from [`Store::add_user`].
    pub fn register(&self, new: NewUser) -> BankResult<User> {
        self.store.add_user(new)
    }

    pub fn has_permission(user: &User, permission: &str) -> bool {
        user.has_permission(permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_store;

    fn seeded() -> AuthService {
        let store = Arc::new(memory_store());
        store.initialise().expect("initialise should succeed");
        AuthService::new(store)
    }

    #[test]
    fn test_login_records_last_login_and_count() {
        let auth = seeded();

        let user = auth
            .login("doctor", "doctor123", Role::Doctor)
            .expect("login should succeed");

        assert_eq!(user.login_count, 68);
        let last = user.last_login.expect("last login should be set");
        assert!(Utc::now().signed_duration_since(last).num_seconds() < 5);
    }

    #[test]
    fn test_login_wrong_password_is_invalid_credentials() {
        let auth = seeded();

        let err = auth
            .login("admin", "nope", Role::Admin)
            .expect_err("wrong password should fail");
        assert!(matches!(err, BankError::InvalidCredentials));
    }

    #[test]
    fn test_login_role_mismatch_is_distinguishable() {
        let auth = seeded();

        let err = auth
            .login("user", "user123", Role::Admin)
            .expect_err("role mismatch should fail");
        assert!(matches!(
            err,
            BankError::RoleMismatch {
                expected: Role::Admin,
                actual: Role::User
            }
        ));
    }

    #[test]
    fn test_register_then_login() {
        let auth = seeded();

        let created = auth
            .register(NewUser::new("Dr. Sun", "sun", "s3cret", Role::Doctor))
            .expect("register should succeed");
        assert!(AuthService::has_permission(&created, "manage_donors"));

        let logged_in = auth
            .login("sun", "s3cret", Role::Doctor)
            .expect("login should succeed");
        assert_eq!(logged_in.id, created.id);
        assert_eq!(logged_in.login_count, 1);
    }

    #[test]
    fn test_register_duplicate_username() {
        let auth = seeded();

        let err = auth
            .register(NewUser::new("Other", "government", "x", Role::Government))
            .expect_err("duplicate should fail");
        assert!(matches!(err, BankError::UsernameExists(_)));
    }
}
