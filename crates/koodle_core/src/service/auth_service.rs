//! Sign-up/sign-in use-case service.
//!
//! # Responsibility
//! - Front the account directory with the checks the presentation layer
//!   needs before touching identity storage.
//!
//! # Invariants
//! - A mismatched confirmation is rejected before the directory is called.
//! - Service APIs never bypass directory credential handling.

use crate::model::session::Session;
use crate::repo::account_repo::{AccountDirectory, AuthError, AuthResult};
use log::info;

/// Authentication facade over an account directory implementation.
pub struct AuthService<D: AccountDirectory> {
    directory: D,
}

impl<D: AccountDirectory> AuthService<D> {
    /// Creates a service using the provided directory implementation.
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Creates an account after confirming the password was re-typed
    /// correctly.
    ///
    /// # Errors
    /// - `PasswordMismatch` when `confirm_password` differs from `password`.
    /// - Directory errors (`DuplicateAccount`, `WeakPassword`,
    ///   `InvalidEmail`) unchanged.
    pub fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> AuthResult<Session> {
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let session = self.directory.create_account(email, password)?;
        info!(
            "event=sign_up module=service status=ok user_id={}",
            session.user_id
        );
        Ok(session)
    }

    /// Verifies credentials and returns the account's session identity.
    pub fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session> {
        let session = self.directory.sign_in(email, password)?;
        info!(
            "event=sign_in module=service status=ok user_id={}",
            session.user_id
        );
        Ok(session)
    }
}
