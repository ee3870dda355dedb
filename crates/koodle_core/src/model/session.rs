//! Authenticated session identity.
//!
//! # Responsibility
//! - Carry the identity issued by the account directory to every service
//!   call.
//!
//! # Invariants
//! - Sessions are explicit values passed by callers; core keeps no ambient
//!   "current user" state.

use crate::model::task::UserId;
use serde::{Deserialize, Serialize};

/// Opaque identity of an authenticated user.
///
/// Returned by sign-up/sign-in and required by every task and points
/// operation, which scope all reads and writes to `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Account ID all operations are scoped to.
    pub user_id: UserId,
    /// Email shown by presentation layers; not used for authorization.
    pub email: String,
}

impl Session {
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}
