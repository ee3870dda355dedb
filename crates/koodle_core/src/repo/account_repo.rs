//! Account directory contract and SQLite implementation.
//!
//! # Responsibility
//! - Own identity: create accounts, verify credentials, issue sessions.
//! - Keep credential storage details (salting, hashing) out of callers.
//!
//! # Invariants
//! - Emails are stored lowercased; duplicate detection is case-insensitive.
//! - Raw passwords never leave this module; only salted hashes persist.
//! - Unknown email and wrong password are indistinguishable to callers.

use crate::db::DbError;
use crate::model::session::Session;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use sha2::{Digest, Sha256};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

const MIN_PASSWORD_CHARS: usize = 8;

pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and account-management error taxonomy.
///
/// Surfaced to the user, never retried by core.
#[derive(Debug)]
pub enum AuthError {
    /// An account already exists for this email.
    DuplicateAccount(String),
    /// Password is shorter than the minimum length.
    WeakPassword,
    /// Email does not look like an address.
    InvalidEmail(String),
    /// Email/password pair does not match any account.
    InvalidCredentials,
    /// Sign-up confirmation did not match the password.
    PasswordMismatch,
    /// Persistence-layer failure.
    Db(DbError),
    /// Stored account row failed to re-materialize.
    InvalidData(String),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateAccount(email) => {
                write!(f, "an account already exists for `{email}`")
            }
            Self::WeakPassword => write!(
                f,
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            ),
            Self::InvalidEmail(email) => write!(f, "`{email}` is not a valid email address"),
            Self::InvalidCredentials => write!(f, "email or password is incorrect"),
            Self::PasswordMismatch => write!(f, "passwords do not match"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted account data: {message}")
            }
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for AuthError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for AuthError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Identity provider interface consumed by sign-up/sign-in flows.
pub trait AccountDirectory {
    /// Creates an account and returns its session identity.
    fn create_account(&self, email: &str, password: &str) -> AuthResult<Session>;
    /// Verifies credentials and returns a session identity.
    fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session>;
}

/// SQLite-backed account directory.
pub struct SqliteAccountDirectory<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountDirectory<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AccountDirectory for SqliteAccountDirectory<'_> {
    fn create_account(&self, email: &str, password: &str) -> AuthResult<Session> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthError::WeakPassword);
        }

        let user_id = Uuid::new_v4();
        let salt = Uuid::new_v4().simple().to_string();
        let password_hash = hash_password(&salt, password);

        let inserted = self.conn.execute(
            "INSERT INTO accounts (user_id, email, password_hash, salt)
             VALUES (?1, ?2, ?3, ?4);",
            params![user_id.to_string(), email.as_str(), password_hash, salt],
        );

        match inserted {
            Ok(_) => Ok(Session::new(user_id, email)),
            Err(rusqlite::Error::SqliteFailure(failure, _))
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Err(AuthError::DuplicateAccount(email))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session> {
        let email = normalize_email(email).map_err(|_| AuthError::InvalidCredentials)?;

        let row = self
            .conn
            .query_row(
                "SELECT user_id, password_hash, salt
                 FROM accounts
                 WHERE email = ?1;",
                [email.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>("user_id")?,
                        row.get::<_, String>("password_hash")?,
                        row.get::<_, String>("salt")?,
                    ))
                },
            )
            .optional()?;

        let Some((user_id_text, stored_hash, salt)) = row else {
            return Err(AuthError::InvalidCredentials);
        };

        if hash_password(&salt, password) != stored_hash {
            return Err(AuthError::InvalidCredentials);
        }

        let user_id = Uuid::parse_str(&user_id_text).map_err(|_| {
            AuthError::InvalidData(format!(
                "invalid uuid value `{user_id_text}` in accounts.user_id"
            ))
        })?;

        Ok(Session::new(user_id, email))
    }
}

fn normalize_email(email: &str) -> AuthResult<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if !EMAIL_RE.is_match(&normalized) {
        return Err(AuthError::InvalidEmail(email.to_string()));
    }
    Ok(normalized)
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::{hash_password, normalize_email, AuthError};

    #[test]
    fn normalize_email_lowercases_and_trims() {
        let email = normalize_email("  User@Example.COM ").expect("email should normalize");
        assert_eq!(email, "user@example.com");
    }

    #[test]
    fn normalize_email_rejects_non_addresses() {
        for input in ["", "plain", "missing@tld", "two@@example.com", "a b@c.de"] {
            let err = normalize_email(input).expect_err("bad email must be rejected");
            assert!(matches!(err, AuthError::InvalidEmail(_)), "input: {input}");
        }
    }

    #[test]
    fn hash_depends_on_salt_and_password() {
        let baseline = hash_password("salt-a", "hunter22");
        assert_ne!(baseline, hash_password("salt-b", "hunter22"));
        assert_ne!(baseline, hash_password("salt-a", "hunter23"));
        assert_eq!(baseline, hash_password("salt-a", "hunter22"));
    }
}
