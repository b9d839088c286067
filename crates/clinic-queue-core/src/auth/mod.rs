//! Role-gated sessions over the users collection.
//!
//! Authentication returns an explicit [`Session`] context: populated
//! once at login, handed to whichever console the role selects, never
//! kept in shared mutable state.

use thiserror::Error;
use tracing::info;

use crate::db::{Database, DbError};
use crate::models::{NewAccount, Role, UserAccount};

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The identity exists but its stored role is missing or unknown.
    /// Fatal configuration problem; the account gets no console.
    #[error("User role not found. Please contact support.")]
    RoleNotFound,

    #[error("Email is already registered")]
    EmailTaken,
}

pub type AuthResult<T> = Result<T, AuthError>;

/// An authenticated identity and its role, resolved once at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub account_id: String,
    pub email: String,
    pub role: Role,
}

/// Create the identity and its role record. The caller logs in
/// afterwards; registration does not open a session.
pub fn register_account(db: &Database, new: NewAccount) -> AuthResult<()> {
    let role = new.role;
    let account = UserAccount::from_new(new)?;

    match db.insert_account(&account) {
        Ok(()) => {
            info!("Registered {} account for {}", role, account.email);
            Ok(())
        }
        Err(DbError::Constraint(_)) => Err(AuthError::EmailTaken),
        Err(e) => Err(e.into()),
    }
}

/// Verify credentials and resolve the stored role into a session.
pub fn authenticate(db: &Database, email: &str, password: &str) -> AuthResult<Session> {
    let account = db
        .get_account_by_email(email)?
        .ok_or(AuthError::InvalidCredentials)?;

    if !UserAccount::verify_password(password, &account.password_hash)? {
        return Err(AuthError::InvalidCredentials);
    }

    let role = Role::parse(&account.role).ok_or(AuthError::RoleNotFound)?;

    info!("Authenticated {} as {}", account.email, role);
    Ok(Session {
        account_id: account.id,
        email: account.email,
        role,
    })
}
