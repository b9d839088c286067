//! Staff account models.

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which console an authenticated identity receives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Admin,
    Doctor,
}

impl Role {
    /// Canonical storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Doctor => "Doctor",
        }
    }

    /// Parse the stored role text. `None` for anything the system does
    /// not know, surfaced to the caller as a configuration error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(Role::Admin),
            "Doctor" => Some(Role::Doctor),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration input. Temporarily holds the plaintext password for
/// hashing; never stored in this form.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// A staff account as stored: password hash only, role kept as the raw
/// side-record text and parsed at login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAccount {
    /// Generated identity (UUID)
    pub id: String,
    pub email: String,
    pub password_hash: String,
    /// Role text as written to the store
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Hash a plaintext password.
    pub fn hash_password(password: &str) -> Result<String, BcryptError> {
        hash(password, DEFAULT_COST)
    }

    /// Verify a plaintext password against a stored hash.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
        verify(password, hash)
    }

    /// Build a storable account from registration input, hashing the
    /// password and generating the identity.
    pub fn from_new(new: NewAccount) -> Result<Self, BcryptError> {
        let password_hash = Self::hash_password(&new.password)?;
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: new.email,
            password_hash,
            role: new.role.as_str().to_string(),
            created_at: Utc::now(),
        })
    }
}
