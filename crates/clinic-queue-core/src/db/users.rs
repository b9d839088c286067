//! Users collection operations.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::UserAccount;

fn row_to_account(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserAccount> {
    let created_text: String = row.get(4)?;
    let created_at = DateTime::parse_from_rfc3339(&created_text)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?
        .with_timezone(&Utc);

    Ok(UserAccount {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        role: row.get(3)?,
        created_at,
    })
}

/// Insert a new staff account. A duplicate email surfaces as
/// [`DbError::Constraint`].
pub fn insert_account(conn: &Connection, account: &UserAccount) -> DbResult<()> {
    let result = conn.execute(
        r#"
        INSERT INTO users (id, email, password_hash, role, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            account.id,
            account.email,
            account.password_hash,
            account.role,
            account.created_at.to_rfc3339(),
        ],
    );

    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(DbError::Constraint(format!(
                "email already registered: {}",
                account.email
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// Look up an account by email.
pub fn get_account_by_email(conn: &Connection, email: &str) -> DbResult<Option<UserAccount>> {
    conn.query_row(
        "SELECT id, email, password_hash, role, created_at FROM users WHERE email = ?",
        [email],
        row_to_account,
    )
    .optional()
    .map_err(Into::into)
}

impl Database {
    /// See [`insert_account`].
    pub fn insert_account(&self, account: &UserAccount) -> DbResult<()> {
        insert_account(self.conn(), account)
    }

    /// See [`get_account_by_email`].
    pub fn get_account_by_email(&self, email: &str) -> DbResult<Option<UserAccount>> {
        get_account_by_email(self.conn(), email)
    }
}
