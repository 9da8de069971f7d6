// src/db/admins.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct AdminRow {
    pub id: i64,
    pub email: String,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
}

/// Insert the seeded operator account if it doesn't exist yet.
/// Email should already be normalized by caller (trim/lowercase).
pub fn seed_admin(
    conn: &Connection,
    email: &str,
    password_hash: &[u8],
    password_salt: &[u8],
    now: i64,
) -> Result<(), ServerError> {
    conn.execute(
        "insert or ignore into admins (email, password_hash, password_salt, created_at)
         values (?, ?, ?, ?)",
        params![email, password_hash, password_salt, now],
    )
    .map_err(|e| ServerError::DbError(format!("seed admin failed: {e}")))?;
    Ok(())
}

pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<AdminRow>, ServerError> {
    conn.query_row(
        "select id, email, password_hash, password_salt from admins where email = ?",
        params![email],
        |r| {
            Ok(AdminRow {
                id: r.get(0)?,
                email: r.get(1)?,
                password_hash: r.get(2)?,
                password_salt: r.get(3)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select admin failed: {e}")))
}

pub fn touch_last_login(conn: &Connection, admin_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update admins set last_login_at = ? where id = ?",
        params![now, admin_id],
    )
    .map_err(|e| ServerError::DbError(format!("update last_login failed: {e}")))?;
    Ok(())
}
