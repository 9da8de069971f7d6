// src/auth/sessions.rs
use crate::auth::token::{generate_token_os, hash_token, SESSION_TOKEN_BYTES};
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7; // 7 days

/// Create a session row and return the raw token (only the hash is stored).
pub fn create_session(conn: &Connection, admin_id: i64, now: i64) -> Result<String, ServerError> {
    let raw_token = generate_token_os(SESSION_TOKEN_BYTES);
    let hash = hash_token(&raw_token);
    let expires_at = now + SESSION_TTL_SECS;

    conn.execute(
        r#"
        insert into sessions (admin_id, token_hash, created_at, expires_at)
        values (?, ?, ?, ?)
        "#,
        params![admin_id, hash.as_slice(), now, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(raw_token)
}

/// Resolve a raw session token to the signed-in admin, if the session is
/// live (unexpired, unrevoked).
pub fn load_admin_from_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<(i64, String)>, ServerError> {
    let hash = hash_token(raw_token);

    conn.query_row(
        r#"
        select a.id, a.email
        from sessions s
        join admins a on a.id = s.admin_id
        where s.token_hash = ?
          and s.expires_at > ?
          and s.revoked_at is null
        "#,
        params![hash.as_slice(), now],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

/// Sign-out: mark the session revoked. Revoking an unknown token is a no-op.
pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<(), ServerError> {
    let hash = hash_token(raw_token);
    conn.execute(
        "update sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
        params![now, hash.as_slice()],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(())
}
