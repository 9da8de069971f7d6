// src/auth/guard.rs
//
// Per-request session context: resolved once from the session cookie and
// passed explicitly into anything that needs to know who (if anyone) is
// signed in. Route guards redirect to the right login page when nobody is.

use astra::{Request, Response};

use crate::auth::sessions;
use crate::db::Database;
use crate::errors::ServerError;
use crate::responses::redirect;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub id: i64,
    pub email: String,
}

/// "Current authenticated identity or none" for one request.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub admin: Option<CurrentAdmin>,
    token: Option<String>,
}

impl SessionContext {
    /// Look up the session cookie against the session store.
    /// No cookie, an expired session, or a revoked one all resolve to
    /// an anonymous context, never an error.
    pub fn resolve(db: &Database, req: &Request, now: i64) -> Result<Self, ServerError> {
        let Some(token) = session_cookie(req) else {
            return Ok(Self::default());
        };
        let admin = db.with_conn(|conn| sessions::load_admin_from_session(conn, &token, now))?;
        Ok(Self {
            admin: admin.map(|(id, email)| CurrentAdmin { id, email }),
            token: Some(token),
        })
    }

    pub fn is_signed_in(&self) -> bool {
        self.admin.is_some()
    }

    /// Raw token from the cookie, if one was presented (used by sign-out).
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Gate an admin view: either the signed-in operator, or the redirect the
/// handler should return as-is.
pub fn require_admin<'a>(
    ctx: &'a SessionContext,
    login_path: &str,
) -> Result<&'a CurrentAdmin, Response> {
    match &ctx.admin {
        Some(admin) => Ok(admin),
        None => Err(redirect(login_path)),
    }
}

fn session_cookie(req: &Request) -> Option<String> {
    let header = req.headers().get("Cookie")?.to_str().ok()?;
    for pair in header.split(';') {
        let value = pair
            .trim()
            .strip_prefix(SESSION_COOKIE)
            .and_then(|rest| rest.strip_prefix('='));
        if let Some(value) = value {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}
