// src/config.rs
use std::env;

/// Runtime configuration, read once at boot.
///
/// Required: ADMIN_EMAIL and ADMIN_PASSWORD (the seeded dashboard operator).
/// Everything else has a sensible default or is optional.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the server binds to, e.g. "127.0.0.1:3000".
    pub bind_addr: String,
    /// Path to the SQLite database file.
    pub db_path: String,
    /// Seeded operator account.
    pub admin_email: String,
    pub admin_password: String,
    /// Optional new-lead notification mail (all three or nothing).
    pub mail: Option<MailConfig>,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub brevo_api_key: String,
    pub sender_email: String,
    /// Where new-lead notifications are delivered.
    pub notify_email: String,
}

impl AppConfig {
    /// Read configuration from the environment.
    /// Errors list every missing required variable at once so a bad deploy
    /// can be fixed in one pass.
    pub fn from_env() -> Result<Self, String> {
        let mut missing = Vec::new();

        let admin_email = env::var("ADMIN_EMAIL").unwrap_or_default();
        if admin_email.trim().is_empty() {
            missing.push("ADMIN_EMAIL");
        }
        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_default();
        if admin_password.trim().is_empty() {
            missing.push("ADMIN_PASSWORD");
        }

        if !missing.is_empty() {
            return Err(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            ));
        }

        let bind_addr =
            env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
        let db_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "leadsite.sqlite3".to_string());

        // Mail is opt-in: silently disabled unless fully configured.
        let mail = match (
            env::var("BREVO_API_KEY"),
            env::var("MAIL_SENDER"),
            env::var("MAIL_NOTIFY"),
        ) {
            (Ok(key), Ok(sender), Ok(notify)) => Some(MailConfig {
                brevo_api_key: key,
                sender_email: sender,
                notify_email: notify,
            }),
            _ => None,
        };

        Ok(Self {
            bind_addr,
            db_path,
            admin_email,
            admin_password,
            mail,
        })
    }
}
