// src/app.rs
use std::sync::Arc;

use chrono::Utc;

use crate::auth::password;
use crate::config::AppConfig;
use crate::dashboard::{feed::SNAPSHOT_TIMEOUT, LeadFeed, StatusUpdater};
use crate::db::connection::{init_db, Database};
use crate::db::admins;
use crate::errors::ServerError;
use crate::mailer::BrevoMailer;
use crate::store::{DocumentStore, SqliteStore};

/// Everything a request handler needs, wired once at boot and shared by all
/// worker threads. The feed and updater are the dashboard's two halves; the
/// store is the only writer of lead state.
pub struct App {
    pub db: Database,
    pub store: Arc<dyn DocumentStore>,
    pub feed: LeadFeed,
    pub updater: StatusUpdater,
    pub mailer: Option<BrevoMailer>,
}

impl App {
    pub fn build(config: &AppConfig) -> Result<Self, ServerError> {
        let db = Database::new(config.db_path.clone());
        init_db(&db, "sql/schema.sql")?;

        // Seed the operator account (no-op when it already exists).
        let now = Utc::now().timestamp();
        let email = config.admin_email.trim().to_lowercase();
        let salt = password::generate_salt();
        let hash = password::hash_password(&config.admin_password, &salt);
        db.with_conn(|conn| admins::seed_admin(conn, &email, &hash, &salt, now))?;

        let store: Arc<dyn DocumentStore> = Arc::new(
            SqliteStore::open(&config.db_path)
                .map_err(|e| ServerError::DbError(format!("open store failed: {e}")))?,
        );

        let feed = LeadFeed::start(store.as_ref(), SNAPSHOT_TIMEOUT);
        let updater = StatusUpdater::new(store.clone());
        let mailer = config.mail.as_ref().map(BrevoMailer::new);

        Ok(Self {
            db,
            store,
            feed,
            updater,
            mailer,
        })
    }
}
