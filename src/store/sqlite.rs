// src/store/sqlite.rs
//
// Production DocumentStore: SQLite underneath, with the push contract
// implemented locally. After every committed write the full ordered record
// set is re-queried and delivered to every live subscriber, so consumers
// see the same wholesale-snapshot behavior a hosted document store gives.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, Weak};

use chrono::Utc;
use rusqlite::Connection;

use crate::auth::token::generate_token_os;
use crate::db::leads as db_leads;
use crate::leads::model::NewLead;
use crate::store::gateway::{
    DocumentStore, LeadPatch, OrderDirection, SnapshotEvent, StoreError, Subscription,
    SubscriptionHandle,
};

pub const LEADS_COLLECTION: &str = "leads";

// 15 random bytes -> 20 URL-safe characters.
const LEAD_ID_BYTES: usize = 15;

struct Subscriber {
    id: u64,
    direction: OrderDirection,
    tx: Sender<SnapshotEvent>,
    handle: SubscriptionHandle,
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
    next_subscriber_id: AtomicU64,
}

impl SqliteStore {
    /// Open the store over an existing database file (schema already applied).
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(store_err)?;
        conn.pragma_update(None, "busy_timeout", 5000)
            .map_err(store_err)?;
        Ok(Self::new(conn))
    }

    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            next_subscriber_id: AtomicU64::new(1),
        }
    }

    /// Re-query and fan out the current record set to every live subscriber.
    /// Cancelled or hung-up subscribers are pruned here.
    fn push_snapshots(&self) {
        let mut desc: Option<Result<Vec<_>, StoreError>> = None;
        let mut asc: Option<Result<Vec<_>, StoreError>> = None;

        let mut subscribers = match self.subscribers.lock() {
            Ok(guard) => guard,
            Err(_) => return,
        };

        subscribers.retain(|sub| {
            if sub.handle.is_cancelled() {
                return false;
            }
            let snapshot = match sub.direction {
                OrderDirection::Desc => {
                    desc.get_or_insert_with(|| self.query_snapshot(OrderDirection::Desc))
                }
                OrderDirection::Asc => {
                    asc.get_or_insert_with(|| self.query_snapshot(OrderDirection::Asc))
                }
            };
            let event = match snapshot {
                Ok(leads) => SnapshotEvent::Snapshot(leads.clone()),
                Err(e) => SnapshotEvent::Error(e.clone()),
            };
            sub.tx.send(event).is_ok()
        });
    }

    fn query_snapshot(
        &self,
        direction: OrderDirection,
    ) -> Result<Vec<crate::leads::model::Lead>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::unavailable("store connection poisoned"))?;
        db_leads::list_leads(&conn, direction).map_err(store_err)
    }
}

impl DocumentStore for SqliteStore {
    fn create(&self, collection: &str, lead: &NewLead) -> Result<String, StoreError> {
        check_collection(collection)?;

        let id = generate_token_os(LEAD_ID_BYTES);
        let now = Utc::now().timestamp();
        {
            let conn = self
                .conn
                .lock()
                .map_err(|_| StoreError::unavailable("store connection poisoned"))?;
            db_leads::insert_lead(&conn, &id, lead, now).map_err(store_err)?;
        }
        self.push_snapshots();
        Ok(id)
    }

    fn update(&self, collection: &str, id: &str, patch: &LeadPatch) -> Result<(), StoreError> {
        check_collection(collection)?;

        let Some(status) = patch.status else {
            return Ok(()); // nothing to merge
        };

        let now = Utc::now().timestamp();
        let touched = {
            let conn = self
                .conn
                .lock()
                .map_err(|_| StoreError::unavailable("store connection poisoned"))?;
            db_leads::update_lead_status(&conn, id, status, now).map_err(store_err)?
        };
        if touched == 0 {
            return Err(StoreError::other("Document not found"));
        }
        self.push_snapshots();
        Ok(())
    }

    fn subscribe(
        &self,
        collection: &str,
        order_by: &str,
        direction: OrderDirection,
    ) -> Subscription {
        let (tx, rx) = mpsc::channel();

        if let Err(e) = check_collection(collection) {
            let _ = tx.send(SnapshotEvent::Error(e));
            return Subscription::new(rx, SubscriptionHandle::new(|| {}));
        }
        if order_by != "created_at" {
            let _ = tx.send(SnapshotEvent::Error(StoreError::other(format!(
                "unsupported order field: {order_by}"
            ))));
            return Subscription::new(rx, SubscriptionHandle::new(|| {}));
        }

        let id = self.next_subscriber_id.fetch_add(1, Ordering::SeqCst);
        let registry: Weak<Mutex<Vec<Subscriber>>> = Arc::downgrade(&self.subscribers);
        let handle = SubscriptionHandle::new(move || {
            if let Some(registry) = registry.upgrade() {
                if let Ok(mut subs) = registry.lock() {
                    subs.retain(|s| s.id != id);
                }
            }
        });

        // Initial delivery and registration happen under the registry lock
        // so a write landing in between cannot slip past both. Lock order
        // (registry, then connection) matches push_snapshots.
        if let Ok(mut subs) = self.subscribers.lock() {
            let event = match self.query_snapshot(direction) {
                Ok(leads) => SnapshotEvent::Snapshot(leads),
                Err(e) => SnapshotEvent::Error(e),
            };
            let _ = tx.send(event);
            subs.push(Subscriber {
                id,
                direction,
                tx,
                handle: handle.clone(),
            });
        }

        Subscription::new(rx, handle)
    }
}

fn check_collection(collection: &str) -> Result<(), StoreError> {
    if collection == LEADS_COLLECTION {
        Ok(())
    } else {
        Err(StoreError::other(format!(
            "unknown collection: {collection}"
        )))
    }
}

/// Classify a SQLite failure into the gateway taxonomy.
fn store_err(e: rusqlite::Error) -> StoreError {
    use rusqlite::ErrorCode;

    match &e {
        rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
            ErrorCode::PermissionDenied
            | ErrorCode::AuthorizationForStatementDenied
            | ErrorCode::ReadOnly => StoreError::permission_denied(e.to_string()),
            ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::SystemIoFailure
            | ErrorCode::DiskFull
            | ErrorCode::CannotOpen => StoreError::unavailable(e.to_string()),
            _ => StoreError::other(e.to_string()),
        },
        _ => StoreError::other(e.to_string()),
    }
}
