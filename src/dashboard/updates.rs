// src/dashboard/updates.rs
//
// The status-update command path. An update never touches the feed's
// mirror: the store's next pushed snapshot is the only way a change becomes
// visible. Failures surface as a short-lived banner and are otherwise
// tolerated (the list keeps showing whatever the last snapshot said).

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::leads::model::LeadStatus;
use crate::store::gateway::{DocumentStore, LeadPatch};
use crate::store::sqlite::LEADS_COLLECTION;

/// How long an update-failure banner stays up.
pub const UPDATE_ERROR_TTL_SECS: i64 = 5;

pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update lead status. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The store accepted the command (the mirror catches up via push).
    Applied,
    /// An update for this id is already in flight; this one was rejected.
    Busy,
    /// The store rejected the command; a transient banner was recorded.
    Failed,
}

struct TransientError {
    message: String,
    expires_at: i64,
}

pub struct StatusUpdater {
    store: Arc<dyn DocumentStore>,
    in_flight: Mutex<HashSet<String>>,
    banner: Mutex<Option<TransientError>>,
}

impl StatusUpdater {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            in_flight: Mutex::new(HashSet::new()),
            banner: Mutex::new(None),
        }
    }

    /// Issue a single-field status update for one lead.
    /// At most one command per id may be outstanding; a concurrent second
    /// command for the same id is rejected, not queued.
    pub fn update_status(&self, id: &str, status: LeadStatus, now: i64) -> UpdateOutcome {
        {
            let mut in_flight = match self.in_flight.lock() {
                Ok(guard) => guard,
                Err(_) => return UpdateOutcome::Failed,
            };
            if !in_flight.insert(id.to_string()) {
                return UpdateOutcome::Busy;
            }
        }

        let patch = LeadPatch {
            status: Some(status),
        };
        let result = self.store.update(LEADS_COLLECTION, id, &patch);

        if let Ok(mut in_flight) = self.in_flight.lock() {
            in_flight.remove(id);
        }

        match result {
            Ok(()) => UpdateOutcome::Applied,
            Err(err) => {
                eprintln!("❌ Status update for {id} failed: {err}");
                if let Ok(mut banner) = self.banner.lock() {
                    *banner = Some(TransientError {
                        message: UPDATE_FAILED_MESSAGE.to_string(),
                        expires_at: now + UPDATE_ERROR_TTL_SECS,
                    });
                }
                UpdateOutcome::Failed
            }
        }
    }

    /// Whether a command for this id is currently outstanding (renders the
    /// control disabled).
    pub fn is_busy(&self, id: &str) -> bool {
        self.in_flight
            .lock()
            .map(|set| set.contains(id))
            .unwrap_or(false)
    }

    /// The current failure banner, if it hasn't expired yet.
    /// Reading an expired banner clears it.
    pub fn banner(&self, now: i64) -> Option<String> {
        let mut slot = self.banner.lock().ok()?;
        match &*slot {
            Some(err) if now < err.expires_at => Some(err.message.clone()),
            Some(_) => {
                *slot = None;
                None
            }
            None => None,
        }
    }
}
