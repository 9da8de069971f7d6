// src/store/gateway.rs
//
// The document-store seam. Everything the intake forms and the dashboard do
// against persistent lead state goes through `DocumentStore`, so the rest of
// the app never sees SQL and tests can plug in scripted fakes.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};

use crate::leads::model::{Lead, LeadStatus, NewLead};

/// Failure kinds a store can report, discriminated so the UI can word the
/// banner differently for a rules problem vs. an outage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    PermissionDenied,
    Unavailable,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self {
            kind: StoreErrorKind::PermissionDenied,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: StoreErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self {
            kind: StoreErrorKind::Other,
            message: message.into(),
        }
    }

    /// The message shown to an operator. Permission and availability
    /// failures get guidance toward the fix instead of the raw error.
    pub fn operator_message(&self) -> String {
        match self.kind {
            StoreErrorKind::PermissionDenied => {
                "Permission denied. Please check the store access rules.".to_string()
            }
            StoreErrorKind::Unavailable => {
                "Store unavailable. Please check your connection.".to_string()
            }
            StoreErrorKind::Other => self.message.clone(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StoreErrorKind::PermissionDenied => write!(f, "permission denied: {}", self.message),
            StoreErrorKind::Unavailable => write!(f, "unavailable: {}", self.message),
            StoreErrorKind::Other => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// A partial update. Only fields that are `Some` are written; the store
/// refreshes updated_at itself on every merge.
#[derive(Debug, Clone, Default)]
pub struct LeadPatch {
    pub status: Option<LeadStatus>,
}

/// One delivery on a live subscription: either the full current ordered
/// record set, or a store failure.
#[derive(Debug, Clone)]
pub enum SnapshotEvent {
    Snapshot(Vec<Lead>),
    Error(StoreError),
}

/// Cancel side of a subscription. Cloneable so the owner of the event
/// stream and the component tearing it down can be different threads.
/// `cancel` is synchronous and idempotent; after it returns, the store
/// will deliver no further events.
#[derive(Clone)]
pub struct SubscriptionHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    cancelled: AtomicBool,
    on_cancel: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl SubscriptionHandle {
    pub fn new(on_cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                cancelled: AtomicBool::new(false),
                on_cancel: Mutex::new(Some(Box::new(on_cancel))),
            }),
        }
    }

    pub fn cancel(&self) {
        if self.inner.cancelled.swap(true, Ordering::SeqCst) {
            return; // already cancelled
        }
        let cleanup = self
            .inner
            .on_cancel
            .lock()
            .ok()
            .and_then(|mut slot| slot.take());
        if let Some(cleanup) = cleanup {
            cleanup();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }
}

/// A live subscription: the event stream plus its cancel handle.
pub struct Subscription {
    pub events: Receiver<SnapshotEvent>,
    handle: SubscriptionHandle,
}

impl Subscription {
    pub fn new(events: Receiver<SnapshotEvent>, handle: SubscriptionHandle) -> Self {
        Self { events, handle }
    }

    pub fn handle(&self) -> SubscriptionHandle {
        self.handle.clone()
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }
}

pub trait DocumentStore: Send + Sync {
    /// Insert a record; the store assigns the id and both timestamps.
    /// Status is written as New; intake is the only creator.
    fn create(&self, collection: &str, lead: &NewLead) -> Result<String, StoreError>;

    /// Merge a partial update into an existing record and refresh its
    /// updated_at. Unknown ids are an error.
    fn update(&self, collection: &str, id: &str, patch: &LeadPatch) -> Result<(), StoreError>;

    /// Open a push subscription over the full matching record set. The
    /// current set is delivered immediately, then again after every
    /// committed change. Setup failures arrive as an Error event rather
    /// than a panicking return, so callers have one code path.
    fn subscribe(
        &self,
        collection: &str,
        order_by: &str,
        direction: OrderDirection,
    ) -> Subscription;
}
