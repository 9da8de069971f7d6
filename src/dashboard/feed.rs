// src/dashboard/feed.rs
//
// The dashboard's live mirror of the leads collection. One worker thread
// drains the store subscription and replaces the mirror wholesale on every
// snapshot; request handlers only ever read a clone. There is no retry:
// if the subscription dies, the feed stays in its error state until the
// process is restarted.

use std::sync::mpsc::RecvTimeoutError;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::leads::model::Lead;
use crate::store::gateway::{DocumentStore, OrderDirection, SnapshotEvent, SubscriptionHandle};
use crate::store::sqlite::LEADS_COLLECTION;

/// How long to wait for the first event before declaring the subscription dead.
pub const SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(15);

pub const TIMEOUT_MESSAGE: &str =
    "Connection timeout. Please check your connection and the store configuration.";

#[derive(Debug, Default)]
struct FeedState {
    leads: Vec<Lead>,
    error: Option<String>,
    synced: bool,
}

/// What a render sees: a consistent copy of the mirror plus error state.
#[derive(Debug, Clone)]
pub struct FeedView {
    pub leads: Vec<Lead>,
    pub error: Option<String>,
    /// False until the first snapshot has arrived (drives the loading state).
    pub synced: bool,
}

pub struct LeadFeed {
    state: Arc<Mutex<FeedState>>,
    handle: SubscriptionHandle,
    worker: Option<JoinHandle<()>>,
}

impl LeadFeed {
    /// Subscribe to the leads collection (newest first) and start mirroring.
    ///
    /// `first_event_timeout` bounds the wait for the first snapshot or
    /// error; production callers pass [`SNAPSHOT_TIMEOUT`].
    pub fn start(store: &dyn DocumentStore, first_event_timeout: Duration) -> Self {
        println!("📡 Subscribing to the {LEADS_COLLECTION} collection...");
        let subscription = store.subscribe(LEADS_COLLECTION, "created_at", OrderDirection::Desc);
        let handle = subscription.handle();

        let state = Arc::new(Mutex::new(FeedState::default()));
        let worker_state = state.clone();

        let worker = thread::spawn(move || {
            let events = subscription.events;
            // The timeout is only armed until the first event of any kind;
            // after that the store owns the pacing.
            let mut saw_event = false;

            loop {
                let event = if saw_event {
                    match events.recv() {
                        Ok(event) => event,
                        Err(_) => break,
                    }
                } else {
                    match events.recv_timeout(first_event_timeout) {
                        Ok(event) => event,
                        Err(RecvTimeoutError::Timeout) => {
                            eprintln!("⏱️ No snapshot within {first_event_timeout:?}");
                            saw_event = true;
                            if let Ok(mut st) = worker_state.lock() {
                                st.error = Some(TIMEOUT_MESSAGE.to_string());
                            }
                            continue;
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                };
                saw_event = true;

                match event {
                    SnapshotEvent::Snapshot(leads) => {
                        println!("📥 Snapshot received: {} leads", leads.len());
                        if let Ok(mut st) = worker_state.lock() {
                            st.leads = leads;
                            st.error = None;
                            st.synced = true;
                        }
                    }
                    SnapshotEvent::Error(err) => {
                        eprintln!("❌ Subscription error: {err}");
                        if let Ok(mut st) = worker_state.lock() {
                            st.error = Some(err.operator_message());
                        }
                    }
                }
            }
        });

        Self {
            state,
            handle,
            worker: Some(worker),
        }
    }

    /// A consistent copy of the current mirror and error state.
    pub fn view(&self) -> FeedView {
        match self.state.lock() {
            Ok(st) => FeedView {
                leads: st.leads.clone(),
                error: st.error.clone(),
                synced: st.synced,
            },
            Err(_) => FeedView {
                leads: Vec::new(),
                error: Some(TIMEOUT_MESSAGE.to_string()),
                synced: false,
            },
        }
    }

    /// Tear down: cancel the subscription and join the worker.
    /// Safe to call more than once; no state transitions happen afterwards.
    pub fn stop(&mut self) {
        self.handle.cancel();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for LeadFeed {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::model::{LeadDetails, LeadStatus, NewLead};
    use crate::store::gateway::{LeadPatch, StoreError, Subscription};
    use std::sync::mpsc::{self, Sender};
    use std::time::Instant;

    const SHORT_TIMEOUT: Duration = Duration::from_millis(50);

    /// A store whose snapshots are pushed by the test itself.
    #[derive(Default)]
    struct ScriptedStore {
        feed_tx: Arc<Mutex<Option<Sender<SnapshotEvent>>>>,
    }

    impl ScriptedStore {
        fn push(&self, event: SnapshotEvent) {
            let guard = self.feed_tx.lock().unwrap();
            guard
                .as_ref()
                .expect("no live subscription")
                .send(event)
                .expect("subscriber hung up");
        }
    }

    impl DocumentStore for ScriptedStore {
        fn create(&self, _collection: &str, _lead: &NewLead) -> Result<String, StoreError> {
            Ok("id".into())
        }

        fn update(
            &self,
            _collection: &str,
            _id: &str,
            _patch: &LeadPatch,
        ) -> Result<(), StoreError> {
            Ok(())
        }

        fn subscribe(
            &self,
            _collection: &str,
            _order_by: &str,
            _direction: OrderDirection,
        ) -> Subscription {
            let (tx, rx) = mpsc::channel();
            *self.feed_tx.lock().unwrap() = Some(tx);

            // Cancel drops the stored sender so the worker sees a disconnect
            // and no later push can reach it.
            let slot = self.feed_tx.clone();
            Subscription::new(
                rx,
                SubscriptionHandle::new(move || {
                    *slot.lock().unwrap() = None;
                }),
            )
        }
    }

    fn lead(id: &str, created_at: i64) -> Lead {
        Lead {
            id: id.into(),
            full_name: format!("Lead {id}"),
            email: format!("{id}@example.com"),
            phone: "5551234567".into(),
            message: String::new(),
            status: Some(LeadStatus::New),
            created_at: Some(created_at),
            updated_at: Some(created_at),
            details: LeadDetails::Generic { company: None },
        }
    }

    fn wait_until(feed: &LeadFeed, pred: impl Fn(&FeedView) -> bool) -> FeedView {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            let view = feed.view();
            if pred(&view) {
                return view;
            }
            if Instant::now() > deadline {
                panic!("condition not reached; last view: {view:?}");
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn snapshot_replaces_the_mirror_wholesale_in_delivered_order() {
        let store = ScriptedStore::default();
        let feed = LeadFeed::start(&store, Duration::from_secs(5));

        store.push(SnapshotEvent::Snapshot(vec![lead("2", 200), lead("1", 100)]));
        let view = wait_until(&feed, |v| v.synced);
        let ids: Vec<&str> = view.leads.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
        assert!(view.error.is_none());

        // The next snapshot replaces, never merges.
        store.push(SnapshotEvent::Snapshot(vec![
            lead("3", 300),
            lead("2", 200),
            lead("1", 100),
        ]));
        let view = wait_until(&feed, |v| v.leads.len() == 3);
        let ids: Vec<&str> = view.leads.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["3", "2", "1"]);
    }

    #[test]
    fn silent_subscription_times_out_with_an_empty_mirror() {
        let store = ScriptedStore::default();
        let feed = LeadFeed::start(&store, SHORT_TIMEOUT);

        let view = wait_until(&feed, |v| v.error.is_some());
        assert_eq!(view.error.as_deref(), Some(TIMEOUT_MESSAGE));
        assert!(view.leads.is_empty());
        assert!(!view.synced);
    }

    #[test]
    fn snapshot_after_timeout_clears_the_error() {
        let store = ScriptedStore::default();
        let feed = LeadFeed::start(&store, SHORT_TIMEOUT);
        wait_until(&feed, |v| v.error.is_some());

        store.push(SnapshotEvent::Snapshot(vec![lead("1", 100)]));
        let view = wait_until(&feed, |v| v.synced);
        assert!(view.error.is_none());
        assert_eq!(view.leads.len(), 1);
    }

    #[test]
    fn permission_error_surfaces_immediately_and_suppresses_the_timeout() {
        let store = ScriptedStore::default();
        let feed = LeadFeed::start(&store, SHORT_TIMEOUT);

        store.push(SnapshotEvent::Error(StoreError::permission_denied(
            "rules rejected the read",
        )));
        let view = wait_until(&feed, |v| v.error.is_some());
        assert!(view.error.as_deref().unwrap().contains("Permission denied"));

        // Sleep well past the timeout: the message must not flip to the
        // generic timeout text.
        thread::sleep(SHORT_TIMEOUT * 3);
        let view = feed.view();
        assert!(view.error.as_deref().unwrap().contains("Permission denied"));
    }

    #[test]
    fn unavailable_and_permission_errors_read_differently() {
        let store = ScriptedStore::default();
        let feed = LeadFeed::start(&store, Duration::from_secs(5));

        store.push(SnapshotEvent::Error(StoreError::unavailable("io error")));
        let view = wait_until(&feed, |v| v.error.is_some());
        let unavailable_msg = view.error.unwrap();
        assert!(unavailable_msg.contains("unavailable"));
        assert!(!unavailable_msg.contains("Permission"));
    }

    #[test]
    fn error_keeps_the_last_known_mirror() {
        let store = ScriptedStore::default();
        let feed = LeadFeed::start(&store, Duration::from_secs(5));

        store.push(SnapshotEvent::Snapshot(vec![lead("1", 100)]));
        wait_until(&feed, |v| v.synced);

        store.push(SnapshotEvent::Error(StoreError::unavailable("blip")));
        let view = wait_until(&feed, |v| v.error.is_some());
        // Stale-but-valid list keeps rendering under the banner.
        assert_eq!(view.leads.len(), 1);
        assert!(view.synced);
    }

    #[test]
    fn stop_is_synchronous_idempotent_and_final() {
        let store = ScriptedStore::default();
        let mut feed = LeadFeed::start(&store, Duration::from_secs(5));

        store.push(SnapshotEvent::Snapshot(vec![lead("1", 100)]));
        wait_until(&feed, |v| v.synced);

        feed.stop();
        feed.stop(); // second stop is a no-op

        // Cancel dropped the store-side sender and the worker has joined;
        // the mirror stays frozen at its last state.
        assert!(feed.worker.is_none());
        assert!(feed.handle.is_cancelled());
        assert!(store.feed_tx.lock().unwrap().is_none());
        let view = feed.view();
        assert_eq!(view.leads.len(), 1);
    }
}
