pub mod gateway;
pub mod sqlite;

pub use gateway::{DocumentStore, LeadPatch, OrderDirection, SnapshotEvent, StoreError};
pub use sqlite::SqliteStore;
