pub mod feed;
pub mod updates;

pub use feed::{FeedView, LeadFeed, SNAPSHOT_TIMEOUT};
pub use updates::{StatusUpdater, UpdateOutcome};
