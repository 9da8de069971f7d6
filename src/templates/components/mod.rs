pub mod badges;
pub mod banners;
pub mod cards;

// Re-exports for convenience
pub use badges::{property_type_badge, status_badge};
pub use banners::{error_banner, success_panel};
pub use cards::stat_card;

use chrono::{Local, TimeZone};

/// Display form of a stored timestamp, e.g. "Mar 5, 2026, 02:30 PM".
/// Records without one show "N/A".
pub fn format_date(ts: Option<i64>) -> String {
    match ts.and_then(|secs| Local.timestamp_opt(secs, 0).single()) {
        Some(dt) => dt.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => "N/A".to_string(),
    }
}
