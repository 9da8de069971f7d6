// src/leads/stats.rs
use chrono::{DateTime, TimeZone};

use crate::leads::model::{Lead, LeadStatus};

/// Summary counts over the full mirror (not the filtered view).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub new_leads: usize,
    pub contacted: usize,
    pub site_visit: usize,
    pub closed: usize,
    /// Leads created on `now`'s calendar date, in `now`'s timezone.
    pub today: usize,
}

/// Pure function of (mirror, now). Recomputed on every render; a lead
/// without created_at never counts toward today.
pub fn compute_stats<Tz: TimeZone>(leads: &[Lead], now: DateTime<Tz>) -> DashboardStats {
    let today = now.date_naive();
    let tz = now.timezone();

    let mut stats = DashboardStats {
        total: leads.len(),
        ..DashboardStats::default()
    };

    for lead in leads {
        match lead.effective_status() {
            LeadStatus::New => stats.new_leads += 1,
            LeadStatus::Contacted => stats.contacted += 1,
            LeadStatus::SiteVisit => stats.site_visit += 1,
            LeadStatus::Closed => stats.closed += 1,
        }

        let created_today = lead
            .created_at
            .and_then(|secs| tz.timestamp_opt(secs, 0).single())
            .map(|created| created.date_naive() == today)
            .unwrap_or(false);
        if created_today {
            stats.today += 1;
        }
    }

    stats
}
