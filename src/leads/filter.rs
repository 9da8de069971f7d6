// src/leads/filter.rs
use crate::leads::model::{Lead, LeadDetails, LeadStatus, PropertyType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Is(LeadStatus),
}

impl StatusFilter {
    /// "all" or a status display string; anything unknown falls back to All.
    pub fn parse(s: &str) -> Self {
        match LeadStatus::from_str(s) {
            Some(status) => StatusFilter::Is(status),
            None => StatusFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Is(status) => status.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyTypeFilter {
    All,
    Is(PropertyType),
}

impl PropertyTypeFilter {
    pub fn parse(s: &str) -> Self {
        match PropertyType::from_str(s) {
            Some(pt) => PropertyTypeFilter::Is(pt),
            None => PropertyTypeFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyTypeFilter::All => "all",
            PropertyTypeFilter::Is(pt) => pt.as_str(),
        }
    }
}

/// Ephemeral dashboard filter state: free-text search plus the two selects.
#[derive(Debug, Clone)]
pub struct LeadQuery {
    pub search: String,
    pub status: StatusFilter,
    pub property_type: PropertyTypeFilter,
}

impl Default for LeadQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            property_type: PropertyTypeFilter::All,
        }
    }
}

/// Derive the displayed subset: the intersection of all active predicates,
/// in the mirror's order. Pure; same inputs always give the same output.
pub fn filter_leads<'a>(leads: &'a [Lead], query: &LeadQuery) -> Vec<&'a Lead> {
    let needle = query.search.trim().to_lowercase();
    leads
        .iter()
        .filter(|lead| matches_search(lead, &needle))
        .filter(|lead| matches_status(lead, query.status))
        .filter(|lead| matches_property_type(lead, query.property_type))
        .collect()
}

fn matches_search(lead: &Lead, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |field: &str| field.to_lowercase().contains(needle);

    if hit(&lead.full_name) || hit(&lead.email) || hit(&lead.phone) || hit(&lead.message) {
        return true;
    }
    match &lead.details {
        LeadDetails::Generic {
            company: Some(company),
        } => hit(company),
        _ => false,
    }
}

fn matches_status(lead: &Lead, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Is(status) => lead.effective_status() == status,
    }
}

fn matches_property_type(lead: &Lead, filter: PropertyTypeFilter) -> bool {
    match filter {
        PropertyTypeFilter::All => true,
        PropertyTypeFilter::Is(wanted) => match &lead.details {
            LeadDetails::RealEstate {
                property_type: Some(pt),
                ..
            } => *pt == wanted,
            _ => false,
        },
    }
}
