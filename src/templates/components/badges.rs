use maud::{html, Markup};

use crate::leads::model::{LeadStatus, PropertyType};

/// Colored pill for a lead's effective status.
pub fn status_badge(status: LeadStatus) -> Markup {
    let class = match status {
        LeadStatus::New => "badge badge-blue",
        LeadStatus::Contacted => "badge badge-yellow",
        LeadStatus::SiteVisit => "badge badge-purple",
        LeadStatus::Closed => "badge badge-green",
    };
    html! {
        span class=(class) { (status.as_str()) }
    }
}

pub fn property_type_badge(property_type: Option<PropertyType>) -> Markup {
    match property_type {
        Some(pt) => {
            let class = match pt {
                PropertyType::Buy => "badge badge-green",
                PropertyType::Sell => "badge badge-purple",
                PropertyType::Rent => "badge badge-orange",
                _ => "badge badge-gray",
            };
            html! { span class=(class) { (pt.label()) } }
        }
        None => html! { span class="badge badge-gray" { "N/A" } },
    }
}
