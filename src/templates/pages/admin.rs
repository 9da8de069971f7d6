// templates/pages/admin.rs
//
// The lead dashboard, rendered for either site. The page shell carries the
// filter bar; the #dashboard region holds the stats + table partial and
// re-fetches itself (with the current filter values) every few seconds so
// newly pushed snapshots reach the screen without a reload.

use maud::{html, Markup};

use crate::leads::filter::{LeadQuery, PropertyTypeFilter, StatusFilter};
use crate::leads::model::{Lead, LeadDetails, PropertyType, SiteVariant};
use crate::leads::stats::DashboardStats;
use crate::templates::components::{
    error_banner, format_date, property_type_badge, stat_card, status_badge,
};
use crate::templates::layouts::{site_layout, SiteChrome};

/// Route endpoints for one site's dashboard.
pub struct DashboardPaths {
    pub page: &'static str,
    pub partial: &'static str,
    pub status: &'static str,
    pub export: &'static str,
    pub login: &'static str,
}

pub const GENERIC_DASHBOARD: DashboardPaths = DashboardPaths {
    page: "/admin",
    partial: "/admin/leads",
    status: "/admin/leads/status",
    export: "/admin/leads/export",
    login: "/login",
};

pub const REALESTATE_DASHBOARD: DashboardPaths = DashboardPaths {
    page: "/realestate-admin",
    partial: "/realestate-admin/leads",
    status: "/realestate-admin/leads/status",
    export: "/realestate-admin/leads/export",
    login: "/realestate-login",
};

pub struct DashboardVm<'a> {
    pub site: SiteVariant,
    pub paths: &'static DashboardPaths,
    pub operator_email: &'a str,
    pub synced: bool,
    pub feed_error: Option<String>,
    pub update_banner: Option<String>,
    pub stats: DashboardStats,
    pub filtered: Vec<&'a Lead>,
    pub total_count: usize,
    pub query: &'a LeadQuery,
}

impl DashboardVm<'_> {
    fn chrome(&self) -> SiteChrome {
        match self.site {
            SiteVariant::Generic => SiteChrome::LeadGenPro,
            SiteVariant::RealEstate => SiteChrome::EliteProperties,
        }
    }

    fn filters_active(&self) -> bool {
        !self.query.search.trim().is_empty()
            || self.query.status != StatusFilter::All
            || self.query.property_type != PropertyTypeFilter::All
    }
}

pub fn admin_page(vm: &DashboardVm) -> Markup {
    site_layout(
        "Leads Management",
        vm.chrome(),
        html! {
            main class="dashboard" {
                header class="dashboard-header" {
                    div {
                        h1 { "Leads Management" }
                        p class="subtitle" { "Real-time lead tracking and management" }
                    }
                    div class="operator" {
                        span { "Signed in as " strong { (vm.operator_email) } }
                        form method="post" action="/logout" {
                            button type="submit" class="link" { "Sign out" }
                        }
                    }
                }

                (filter_bar(vm))

                div
                    id="dashboard"
                    hx-get=(vm.paths.partial)
                    hx-include="#filters"
                    hx-trigger="every 5s"
                    hx-swap="innerHTML"
                {
                    (leads_partial(vm))
                }
            }
        },
    )
}

fn filter_bar(vm: &DashboardVm) -> Markup {
    html! {
        form id="filters" class="filter-bar" {
            input
                type="search"
                name="q"
                value=(vm.query.search)
                placeholder="Search leads by name, email, phone, or message..."
                hx-get=(vm.paths.partial)
                hx-target="#dashboard"
                hx-swap="innerHTML"
                hx-include="#filters"
                hx-trigger="keyup changed delay:300ms";

            select
                name="status"
                hx-get=(vm.paths.partial)
                hx-target="#dashboard"
                hx-swap="innerHTML"
                hx-include="#filters"
                hx-trigger="change"
            {
                option value="all" selected[vm.query.status == StatusFilter::All] { "All Status" }
                @for status in vm.site.allowed_statuses() {
                    option
                        value=(status.as_str())
                        selected[vm.query.status == StatusFilter::Is(*status)]
                    { (status.as_str()) }
                }
            }

            @if vm.site == SiteVariant::RealEstate {
                select
                    name="property_type"
                    hx-get=(vm.paths.partial)
                    hx-target="#dashboard"
                    hx-swap="innerHTML"
                    hx-include="#filters"
                    hx-trigger="change"
                {
                    option value="all" selected[vm.query.property_type == PropertyTypeFilter::All] {
                        "All Types"
                    }
                    @for pt in [
                        PropertyType::Buy,
                        PropertyType::Sell,
                        PropertyType::Rent,
                        PropertyType::Flat,
                        PropertyType::Villa,
                        PropertyType::Plot,
                    ] {
                        option
                            value=(pt.as_str())
                            selected[vm.query.property_type == PropertyTypeFilter::Is(pt)]
                        { (pt.label()) }
                    }
                }
            }
        }
    }
}

/// The refreshable region: banners, stat cards, table, result count.
pub fn leads_partial(vm: &DashboardVm) -> Markup {
    html! {
        @if let Some(msg) = &vm.feed_error {
            (error_banner(msg))
        }
        @if let Some(msg) = &vm.update_banner {
            (error_banner(msg))
        }

        section class="stats-grid" {
            (stat_card("Total Leads", vm.stats.total, "accent-gray"))
            (stat_card("New", vm.stats.new_leads, "accent-blue"))
            (stat_card("Contacted", vm.stats.contacted, "accent-yellow"))
            @if vm.site == SiteVariant::RealEstate {
                (stat_card("Site Visit", vm.stats.site_visit, "accent-purple"))
            }
            (stat_card("Closed", vm.stats.closed, "accent-green"))
            @if vm.site == SiteVariant::Generic {
                (stat_card("Today", vm.stats.today, "accent-purple"))
            }
        }

        @if !vm.synced && vm.feed_error.is_none() {
            section class="empty-state" {
                p class="headline" { "Loading leads..." }
                p { "Connecting to the lead store" }
            }
        } @else if vm.filtered.is_empty() {
            section class="empty-state" {
                p class="headline" { "No leads found" }
                @if vm.filters_active() {
                    p { "Try adjusting your search or filters to find what you're looking for." }
                    a href=(vm.paths.page) { "Clear filters" }
                } @else {
                    p { "No leads have been submitted yet. New leads will appear here in real time." }
                }
            }
        } @else {
            (leads_table(vm))
            p class="result-count" {
                "Showing " (vm.filtered.len()) " of " (vm.total_count) " leads"
            }
            (export_form(vm))
        }
    }
}

fn leads_table(vm: &DashboardVm) -> Markup {
    html! {
        div class="table-wrap" {
            table class="leads-table" {
                thead {
                    tr {
                        th { "Name" }
                        th { "Contact" }
                        @if vm.site == SiteVariant::RealEstate {
                            th { "Property" }
                        } @else {
                            th { "Message" }
                        }
                        th { "Status" }
                        th { "Created" }
                        th { "Actions" }
                    }
                }
                tbody {
                    @for &lead in &vm.filtered {
                        tr {
                            td class="name" { (lead.full_name) }
                            td {
                                div { (lead.email) }
                                div class="muted" { (lead.phone) }
                            }
                            @match &lead.details {
                                LeadDetails::RealEstate { property_type, budget, preferred_location } => {
                                    td {
                                        (property_type_badge(*property_type))
                                        @if let Some(b) = budget {
                                            div class="muted" { (b.label()) }
                                        }
                                        @if let Some(loc) = preferred_location {
                                            div class="muted" { (loc) }
                                        }
                                    }
                                }
                                LeadDetails::Generic { company } => {
                                    td {
                                        div class="truncate" {
                                            @if lead.message.is_empty() { "—" } @else { (lead.message) }
                                        }
                                        @if let Some(company) = company {
                                            div class="muted" { (company) }
                                        }
                                    }
                                }
                            }
                            td { (status_badge(lead.effective_status())) }
                            td class="muted" { (format_date(lead.created_at)) }
                            td { (status_select(vm, lead)) }
                        }
                    }
                }
            }
        }
    }
}

fn status_select(vm: &DashboardVm, lead: &Lead) -> Markup {
    let vals = format!(r#"{{"id":"{}"}}"#, lead.id);
    html! {
        select
            name="status"
            hx-post=(vm.paths.status)
            hx-vals=(vals)
            hx-include="#filters"
            hx-target="#dashboard"
            hx-swap="innerHTML"
            hx-trigger="change"
            hx-disabled-elt="this"
        {
            @for status in vm.site.allowed_statuses() {
                option
                    value=(status.as_str())
                    selected[lead.effective_status() == *status]
                { (status.as_str()) }
            }
        }
    }
}

fn export_form(vm: &DashboardVm) -> Markup {
    html! {
        form method="get" action=(vm.paths.export) class="export-form" {
            input type="hidden" name="q" value=(vm.query.search);
            input type="hidden" name="status" value=(vm.query.status.as_str());
            @if vm.site == SiteVariant::RealEstate {
                input type="hidden" name="property_type" value=(vm.query.property_type.as_str());
            }
            button type="submit" { "Export XLSX" }
        }
    }
}
