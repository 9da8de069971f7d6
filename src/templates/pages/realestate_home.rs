// templates/pages/realestate_home.rs

use crate::leads::intake::RealEstateIntake;
use crate::leads::model::{BudgetRange, PropertyType};
use crate::templates::components::{error_banner, success_panel};
use crate::templates::layouts::{site_layout, SiteChrome};
use maud::{html, Markup};

const ENQUIRY_TYPES: [PropertyType; 3] =
    [PropertyType::Buy, PropertyType::Sell, PropertyType::Rent];

pub fn realestate_home_page() -> Markup {
    site_layout(
        "EliteProperties — Find Your Dream Property",
        SiteChrome::EliteProperties,
        html! {
            main {
                section class="hero realestate" {
                    h1 { "Find Your Dream Property" }
                    p class="lead" {
                        "Buy, sell or rent with a team that knows the market."
                    }
                    a class="cta" href="#enquiry" { "Enquire Now" }
                }

                section id="enquiry" class="container narrow" {
                    h2 { "Property Enquiry Form" }
                    p class="lead" {
                        "Fill out the form below and our expert team will help you find your dream property."
                    }
                    div id="enquiry-form-wrap" {
                        (enquiry_form(None, &RealEstateIntake::default()))
                    }
                }
            }
        },
    )
}

pub fn enquiry_form(error: Option<&str>, values: &RealEstateIntake) -> Markup {
    html! {
        form
            method="post"
            action="/realestate/leads"
            hx-post="/realestate/leads"
            hx-target="#enquiry-form-wrap"
            hx-swap="innerHTML"
            hx-disabled-elt="button"
            class="lead-form"
        {
            @if let Some(msg) = error {
                (error_banner(msg))
            }

            label for="full_name" { "Full Name " span class="required" { "*" } }
            input type="text" id="full_name" name="full_name"
                value=(values.full_name) placeholder="Enter your full name" required;

            label for="email" { "Email Address " span class="required" { "*" } }
            input type="email" id="email" name="email"
                value=(values.email) placeholder="your.email@example.com" required;

            label for="phone" { "Phone Number " span class="required" { "*" } }
            input type="tel" id="phone" name="phone"
                value=(values.phone) placeholder="+91 98765 43210" required;

            label for="property_type" { "Property Type " span class="required" { "*" } }
            select id="property_type" name="property_type" required {
                option value="" disabled selected[values.property_type.is_empty()] {
                    "Select property type"
                }
                @for pt in ENQUIRY_TYPES {
                    option value=(pt.as_str()) selected[values.property_type == pt.as_str()] {
                        (pt.label())
                    }
                }
            }

            label for="budget" { "Budget Range " span class="required" { "*" } }
            select id="budget" name="budget" required {
                option value="" disabled selected[values.budget.is_empty()] {
                    "Select Budget Range"
                }
                @for range in BudgetRange::ALL {
                    option value=(range.as_str()) selected[values.budget == range.as_str()] {
                        (range.label())
                    }
                }
            }

            label for="preferred_location" { "Preferred Location" }
            input type="text" id="preferred_location" name="preferred_location"
                value=(values.preferred_location) placeholder="e.g. Whitefield, Bangalore";

            label for="message" { "Message" }
            textarea id="message" name="message" rows="4" maxlength="500"
                placeholder="Tell us about your property requirements or any specific needs..."
                { (values.message) }

            button type="submit" class="primary" { "Submit Enquiry" }
        }
    }
}

pub fn enquiry_submitted_panel() -> Markup {
    success_panel(
        "Thank You!",
        "We'll contact you shortly to discuss your property needs.",
    )
}
