// templates/pages/home.rs

use crate::leads::intake::GenericIntake;
use crate::templates::components::{error_banner, success_panel};
use crate::templates::layouts::{site_layout, SiteChrome};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    site_layout(
        "LeadGen Pro — Start Generating Leads Today",
        SiteChrome::LeadGenPro,
        html! {
            main {
                section class="hero" {
                    h1 { "Start Generating Leads Today" }
                    p class="lead" {
                        "Join thousands of businesses already growing with LeadGen Pro."
                    }
                    a class="cta" href="#contact" { "Get Started" }
                }

                section id="contact" class="container narrow" {
                    h2 { "Tell us about your business" }
                    div id="lead-form-wrap" {
                        (lead_capture_form(None, &GenericIntake::default()))
                    }
                }
            }
        },
    )
}

/// The capture form, optionally re-rendered with a validation error and the
/// visitor's previous input.
pub fn lead_capture_form(error: Option<&str>, values: &GenericIntake) -> Markup {
    html! {
        form
            method="post"
            action="/leads"
            hx-post="/leads"
            hx-target="#lead-form-wrap"
            hx-swap="innerHTML"
            hx-disabled-elt="button"
            class="lead-form"
        {
            @if let Some(msg) = error {
                (error_banner(msg))
            }

            label for="full_name" { "Full Name " span class="required" { "*" } }
            input type="text" id="full_name" name="full_name"
                value=(values.full_name) placeholder="John Doe" required;

            label for="email" { "Email Address " span class="required" { "*" } }
            input type="email" id="email" name="email"
                value=(values.email) placeholder="john@example.com" required;

            label for="phone" { "Phone Number " span class="required" { "*" } }
            input type="tel" id="phone" name="phone"
                value=(values.phone) placeholder="(555) 123-4567" required;

            label for="company" { "Company" }
            input type="text" id="company" name="company"
                value=(values.company) placeholder="Acme Inc.";

            label for="message" { "Message" }
            textarea id="message" name="message" rows="4" maxlength="500"
                placeholder="What are you looking for?" { (values.message) }

            button type="submit" class="primary" { "Get Started" }
        }
    }
}

/// Shown in place of the form after a successful submission.
pub fn lead_submitted_panel() -> Markup {
    success_panel(
        "Thank You!",
        "We'll be in touch shortly to help you get started.",
    )
}
