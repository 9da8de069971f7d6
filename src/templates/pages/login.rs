use crate::templates::layouts::{site_layout, SiteChrome};
use crate::templates::components::error_banner;
use maud::{html, Markup};

/// Sign-in page, shared by both sites (the chrome and post target differ).
pub fn login_page(chrome: SiteChrome, action: &str, error: Option<&str>) -> Markup {
    let heading = match chrome {
        SiteChrome::LeadGenPro => "Admin Login",
        SiteChrome::EliteProperties => "EliteProperties Admin",
    };

    site_layout(
        "Sign in",
        chrome,
        html! {
            main class="container narrow" {
                h1 { (heading) }
                p class="lead" { "Sign in to manage your leads." }

                @if let Some(msg) = error {
                    (error_banner(msg))
                }

                form method="post" action=(action) class="login-form" {
                    label for="email" { "Email Address" }
                    input type="email" id="email" name="email"
                        autocomplete="email" placeholder="admin@example.com" required;

                    label for="password" { "Password" }
                    input type="password" id="password" name="password"
                        autocomplete="current-password" placeholder="Enter your password" required;

                    button type="submit" class="primary" { "Sign In" }
                }
            }
        },
    )
}
