use maud::{html, Markup, DOCTYPE};

/// Which site chrome to render around a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteChrome {
    LeadGenPro,
    EliteProperties,
}

pub fn site_layout(title: &str, chrome: SiteChrome, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="icon" href="/static/favicon.ico";
                link rel="stylesheet" href="/static/main.css";
                script src="https://unpkg.com/htmx.org@1.9.12" defer {};
            }
            body {
                (header_for(chrome))
                (content)
                footer class="site-footer" {
                    @match chrome {
                        SiteChrome::LeadGenPro => p { "© LeadGen Pro. Grow your pipeline." },
                        SiteChrome::EliteProperties => p { "© EliteProperties. Find your dream property." },
                    }
                }
            }
        }
    }
}

fn header_for(chrome: SiteChrome) -> Markup {
    match chrome {
        SiteChrome::LeadGenPro => html! {
            header class="flex items-center justify-between px-6 py-3 shadow" {
                a href="/home" class="brand" { h3 { "LeadGen Pro" } }
                nav {
                    ul {
                        li { a href="/home" { "Home" } }
                        li { a href="/home#contact" { "Contact" } }
                    }
                }
                a href="/login" class="text-base font-medium hover:text-blue-600" { "Admin Login" }
            }
        },
        SiteChrome::EliteProperties => html! {
            header class="flex items-center justify-between px-6 py-3 shadow realestate" {
                a href="/realestate" class="brand" { h3 { "EliteProperties" } }
                nav {
                    ul {
                        li { a href="/realestate" { "Home" } }
                        li { a href="/realestate#enquiry" { "Enquiry" } }
                    }
                }
                a href="/realestate-login" class="text-base font-medium hover:text-amber-600" { "Admin Login" }
            }
        },
    }
}
