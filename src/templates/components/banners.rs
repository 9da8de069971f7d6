use maud::{html, Markup};

/// Red banner for subscription / update failures.
pub fn error_banner(message: &str) -> Markup {
    html! {
        div class="banner banner-error" {
            p { (message) }
        }
    }
}

/// Green confirmation panel shown after a successful form submission.
pub fn success_panel(title: &str, body: &str) -> Markup {
    html! {
        div class="panel panel-success" {
            h3 { (title) }
            p { (body) }
        }
    }
}
