use maud::{html, Markup};

/// One dashboard statistic tile.
pub fn stat_card(label: &str, value: usize, accent: &str) -> Markup {
    html! {
        article class="stat-card" {
            p class="stat-label" { (label) }
            p class=(format!("stat-value {accent}")) { (value) }
        }
    }
}
