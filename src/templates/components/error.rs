use maud::{html, Markup};

/// Inline error box used inside pages and htmx fragments.
pub fn error_notice(message: &str) -> Markup {
    html! {
        div class="error-notice" role="alert" {
            p class="text-destructive text-sm" { (message) }
        }
    }
}
