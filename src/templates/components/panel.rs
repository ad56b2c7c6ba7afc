use maud::{html, Markup};

/// Titled page section; `more` adds a `(href, label)` link beside the heading.
pub fn panel(heading: &str, more: Option<(&str, &str)>, body: Markup) -> Markup {
    html! {
        section class="panel flex flex-col gap-4" aria-label=(heading) {
            header class="flex items-center justify-between" {
                h2 class="text-xl font-semibold" { (heading) }
                @if let Some((href, label)) = more {
                    a href=(href) class="text-sm link" { (label) " →" }
                }
            }
            (body)
        }
    }
}
