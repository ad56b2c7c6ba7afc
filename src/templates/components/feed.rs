use maud::{html, Markup};

/// Loads the next page when scrolled into view and replaces itself with it.
/// htmx issues one request per reveal, and `swap_target` (the sentinel or
/// its wrapper) is gone once the response lands.
pub fn feed_sentinel(next_url: &str, loading_label: &str, swap_target: &str) -> Markup {
    html! {
        div class="feed-sentinel h-1 w-full"
            hx-get=(next_url)
            hx-trigger="revealed"
            hx-target=(swap_target)
            hx-swap="outerHTML"
            hx-indicator="this"
        {
            div class="htmx-indicator text-sm" aria-live="polite" { (loading_label) }
        }
    }
}

pub fn feed_end(message: &str) -> Markup {
    html! {
        p class="feed-end text-xs" aria-live="polite" { (message) }
    }
}

/// Error state: keeps what is already listed and offers a retry of the same
/// page. `swap_target` is the element the retried page replaces.
pub fn feed_error(message: &str, retry_url: &str, swap_target: &str) -> Markup {
    html! {
        div class="feed-error flex flex-col items-center gap-2" aria-live="polite" {
            p class="text-destructive text-sm" { (message) }
            button type="button" class="btn"
                hx-get=(retry_url)
                hx-target=(swap_target)
                hx-swap="outerHTML"
            { "다시 시도" }
        }
    }
}
