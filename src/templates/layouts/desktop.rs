use crate::domain::theme::ThemeTone;
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Drops feed items whose key already appeared earlier on the page,
/// keeping the first occurrence, after each htmx swap.
const FEED_DEDUP_SCRIPT: &str = r#"document.addEventListener("htmx:afterSwap",function(){var seen=new Set();document.querySelectorAll("[data-feed-key]").forEach(function(el){var k=el.dataset.feedKey;if(seen.has(k)){el.remove()}else{seen.add(k)}})});"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Reviews,
    Buildings,
}

pub fn desktop_layout(title: &str, theme: ThemeTone, active: NavItem, content: Markup) -> Markup {
    let nav_class = |item: NavItem| if item == active { "nav-link active" } else { "nav-link" };

    html! {
        (DOCTYPE)
        html lang="ko" class=[(theme == ThemeTone::Dark).then_some("dark")] data-theme=(theme.as_str()) style=(format!("color-scheme: {}", theme.as_str())) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · seof" }
                link rel="icon" href="/static/favicon/favicon.ico";
                link rel="stylesheet" href="/static/main.css";
                script src="/static/htmx.js" defer {};
                script { (PreEscaped(FEED_DEDUP_SCRIPT)) }
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    a href="/" class="brand" { "seof" }
                    nav {
                        ul {
                            li { a href="/" class=(nav_class(NavItem::Home)) { "홈" } }
                            li { a href="/reviews" class=(nav_class(NavItem::Reviews)) { "리뷰" } }
                            li { a href="/buildings" class=(nav_class(NavItem::Buildings)) { "건물" } }
                        }
                    }
                    form method="post" action="/theme" class="theme-toggle" {
                        input type="hidden" name="mode" value="toggle";
                        button type="submit" aria-label="테마 전환" {
                            @if theme == ThemeTone::Dark { "☀" } @else { "☾" }
                        }
                    }
                }
                (content)
            }
        }
    }
}
