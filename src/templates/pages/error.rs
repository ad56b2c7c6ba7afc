use crate::domain::theme::ThemeTone;
use crate::templates::layouts::desktop::{desktop_layout, NavItem};
use maud::{html, Markup};

pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Error {status}"),
        ThemeTone::Light,
        NavItem::Home,
        html! {
            main class="container narrow" {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← 홈으로" } }
            }
        },
    )
}
