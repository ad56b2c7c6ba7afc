// templates/pages/home.rs

use crate::domain::theme::ThemeTone;
use crate::domain::ReviewListItem;
use crate::templates::{
    components::{error_notice, panel, review_card},
    desktop_layout, NavItem,
};
use maud::{html, Markup};

/// `recent` is `Err(message)` when the latest reviews could not be loaded;
/// the rest of the page still renders.
pub fn home_page(recent: Result<&[ReviewListItem], &str>, theme: ThemeTone) -> Markup {
    desktop_layout(
        "홈",
        theme,
        NavItem::Home,
        html! {
            main class="container" {
                section class="hero" {
                    h1 { "자취방, 살아본 사람에게 물어보세요" }
                    p class="lead" { "실제 거주자들이 남긴 후기와 임대료 정보를 확인해 보세요." }
                    div class="flex gap-2" {
                        a href="/reviews" class="btn primary" { "리뷰 둘러보기" }
                        a href="/buildings" class="btn" { "건물 지표 보기" }
                    }
                }

                (panel("최근 리뷰", Some(("/reviews", "전체 보기")), html! {
                    @match recent {
                        Ok([]) => {
                            p class="text-sm" { "아직 등록된 리뷰가 없습니다." }
                        }
                        Ok(items) => {
                            div class="review-grid" {
                                @for item in items { (review_card(item)) }
                            }
                        }
                        Err(message) => { (error_notice(message)) }
                    }
                }))
            }
        },
    )
}
