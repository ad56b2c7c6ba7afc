use crate::domain::ReviewListItem;
use maud::{html, Markup};

fn detail(label: &str, value: &str) -> Markup {
    html! {
        div class="detail" {
            dt class="text-xs uppercase" { (label) }
            dd class="font-medium" { (value) }
        }
    }
}

pub fn review_card(item: &ReviewListItem) -> Markup {
    let review = &item.summary;

    html! {
        article class="card review-card" id=(format!("review-{}", review.id)) data-feed-key=(review.id) {
            header class="flex items-center justify-between gap-2" {
                h3 class="text-lg font-semibold" { (review.room_name) }
                span class="text-xs" { (item.created_date()) }
            }
            p class="text-sm address" {
                a href=(format!("/buildings?q={}", url::form_urlencoded::byte_serialize(review.room_name.as_bytes()).collect::<String>())) {
                    (review.room_address)
                }
            }
            dl class="grid grid-cols-2 gap-3 text-sm" {
                (detail("평점", &item.score_label()))
                (detail("입주 시기", &review.move_at))
                @if let Some(floor) = &review.floor {
                    (detail("층", floor))
                }
                (detail("임대 방식", review.rent_type.as_str()))
                @if let Some(label) = &item.annual_rent_label {
                    (detail("연 임대료", label))
                }
            }
            @match review.context.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
                Some(text) => p class="review-context whitespace-pre-line" { (text) },
                None => p class="review-context empty" { "작성된 리뷰 내용이 없습니다." },
            }
        }
    }
}
