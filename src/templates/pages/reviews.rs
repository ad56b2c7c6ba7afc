use crate::domain::theme::ThemeTone;
use crate::domain::ReviewListItem;
use crate::filter_panel::FilterPanel;
use crate::filters::{encode_pairs, ReviewQuery};
use crate::listing::ListPage;
use crate::templates::components::{feed_end, feed_error, feed_sentinel, review_card, review_filters};
use crate::templates::{desktop_layout, NavItem};
use maud::{html, Markup};

const LOADING: &str = "리뷰를 불러오는 중이에요...";
const END: &str = "마지막 리뷰까지 모두 확인했어요.";

pub struct ReviewsVm {
    pub query: ReviewQuery,
    pub page: ListPage<ReviewListItem>,
    pub panel: FilterPanel,
    pub theme: ThemeTone,
}

pub fn review_feed_url(query: &ReviewQuery, offset: u32) -> String {
    format!("/reviews/feed?{}", encode_pairs(&query.with_offset(offset).to_pairs()))
}

/// Cards of one page followed by whatever comes next: a sentinel for the
/// following page, or the end-of-list note.
fn feed_items(query: &ReviewQuery, page: &ListPage<ReviewListItem>) -> Markup {
    html! {
        @for item in &page.items {
            (review_card(item))
        }
        @match page.next_offset {
            Some(next) => { (feed_sentinel(&review_feed_url(query, next), LOADING, "this")) }
            None => {
                @if !page.items.is_empty() || query.offset > 0 { (feed_end(END)) }
            }
        }
    }
}

pub fn reviews_page(vm: &ReviewsVm) -> Markup {
    desktop_layout(
        "리뷰",
        vm.theme,
        NavItem::Reviews,
        html! {
            main class="container flex flex-col gap-6" {
                header class="space-y-3" {
                    p class="text-sm font-medium uppercase" { "Review Archive" }
                    h1 class="text-3xl font-semibold" { "자취방 리뷰 한눈에 보기" }
                    p class="text-sm" {
                        "실제 거주자들이 남긴 후기와 임대료 정보를 확인하고, 조건에 맞게 정렬하거나 검색해 보세요."
                    }
                }

                (review_filters(&vm.query, &vm.panel, vm.page.total_count))

                section aria-label="리뷰 목록" class="space-y-3" {
                    p class="text-sm summary" { (vm.query.summary_label()) }
                    @if vm.page.items.is_empty() {
                        p class="empty" { "조건에 맞는 리뷰가 없습니다. 다른 조건으로 검색해 보세요." }
                    }
                    div class="review-list" {
                        (feed_items(&vm.query, &vm.page))
                    }
                }
            }
        },
    )
}

/// htmx response for the sentinel: the next cards, or an error with a
/// retry of the same window.
pub fn review_feed_fragment(query: &ReviewQuery, page: Result<&ListPage<ReviewListItem>, &str>) -> Markup {
    match page {
        Ok(page) => feed_items(query, page),
        Err(message) => feed_error(message, &review_feed_url(query, query.offset), "closest .feed-error"),
    }
}
