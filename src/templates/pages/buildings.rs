use crate::domain::theme::ThemeTone;
use crate::domain::BuildingListItem;
use crate::filter_panel::FilterPanel;
use crate::filters::{encode_pairs, BuildingQuery};
use crate::listing::ListPage;
use crate::templates::components::{building_filters, building_row, feed_end, feed_error, feed_sentinel};
use crate::templates::{desktop_layout, NavItem};
use maud::{html, Markup};

const LOADING: &str = "건물 정보를 불러오는 중이에요...";
const END: &str = "마지막 건물까지 모두 확인했어요.";

pub struct BuildingsVm {
    pub query: BuildingQuery,
    pub page: ListPage<BuildingListItem>,
    pub panel: FilterPanel,
    pub theme: ThemeTone,
}

pub fn building_feed_url(query: &BuildingQuery, offset: u32) -> String {
    format!("/buildings/feed?{}", encode_pairs(&query.with_offset(offset).to_pairs()))
}

/// Rows go inside a `tbody`, so the sentinel and notes are wrapped in a
/// full-width row.
fn trailing_row(content: Markup) -> Markup {
    html! {
        tr class="feed-trailer" { td colspan="4" { (content) } }
    }
}

fn feed_rows(query: &BuildingQuery, page: &ListPage<BuildingListItem>) -> Markup {
    html! {
        @for building in &page.items {
            (building_row(building))
        }
        @match page.next_offset {
            Some(next) => { (trailing_row(feed_sentinel(&building_feed_url(query, next), LOADING, "closest tr"))) }
            None => {
                @if !page.items.is_empty() || query.offset > 0 { (trailing_row(feed_end(END))) }
            }
        }
    }
}

pub fn buildings_page(vm: &BuildingsVm) -> Markup {
    desktop_layout(
        "건물",
        vm.theme,
        NavItem::Buildings,
        html! {
            main class="container flex flex-col gap-10" {
                header class="space-y-3" {
                    p class="text-sm font-medium uppercase" { "Building Index" }
                    h1 class="text-3xl font-semibold" { "건물별 지표 확인하기" }
                    p class="text-sm" {
                        "평균 평점, 리뷰 수, 연 임대료 정보를 정렬하거나 검색해 원하는 건물을 빠르게 찾아보세요."
                    }
                }

                (building_filters(&vm.query, &vm.panel, vm.page.total_count))

                section aria-label="건물 목록" class="flex flex-col gap-6" {
                    p class="text-sm summary" { (vm.query.summary_label()) }
                    table class="min-w-full" {
                        thead {
                            tr {
                                th scope="col" class="text-left" { "건물 정보" }
                                th scope="col" class="text-right" { "평점" }
                                th scope="col" class="text-right" { "리뷰 수" }
                                th scope="col" class="text-right" { "평균 연 임대료" }
                            }
                        }
                        tbody {
                            @if vm.page.items.is_empty() {
                                (trailing_row(html! { "조건에 맞는 건물 결과가 없습니다. 다른 검색어를 입력해 보세요." }))
                            }
                            (feed_rows(&vm.query, &vm.page))
                        }
                    }
                }
            }
        },
    )
}

pub fn building_feed_fragment(query: &BuildingQuery, page: Result<&ListPage<BuildingListItem>, &str>) -> Markup {
    match page {
        Ok(page) => feed_rows(query, page),
        Err(message) => trailing_row(feed_error(message, &building_feed_url(query, query.offset), "closest tr")),
    }
}
