use crate::domain::rent::group_digits;
use crate::domain::RentType;
use crate::filter_panel::FilterPanel;
use crate::filters::{BuildingQuery, BuildingSort, ReviewQuery, ReviewSort, SortOption};
use maud::{html, Markup};

/// Link that swaps the page's `main` in place and replaces the history entry.
fn filter_link(href: &str, label: &str, active: bool) -> Markup {
    html! {
        a href=(href)
            class=(if active { "chip active" } else { "chip" })
            aria-current=[active.then_some("true")]
            hx-get=(href)
            hx-target="main"
            hx-select="main"
            hx-swap="outerHTML"
            hx-replace-url="true"
        { (label) }
    }
}

fn search_form(action: &str, placeholder: &str, current: Option<&str>, keep: &[(&str, &str)]) -> Markup {
    html! {
        form method="get" action=(action)
            hx-get=(action)
            hx-target="main"
            hx-select="main"
            hx-swap="outerHTML"
            hx-replace-url="true"
            class="flex gap-2"
        {
            @for (name, value) in keep {
                input type="hidden" name=(name) value=(value);
            }
            input type="search" name="q" placeholder=(placeholder) value=[current] aria-label=(placeholder);
            button type="submit" class="btn" { "검색" }
        }
    }
}

pub fn review_filters(query: &ReviewQuery, panel: &FilterPanel, total_count: u64) -> Markup {
    let mut keep: Vec<(&str, &str)> = vec![("sort", query.sort.as_str())];
    if let Some(rent_type) = query.rent_type {
        keep.push(("rentType", rent_type.as_str()));
    }

    html! {
        section class="filters flex flex-col gap-4" {
            p class="text-sm" {
                "총 " strong { (group_digits(total_count as i64)) } "건의 리뷰가 있습니다."
            }
            div class="chips" role="group" aria-label="정렬 기준 선택" {
                @for sort in ReviewSort::ALL {
                    (filter_link(&panel.set("sort", Some(sort.as_str())), sort.label(), *sort == query.sort))
                }
            }
            div class="chips" role="group" aria-label="임대 방식 선택" {
                (filter_link(&panel.set("rentType", None), "전체", query.rent_type.is_none()))
                @for rent_type in RentType::ALL {
                    (filter_link(&panel.set("rentType", Some(rent_type.as_str())), rent_type.as_str(), query.rent_type == Some(rent_type)))
                }
            }
            div class="flex gap-2" {
                (search_form("/reviews", "건물 이름으로 리뷰를 검색하세요", query.search.as_deref(), &keep))
                (filter_link(&panel.clear(&["q", "rentType", "sort"]), "초기화", false))
            }
        }
    }
}

pub fn building_filters(query: &BuildingQuery, panel: &FilterPanel, total_count: u64) -> Markup {
    let keep = [("sort", query.sort.as_str())];

    html! {
        section class="filters flex flex-col gap-4" {
            p class="text-sm" {
                "총 " strong { (group_digits(total_count as i64)) } "건의 건물 정보가 있습니다."
            }
            div class="chips" role="group" aria-label="정렬 기준 선택" {
                @for sort in BuildingSort::ALL {
                    (filter_link(&panel.set("sort", Some(sort.as_str())), sort.label(), *sort == query.sort))
                }
            }
            div class="flex gap-2" {
                (search_form("/buildings", "건물 이름을 검색하세요", query.search.as_deref(), &keep))
                (filter_link(&panel.clear(&["q", "sort"]), "초기화", false))
            }
        }
    }
}
