use crate::domain::rent::group_digits;
use crate::domain::BuildingListItem;
use maud::{html, Markup};

pub fn building_row(building: &BuildingListItem) -> Markup {
    let reviews_href = format!(
        "/reviews?q={}",
        url::form_urlencoded::byte_serialize(building.room_name.as_bytes()).collect::<String>()
    );

    html! {
        tr data-feed-key=(building.room_id) id=(format!("building-{}", building.room_id)) {
            th scope="row" class="text-left align-top" {
                a href=(reviews_href) aria-label=(format!("{} 리뷰 보기", building.room_name)) {
                    span class="font-semibold" { (building.room_name) }
                }
                p class="text-xs" {
                    (building.room_address)
                    @if let Some(postcode) = &building.room_postcode {
                        " (" (postcode) ")"
                    }
                }
            }
            td class="px-4 py-4 text-right font-semibold" {
                @if building.has_reviews() {
                    (format!("{:.1}", building.average_score))
                } @else {
                    "-"
                }
            }
            td class="px-4 py-4 text-right" { (building.review_count) }
            td class="px-4 py-4 text-right" {
                @match building.average_annual_rent {
                    Some(rent) => (format!("{}만원", group_digits(rent.round() as i64))),
                    None => "-",
                }
            }
        }
    }
}
