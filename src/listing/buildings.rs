use super::{decode_rows, upstream_error, ListPage};
use crate::domain::{BuildingListItem, BuildingSummary};
use crate::errors::ServerError;
use crate::filters::{BuildingQuery, BuildingSort};
use crate::store::{ListStore, Order, ViewQuery, BUILDINGS_VIEW};

const LOAD_FAILED: &str = "건물 목록을 불러오는 중 오류가 발생했습니다";

fn building_order(sort: BuildingSort) -> Order {
    match sort {
        BuildingSort::RatingDesc => Order::desc("average_score"),
        BuildingSort::RatingAsc => Order::asc("average_score"),
        BuildingSort::RentDesc => Order::desc("average_annual_rent"),
        BuildingSort::RentAsc => Order::asc("average_annual_rent"),
        BuildingSort::ReviewCountDesc => Order::desc("review_count"),
    }
}

pub fn building_view_query(q: &BuildingQuery) -> ViewQuery {
    let mut query = ViewQuery::new(BUILDINGS_VIEW).range(q.offset, q.limit);

    if let Some(search) = &q.search {
        query = query.contains("room_name", search.as_str());
    }

    query.order(building_order(q.sort))
}

/// Stable partition: reviewed buildings first, unreviewed after, each group
/// in its original order. Only ever applied to one fetched page, so the
/// ordering across pages is not global.
pub fn unreviewed_last(items: Vec<BuildingListItem>) -> Vec<BuildingListItem> {
    let (mut reviewed, unreviewed): (Vec<_>, Vec<_>) =
        items.into_iter().partition(BuildingListItem::has_reviews);
    reviewed.extend(unreviewed);
    reviewed
}

pub fn fetch_buildings(
    store: &dyn ListStore,
    q: &BuildingQuery,
) -> Result<ListPage<BuildingListItem>, ServerError> {
    let page = store
        .select(&building_view_query(q))
        .map_err(|e| upstream_error(LOAD_FAILED, e))?;
    let total_count = page.total_count;

    let mut items: Vec<BuildingListItem> = decode_rows::<BuildingSummary>(page, LOAD_FAILED)?
        .into_iter()
        .map(BuildingListItem::from)
        .collect();

    if q.sort.is_rating() {
        items = unreviewed_last(items);
    }

    Ok(ListPage::from_window(items, q.offset, q.limit, total_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn building(id: i64, score: Option<f64>, reviews: i64) -> serde_json::Value {
        json!({
            "room_id": id,
            "room_name": format!("건물{id}"),
            "room_address": "서울 관악구",
            "room_postcode": null,
            "average_score": score,
            "review_count": reviews,
            "average_annual_rent": null
        })
    }

    fn item(id: i64, reviews: i64) -> BuildingListItem {
        BuildingListItem {
            room_id: id,
            room_name: String::new(),
            room_address: String::new(),
            room_postcode: None,
            average_score: 0.0,
            review_count: reviews,
            average_annual_rent: None,
        }
    }

    #[test]
    fn partition_is_stable() {
        let items = vec![item(1, 0), item(2, 3), item(3, 0), item(4, 1), item(5, 2)];
        let ids: Vec<i64> = unreviewed_last(items).iter().map(|b| b.room_id).collect();
        assert_eq!(ids, vec![2, 4, 5, 1, 3]);
    }

    #[test]
    fn rating_sort_pushes_unreviewed_down_within_page() {
        // A zero score with zero reviews sorts above a 0-score reviewed room upstream.
        let store = MemoryStore::new().with_view(
            BUILDINGS_VIEW,
            vec![
                building(1, Some(4.0), 2),
                building(2, Some(0.0), 0),
                building(3, Some(0.0), 1),
                building(4, None, 0),
            ],
        );
        let q = BuildingQuery {
            sort: BuildingSort::RatingAsc,
            ..BuildingQuery::default()
        };
        let page = fetch_buildings(&store, &q).unwrap();
        let ids: Vec<i64> = page.items.iter().map(|b| b.room_id).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
        assert_eq!(page.items[3].average_score, 0.0);
    }

    #[test]
    fn reordering_is_local_to_each_page() {
        let store = MemoryStore::new().with_view(
            BUILDINGS_VIEW,
            vec![
                building(1, Some(5.0), 0),
                building(2, Some(4.0), 3),
                building(3, Some(3.0), 2),
                building(4, Some(2.0), 0),
            ],
        );
        let first = fetch_buildings(
            &store,
            &BuildingQuery {
                limit: 2,
                ..BuildingQuery::default()
            },
        )
        .unwrap();
        let second = fetch_buildings(
            &store,
            &BuildingQuery {
                limit: 2,
                offset: 2,
                ..BuildingQuery::default()
            },
        )
        .unwrap();

        let ids: Vec<i64> = first
            .items
            .iter()
            .chain(second.items.iter())
            .map(|b| b.room_id)
            .collect();
        // Building 1 stays ahead of building 3 even though it has no reviews.
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[test]
    fn review_count_sort_keeps_store_order() {
        let store = MemoryStore::new().with_view(
            BUILDINGS_VIEW,
            vec![building(1, None, 0), building(2, Some(3.0), 5)],
        );
        let q = BuildingQuery {
            sort: BuildingSort::ReviewCountDesc,
            ..BuildingQuery::default()
        };
        let page = fetch_buildings(&store, &q).unwrap();
        let ids: Vec<i64> = page.items.iter().map(|b| b.room_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
