use super::{decode_rows, upstream_error, ListPage};
use crate::domain::{ReviewListItem, ReviewSummary};
use crate::errors::ServerError;
use crate::filters::{ReviewQuery, ReviewSort};
use crate::store::{ListStore, Order, ViewQuery, REVIEWS_VIEW};

const LOAD_FAILED: &str = "리뷰 데이터를 불러오지 못했습니다";

fn review_order(sort: ReviewSort) -> Order {
    match sort {
        ReviewSort::Latest => Order::desc("created_at"),
        ReviewSort::RatingDesc => Order::desc("score"),
        ReviewSort::RatingAsc => Order::asc("score"),
        ReviewSort::RentDesc => Order::desc("annual_rent"),
        ReviewSort::RentAsc => Order::asc("annual_rent"),
    }
}

pub fn review_view_query(q: &ReviewQuery) -> ViewQuery {
    let mut query = ViewQuery::new(REVIEWS_VIEW).range(q.offset, q.limit);

    if let Some(rent_type) = q.rent_type {
        query = query.eq("rent_type", rent_type.as_str());
    }
    if let Some(search) = &q.search {
        query = query.contains("room_name", search.as_str());
    }

    query.order(review_order(q.sort))
}

pub fn fetch_reviews(
    store: &dyn ListStore,
    q: &ReviewQuery,
) -> Result<ListPage<ReviewListItem>, ServerError> {
    let page = store
        .select(&review_view_query(q))
        .map_err(|e| upstream_error(LOAD_FAILED, e))?;
    let total_count = page.total_count;

    let items = decode_rows::<ReviewSummary>(page, LOAD_FAILED)?
        .into_iter()
        .map(ReviewListItem::from)
        .collect();

    Ok(ListPage::from_window(items, q.offset, q.limit, total_count))
}
