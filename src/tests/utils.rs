use crate::state::AppState;
use crate::store::{ListStore, MemoryStore, StoreError, ViewPage, ViewQuery, BUILDINGS_VIEW, REVIEWS_VIEW};
use astra::{Body, Request, Response};
use http::Method;
use serde_json::{json, Value};
use std::io::Read;

pub const REVIEW_COUNT: i64 = 45;

fn review_row(id: i64) -> Value {
    let rent_type = ["월세", "전세", "사글세"][(id % 3) as usize];
    json!({
        "id": id,
        "created_at": format!("2024-03-01T{:02}:{:02}:00Z", id / 60, id % 60),
        "room_id": 100 + id % 5,
        "room_name": format!("한빛빌라{}", id % 5),
        "room_address": "서울 관악구 신림로 1",
        "room_postcode": "08826",
        "score": (id % 10) as f64 / 2.0 + 0.5,
        "rent_type": rent_type,
        "annual_rent": if id % 7 == 0 { Value::Null } else { json!(600 + id * 10) },
        "deposit": 500,
        "rent": 50,
        "move_at": "2023-09",
        "floor": "3",
        "context": format!("리뷰 {id}"),
    })
}

fn building_row(room_id: i64, name: &str, average: Option<f64>, count: i64) -> Value {
    json!({
        "room_id": room_id,
        "room_name": name,
        "room_address": "서울 관악구 신림로 1",
        "room_postcode": null,
        "average_score": average,
        "review_count": count,
        "average_annual_rent": if count > 0 { json!(720) } else { Value::Null },
    })
}

/// 45 reviews and a handful of buildings, two of them without reviews.
pub fn fixture_store() -> MemoryStore {
    MemoryStore::new()
        .with_view(REVIEWS_VIEW, (1..=REVIEW_COUNT).map(review_row).collect())
        .with_view(
            BUILDINGS_VIEW,
            vec![
                building_row(1, "새빛원룸", None, 0),
                building_row(2, "한빛빌라", Some(4.5), 12),
                building_row(3, "달빛하우스", Some(3.0), 4),
                building_row(4, "별빛아파트", None, 0),
                building_row(5, "햇빛타워", Some(4.0), 7),
            ],
        )
}

pub fn test_state() -> AppState {
    AppState::new(fixture_store())
}

/// A store whose backend is always down.
pub struct DownStore;

impl ListStore for DownStore {
    fn select(&self, _query: &ViewQuery) -> Result<ViewPage, StoreError> {
        Err(StoreError::Transport("connection refused".into()))
    }
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, form: &str) -> Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> Value {
    serde_json::from_str(&body_string(resp)).expect("response is not JSON")
}
