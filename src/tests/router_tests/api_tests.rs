use crate::router::handle;
use crate::state::AppState;
use crate::tests::utils::{body_json, get, test_state, DownStore, REVIEW_COUNT};

#[test]
fn api_reviews_returns_first_window_with_cursor() {
    let state = test_state();

    let resp = handle(get("/api/reviews?limit=20"), &state).expect("handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["items"].as_array().unwrap().len(), 20);
    assert_eq!(body["totalCount"], REVIEW_COUNT);
    assert_eq!(body["hasMore"], true);
    assert_eq!(body["nextOffset"], 20);
    assert_eq!(body["params"]["sort"], "latest");
    assert_eq!(body["params"]["limit"], 20);

    // latest first
    assert_eq!(body["items"][0]["id"], REVIEW_COUNT);
    assert!(body["items"][0]["annualRentLabel"].is_string());
}

#[test]
fn api_reviews_last_window_has_no_next_offset() {
    let state = test_state();

    let body = body_json(handle(get("/api/reviews?limit=20&offset=40"), &state).unwrap());
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
    assert_eq!(body["hasMore"], false);
    assert!(body["nextOffset"].is_null());
}

#[test]
fn api_reviews_filters_by_rent_type() {
    let state = test_state();

    let body = body_json(handle(get("/api/reviews?rentType=%EC%A0%84%EC%84%B8&limit=100"), &state).unwrap());
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 15);
    assert!(items.iter().all(|item| item["rent_type"] == "전세"));
    assert_eq!(body["params"]["rentType"], "전세");
}

#[test]
fn api_rejects_non_integer_limit() {
    let state = test_state();

    let resp = handle(get("/api/reviews?limit=abc"), &state).unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "\"limit\" must be an integer value.");
}

#[test]
fn api_reports_out_of_range_values_per_field() {
    let state = test_state();

    let resp = handle(get("/api/buildings?limit=101&offset=-1"), &state).unwrap();
    assert_eq!(resp.status(), 400);

    let body = body_json(resp);
    assert_eq!(body["error"], "Invalid query parameters");
    assert!(body["details"]["fieldErrors"]["limit"].is_array());
    assert!(body["details"]["fieldErrors"]["offset"].is_array());
}

#[test]
fn api_accepts_integral_floats() {
    let state = test_state();

    let body = body_json(handle(get("/api/reviews?limit=2e1"), &state).unwrap());
    assert_eq!(body["params"]["limit"], 20);
}

#[test]
fn api_upstream_failure_is_a_generic_500() {
    let state = AppState::new(DownStore);

    let resp = handle(get("/api/reviews"), &state).unwrap();
    assert_eq!(resp.status(), 500);
    assert_eq!(body_json(resp)["error"], "Failed to load reviews");

    let resp = handle(get("/api/buildings"), &state).unwrap();
    assert_eq!(resp.status(), 500);
    assert_eq!(body_json(resp)["error"], "Failed to load buildings");
}

#[test]
fn api_buildings_puts_unreviewed_after_reviewed_for_rating_sorts() {
    let state = test_state();

    for sort in ["rating_desc", "rating_asc"] {
        let body = body_json(handle(get(&format!("/api/buildings?sort={sort}")), &state).unwrap());
        let counts: Vec<i64> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["review_count"].as_i64().unwrap())
            .collect();

        let first_zero = counts.iter().position(|c| *c == 0).unwrap();
        assert!(counts[first_zero..].iter().all(|c| *c == 0), "{sort}: {counts:?}");
        assert_eq!(body["items"][4]["average_score"], 0.0);
    }
}

#[test]
fn api_buildings_unknown_sort_falls_back() {
    let state = test_state();

    let body = body_json(handle(get("/api/buildings?sort=bogus"), &state).unwrap());
    assert_eq!(body["params"]["sort"], "rating_desc");
    assert_eq!(body["items"][0]["room_name"], "한빛빌라");
}

#[test]
fn api_huge_whole_limit_is_a_range_error() {
    let state = test_state();

    let resp = handle(get("/api/reviews?limit=1e20"), &state).unwrap();
    assert_eq!(resp.status(), 400);

    let body = body_json(resp);
    assert_eq!(body["error"], "Invalid query parameters");
    assert_eq!(
        body["details"]["fieldErrors"]["limit"][0],
        "Number must be less than or equal to 100"
    );
}
