use crate::errors::ServerError;
use crate::router::handle;
use crate::state::AppState;
use crate::tests::utils::{body_string, get, test_state, DownStore};

fn feed_keys(body: &str) -> usize {
    body.matches("data-feed-key=").count()
}

#[test]
fn home_shows_four_latest_reviews() {
    let state = test_state();

    let resp = handle(get("/"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert_eq!(feed_keys(&body), 4);
    assert!(body.contains("리뷰 45"));
    assert!(body.contains("href=\"/reviews\" class=\"text-sm link\""));
}

#[test]
fn home_still_renders_when_reviews_fail() {
    let state = AppState::new(DownStore);

    let resp = handle(get("/"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("최근 리뷰를 불러오지 못했습니다."));
}

#[test]
fn reviews_page_ignores_bad_limit() {
    let state = test_state();

    let resp = handle(get("/reviews?limit=abc&offset=40"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert_eq!(feed_keys(&body), 20);
    // the page route always starts at the top; the sentinel points at the next window
    assert!(body.contains("/reviews/feed?sort=latest&amp;limit=20&amp;offset=20"));
}

#[test]
fn reviews_page_honours_a_valid_limit() {
    let state = test_state();

    let body = body_string(handle(get("/reviews?limit=5"), &state).unwrap());
    assert_eq!(feed_keys(&body), 5);
    assert!(body.contains("/reviews/feed?sort=latest&amp;limit=5&amp;offset=5"));
}

#[test]
fn reviews_page_lists_active_filters() {
    let state = test_state();

    let body = body_string(handle(get("/reviews?sort=rating_desc&q=%ED%95%9C%EB%B9%9B"), &state).unwrap());
    assert!(body.contains("현재 정렬: 평점 높은 순"));
    assert!(body.contains("검색어 &quot;한빛&quot;"));
}

#[test]
fn review_feed_appends_next_window_and_sentinel() {
    let state = test_state();

    let body = body_string(handle(get("/reviews/feed?limit=20&offset=20"), &state).unwrap());
    assert_eq!(feed_keys(&body), 20);
    assert!(body.contains("offset=40"));
    assert!(!body.contains("<html"));
}

#[test]
fn review_feed_ends_on_the_last_window() {
    let state = test_state();

    let body = body_string(handle(get("/reviews/feed?limit=20&offset=40"), &state).unwrap());
    assert_eq!(feed_keys(&body), 5);
    assert!(body.contains("마지막 리뷰까지 모두 확인했어요."));
    assert!(!body.contains("hx-trigger=\"revealed\""));
}

#[test]
fn review_feed_failure_offers_retry_of_same_offset() {
    let state = AppState::new(DownStore);

    let resp = handle(get("/reviews/feed?limit=20&offset=20"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("리뷰 데이터를 더 불러오지 못했습니다."));
    assert!(body.contains("다시 시도"));
    assert!(body.contains("offset=20"));
}

#[test]
fn review_feed_rejects_bad_limit() {
    let state = test_state();

    let err = handle(get("/reviews/feed?limit=abc"), &state).unwrap_err();
    assert!(matches!(err, ServerError::InvalidParam { field: "limit" }));
}

#[test]
fn buildings_page_renders_table_rows() {
    let state = test_state();

    let body = body_string(handle(get("/buildings"), &state).unwrap());
    assert_eq!(feed_keys(&body), 5);
    assert!(body.contains("마지막 건물까지 모두 확인했어요."));
}

#[test]
fn buildings_page_empty_search_says_so() {
    let state = test_state();

    let body = body_string(handle(get("/buildings?q=zzz"), &state).unwrap());
    assert_eq!(feed_keys(&body), 0);
    assert!(body.contains("조건에 맞는 건물 결과가 없습니다. 다른 검색어를 입력해 보세요."));
}

#[test]
fn page_upstream_failure_is_an_error() {
    let state = AppState::new(DownStore);

    let err = handle(get("/buildings"), &state).unwrap_err();
    assert_eq!(err.status(), 500);
}

#[test]
fn unknown_route_is_not_found() {
    let state = test_state();
    assert!(matches!(handle(get("/nope"), &state), Err(ServerError::NotFound)));
}

#[test]
fn healthz_answers_ok() {
    let state = test_state();
    assert_eq!(body_string(handle(get("/healthz"), &state).unwrap()), "ok");
}
