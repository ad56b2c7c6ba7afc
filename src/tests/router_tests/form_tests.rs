use crate::router::handle;
use crate::tests::utils::{body_json, post_form, test_state};

const VALIDATE: &str = "/api/reviews/validate-step";

#[test]
fn location_step_with_new_building_passes() {
    let state = test_state();

    let form = "step=0&address=%EC%84%9C%EC%9A%B8&buildingId=__new__&newBuildingName=%ED%95%9C%EB%B9%9B%EB%B9%8C%EB%9D%BC";
    let resp = handle(post_form(VALIDATE, form), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["ok"], true);
}

#[test]
fn lease_step_requires_rent_type() {
    let state = test_state();

    let resp = handle(post_form(VALIDATE, "step=1&moveAt=2024-03"), &state).unwrap();
    assert_eq!(resp.status(), 422);

    let body = body_json(resp);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "임대 방식을 선택해 주세요.");
}

#[test]
fn monthly_lease_needs_positive_rent() {
    let state = test_state();

    // rentType=월세, deposit "1,000", rent 0
    let form = "step=1&rentType=%EC%9B%94%EC%84%B8&deposit=1%2C000&rent=0&moveAt=2024-03";
    let resp = handle(post_form(VALIDATE, form), &state).unwrap();
    assert_eq!(resp.status(), 422);
    assert_eq!(body_json(resp)["error"], "월세 금액을 올바르게 입력해 주세요.");
}

#[test]
fn unknown_step_is_rejected() {
    let state = test_state();

    let resp = handle(post_form(VALIDATE, "step=7"), &state).unwrap();
    assert_eq!(resp.status(), 422);
    assert_eq!(body_json(resp)["error"], "알 수 없는 단계입니다.");
}

#[test]
fn passing_step_names_the_next_one() {
    let state = test_state();

    let form = "step=2&score=4.5&context=%EC%A2%8B%EC%95%84%EC%9A%94";
    let body = body_json(handle(post_form(VALIDATE, form), &state).unwrap());
    assert_eq!(body["ok"], true);
    assert_eq!(body["title"], "리뷰 작성");
    assert!(body["next"].is_null());
}

#[test]
fn submission_reports_every_problem() {
    let state = test_state();

    // 전세 with a monthly rent and a score off the half-point grid
    let form = "step=submit&address=%EC%84%9C%EC%9A%B8&buildingId=4\
                &rentType=%EC%A0%84%EC%84%B8&deposit=15000&rent=30&moveAt=2024-03&score=4.3";
    let resp = handle(post_form(VALIDATE, form), &state).unwrap();
    assert_eq!(resp.status(), 422);

    let body = body_json(resp);
    assert_eq!(body["ok"], false);
    let errors: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e.as_str())
        .collect();
    assert_eq!(
        errors,
        ["전세에서는 월세를 입력할 수 없습니다.", "평점은 0.5점 단위여야 합니다."]
    );
}

#[test]
fn valid_submission_passes() {
    let state = test_state();

    let form = "step=submit&address=%EC%84%9C%EC%9A%B8&buildingId=4\
                &rentType=%EC%A0%84%EC%84%B8&deposit=15000&moveAt=2024-03&score=4.5";
    let resp = handle(post_form(VALIDATE, form), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["ok"], true);
}

#[test]
fn submission_without_rent_type_is_rejected() {
    let state = test_state();

    let resp = handle(post_form(VALIDATE, "step=submit&address=%EC%84%9C%EC%9A%B8"), &state).unwrap();
    assert_eq!(resp.status(), 422);
    assert_eq!(body_json(resp)["errors"][0], "임대 방식을 선택해 주세요.");
}
