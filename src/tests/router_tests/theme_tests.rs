use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, post_form, test_state};

fn header(resp: &astra::Response, name: &str) -> String {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

#[test]
fn setting_dark_sets_cookie_and_redirects_back() {
    let state = test_state();

    let mut req = post_form("/theme", "mode=dark");
    req.headers_mut()
        .insert("Referer", "http://localhost:3000/reviews?sort=rent_asc".parse().unwrap());

    let resp = handle(req, &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/reviews?sort=rent_asc");
    assert!(header(&resp, "Set-Cookie").starts_with("seof-theme=dark;"));
}

#[test]
fn toggle_flips_the_resolved_theme() {
    let state = test_state();

    let mut req = post_form("/theme", "mode=toggle");
    req.headers_mut().insert("Cookie", "seof-theme=dark".parse().unwrap());

    let resp = handle(req, &state).unwrap();
    assert_eq!(header(&resp, "Location"), "/");
    assert!(header(&resp, "Set-Cookie").starts_with("seof-theme=light;"));
}

#[test]
fn following_system_clears_the_cookie() {
    let state = test_state();

    let resp = handle(post_form("/theme", "mode=system"), &state).unwrap();
    assert!(header(&resp, "Set-Cookie").contains("Max-Age=0"));
}

#[test]
fn unknown_mode_is_bad_request() {
    let state = test_state();

    let err = handle(post_form("/theme", "mode=sepia"), &state).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn stored_cookie_wins_over_client_hint() {
    let state = test_state();

    let mut req = get("/");
    req.headers_mut().insert("Cookie", "other=1; seof-theme=light".parse().unwrap());
    req.headers_mut()
        .insert("Sec-CH-Prefers-Color-Scheme", "dark".parse().unwrap());

    let body = body_string(handle(req, &state).unwrap());
    assert!(body.contains("data-theme=\"light\""));
}

#[test]
fn client_hint_applies_without_cookie() {
    let state = test_state();

    let mut req = get("/reviews");
    req.headers_mut()
        .insert("Sec-CH-Prefers-Color-Scheme", "dark".parse().unwrap());

    let body = body_string(handle(req, &state).unwrap());
    assert!(body.contains("data-theme=\"dark\""));
}
