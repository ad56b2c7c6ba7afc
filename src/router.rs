use crate::domain::review_form::{ReviewFormStep, ReviewPayload, StepError};
use crate::domain::theme::{system_hint, CookiePreference, ThemeAction, ThemeManager, ThemeTone};
use crate::errors::ServerError;
use crate::filter_panel::FilterPanel;
use crate::filters::{BuildingQuery, RawParams, ReviewQuery};
use crate::listing::{fetch_buildings, fetch_reviews, ListPage};
use crate::responses::{
    html_response, json_error_response, json_response, redirect_response, text_response, ResultResp,
};
use crate::state::AppState;
use crate::templates::pages::{self, BuildingsVm, ReviewsVm};
use astra::Request;
use serde::Serialize;
use serde_json::json;
use std::io::Read;
use tracing::{debug, warn};

const HOME_REVIEW_COUNT: u32 = 4;
const MAX_FORM_BYTES: u64 = 64 * 1024;
const RECENT_FAILED: &str = "최근 리뷰를 불러오지 못했습니다.";
const REVIEW_FEED_FAILED: &str = "리뷰 데이터를 더 불러오지 못했습니다.";
const BUILDING_FEED_FAILED: &str = "건물 데이터를 더 불러오지 못했습니다.";

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => home(&req, state),
        ("GET", "/reviews") => reviews_page(&req, state),
        ("GET", "/buildings") => buildings_page(&req, state),
        ("GET", "/reviews/feed") => review_feed(&req, state),
        ("GET", "/buildings/feed") => building_feed(&req, state),
        ("GET", "/api/reviews") => Ok(api_reviews(&req, state)
            .unwrap_or_else(|err| json_error_response(err, "reviews"))),
        ("GET", "/api/buildings") => Ok(api_buildings(&req, state)
            .unwrap_or_else(|err| json_error_response(err, "buildings"))),
        ("POST", "/theme") => set_theme(req),
        ("POST", "/api/reviews/validate-step") => validate_step(req),
        ("GET", "/healthz") => text_response(200, "ok"),
        _ => Err(ServerError::NotFound),
    }
}

fn header<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

fn query_params(req: &Request) -> RawParams {
    RawParams::from_query(req.uri().query())
}

fn read_form(req: Request) -> Result<RawParams, ServerError> {
    let mut body = String::new();
    req.into_body()
        .reader()
        .take(MAX_FORM_BYTES)
        .read_to_string(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("could not read form body: {e}")))?;
    Ok(RawParams::from_query(Some(&body)))
}

/// Stored cookie first, then the client hint, then light.
fn theme_manager(req: &Request) -> ThemeManager<CookiePreference> {
    ThemeManager::new(
        CookiePreference::from_cookie_header(header(req, "Cookie")),
        system_hint(header(req, "Sec-CH-Prefers-Color-Scheme")),
    )
}

fn theme(req: &Request) -> ThemeTone {
    theme_manager(req).resolved()
}

// ---- pages ----

fn home(req: &Request, state: &AppState) -> ResultResp {
    let query = ReviewQuery {
        limit: HOME_REVIEW_COUNT,
        ..ReviewQuery::default()
    };
    let markup = match fetch_reviews(state.store(), &query) {
        Ok(page) => pages::home_page(Ok(page.items.as_slice()), theme(req)),
        Err(_) => pages::home_page(Err(RECENT_FAILED), theme(req)),
    };
    html_response(markup)
}

fn reviews_page(req: &Request, state: &AppState) -> ResultResp {
    let query = ReviewQuery::from_page_params(&query_params(req));
    let page = fetch_reviews(state.store(), &query)?;

    html_response(pages::reviews_page(&ReviewsVm {
        panel: FilterPanel::new("/reviews", req.uri().query()),
        query,
        page,
        theme: theme(req),
    }))
}

fn buildings_page(req: &Request, state: &AppState) -> ResultResp {
    let query = BuildingQuery::from_page_params(&query_params(req));
    let page = fetch_buildings(state.store(), &query)?;

    html_response(pages::buildings_page(&BuildingsVm {
        panel: FilterPanel::new("/buildings", req.uri().query()),
        query,
        page,
        theme: theme(req),
    }))
}

// ---- htmx fragments ----

// Upstream failures render as a 200 fragment so htmx swaps in the retry
// control in place of the sentinel.

fn review_feed(req: &Request, state: &AppState) -> ResultResp {
    let query = ReviewQuery::from_api_params(&query_params(req))?;
    let markup = match fetch_reviews(state.store(), &query) {
        Ok(page) => pages::review_feed_fragment(&query, Ok(&page)),
        Err(err) => {
            warn!(error = %err, offset = query.offset, "review feed page failed");
            pages::review_feed_fragment(&query, Err(REVIEW_FEED_FAILED))
        }
    };
    html_response(markup)
}

fn building_feed(req: &Request, state: &AppState) -> ResultResp {
    let query = BuildingQuery::from_api_params(&query_params(req))?;
    let markup = match fetch_buildings(state.store(), &query) {
        Ok(page) => pages::building_feed_fragment(&query, Ok(&page)),
        Err(err) => {
            warn!(error = %err, offset = query.offset, "building feed page failed");
            pages::building_feed_fragment(&query, Err(BUILDING_FEED_FAILED))
        }
    };
    html_response(markup)
}

// ---- JSON ----

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiPage<'a, T, Q> {
    items: &'a [T],
    total_count: u64,
    has_more: bool,
    next_offset: Option<u32>,
    params: &'a Q,
}

impl<'a, T, Q> ApiPage<'a, T, Q> {
    fn new(page: &'a ListPage<T>, params: &'a Q) -> Self {
        Self {
            items: &page.items,
            total_count: page.total_count,
            has_more: page.has_more,
            next_offset: page.next_offset,
            params,
        }
    }
}

fn api_reviews(req: &Request, state: &AppState) -> ResultResp {
    let query = ReviewQuery::from_api_params(&query_params(req))?;
    let page = fetch_reviews(state.store(), &query)?;
    json_response(200, &ApiPage::new(&page, &query))
}

fn api_buildings(req: &Request, state: &AppState) -> ResultResp {
    let query = BuildingQuery::from_api_params(&query_params(req))?;
    let page = fetch_buildings(state.store(), &query)?;
    json_response(200, &ApiPage::new(&page, &query))
}

// ---- forms ----

/// Path (and query) of a `Referer` value; anything else goes home.
fn back_location(referer: Option<&str>) -> String {
    referer
        .and_then(|r| url::Url::parse(r).ok())
        .map(|u| match u.query() {
            Some(q) => format!("{}?{q}", u.path()),
            None => u.path().to_string(),
        })
        .unwrap_or_else(|| "/".to_string())
}

fn set_theme(req: Request) -> ResultResp {
    let mut manager = theme_manager(&req);
    let location = back_location(header(&req, "Referer"));
    let form = read_form(req)?;

    let mode = form.first("mode").unwrap_or("");
    let action = ThemeAction::parse(mode)
        .ok_or_else(|| ServerError::BadRequest(format!("unknown theme mode: {mode:?}")))?;
    action.apply(&mut manager);

    let cookie = manager.into_store().set_cookie_header();
    redirect_response(&location, cookie.as_deref())
}

/// `step=<index>` checks one step and names the next; `step=submit` runs the
/// full submission rules and reports every problem at once.
fn validate_step(req: Request) -> ResultResp {
    let form = read_form(req)?;

    if form.first("step").map(str::trim) == Some("submit") {
        return validate_submission(&form);
    }

    let result = form
        .first("step")
        .and_then(|s| s.trim().parse::<usize>().ok())
        .ok_or_else(|| StepError("알 수 없는 단계입니다.".to_string()))
        .and_then(|index| ReviewFormStep::from_form(index, &form))
        .and_then(|step| step.validate().map(|()| step));

    match result {
        Ok(step) => json_response(
            200,
            &json!({ "ok": true, "title": step.title(), "next": step.next_title() }),
        ),
        Err(StepError(message)) => json_response(422, &json!({ "ok": false, "error": message })),
    }
}

fn validate_submission(form: &RawParams) -> ResultResp {
    let result = ReviewPayload::from_form(form)
        .map_err(|StepError(message)| vec![message])
        .and_then(|payload| payload.validate());

    match result {
        Ok(()) => json_response(200, &json!({ "ok": true })),
        Err(errors) => json_response(422, &json!({ "ok": false, "errors": errors })),
    }
}

#[cfg(test)]
mod tests {
    use super::back_location;

    #[test]
    fn back_location_keeps_path_and_query_only() {
        assert_eq!(
            back_location(Some("http://localhost:3000/reviews?sort=rent_asc")),
            "/reviews?sort=rent_asc"
        );
        assert_eq!(back_location(Some("https://evil.example/buildings")), "/buildings");
        assert_eq!(back_location(Some("not a url")), "/");
        assert_eq!(back_location(None), "/");
    }
}
