// src/store/rest.rs

use super::{Filter, ListStore, StoreError, ViewPage, ViewQuery};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// PostgREST endpoint of the hosted backend (`{base}/rest/v1/{view}`),
/// queried with the public anon key.
pub struct RestStore {
    base_url: String,
    anon_key: String,
    client: Client,
}

impl RestStore {
    pub fn new(base_url: &str, anon_key: String, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            client,
        })
    }

    fn view_url(&self, view: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, view)
    }
}

/// PostgREST query parameters for a view query.
pub fn query_params(query: &ViewQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];

    for filter in &query.filters {
        match filter {
            Filter::Eq { column, value } => {
                params.push((column.to_string(), format!("eq.{value}")));
            }
            Filter::Contains { column, needle } => {
                params.push((column.to_string(), format!("ilike.%{needle}%")));
            }
        }
    }

    if let Some(order) = query.order {
        let dir = if order.ascending { "asc" } else { "desc" };
        let nulls = if order.nulls_last { "nullslast" } else { "nullsfirst" };
        params.push(("order".to_string(), format!("{}.{dir}.{nulls}", order.column)));
    }

    params.push(("offset".to_string(), query.offset.to_string()));
    params.push(("limit".to_string(), query.limit.to_string()));
    params
}

/// Total from a `Content-Range` header: `0-19/45` or `*/45`.
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}

impl ListStore for RestStore {
    fn select(&self, query: &ViewQuery) -> Result<ViewPage, StoreError> {
        debug!(view = query.view, offset = query.offset, limit = query.limit, "querying view");

        let resp = self
            .client
            .get(self.view_url(query.view))
            .query(&query_params(query))
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header("Accept", "application/json")
            .header("Prefer", "count=exact")
            .send()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = resp.status();
        let total_count = resp
            .headers()
            .get("Content-Range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .unwrap_or(0);

        // Offset past the end of the view: no rows, but the count is still reported.
        if status == StatusCode::RANGE_NOT_SATISFIABLE {
            return Ok(ViewPage {
                rows: Vec::new(),
                total_count,
            });
        }

        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<Value> = resp.json().map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(ViewPage { rows, total_count })
    }
}
