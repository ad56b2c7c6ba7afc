// src/feed/api.rs

use super::{FeedError, FeedPage, FeedSource, Keyed};
use crate::domain::{BuildingListItem, ReviewListItem};
use crate::filters::{encode_pairs, BuildingQuery, ReviewQuery};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::marker::PhantomData;

/// Pulls pages from one of the JSON list endpoints of a running server.
pub struct ApiFeedSource<T> {
    client: Client,
    endpoint: String,
    /// Filter/sort pairs, without `limit`/`offset`.
    filter_pairs: Vec<(&'static str, String)>,
    fallback_message: &'static str,
    _item: PhantomData<fn() -> T>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

fn without_window(pairs: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
    pairs
        .into_iter()
        .filter(|(k, _)| *k != "limit" && *k != "offset")
        .collect()
}

impl ApiFeedSource<ReviewListItem> {
    pub fn reviews(client: Client, base_url: &str, query: &ReviewQuery) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/reviews", base_url.trim_end_matches('/')),
            filter_pairs: without_window(query.to_pairs()),
            fallback_message: "리뷰 데이터를 더 불러오지 못했습니다.",
            _item: PhantomData,
        }
    }
}

impl ApiFeedSource<BuildingListItem> {
    pub fn buildings(client: Client, base_url: &str, query: &BuildingQuery) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/buildings", base_url.trim_end_matches('/')),
            filter_pairs: without_window(query.to_pairs()),
            fallback_message: "건물 데이터를 더 불러오지 못했습니다.",
            _item: PhantomData,
        }
    }
}

impl<T> ApiFeedSource<T> {
    pub fn page_url(&self, offset: u32, limit: u32) -> String {
        let mut pairs = self.filter_pairs.clone();
        pairs.push(("limit", limit.to_string()));
        pairs.push(("offset", offset.to_string()));
        format!("{}?{}", self.endpoint, encode_pairs(&pairs))
    }
}

impl<T> FeedSource for ApiFeedSource<T>
where
    T: Keyed + DeserializeOwned,
{
    type Item = T;

    fn fetch_page(&self, offset: u32, limit: u32) -> Result<FeedPage<T>, FeedError> {
        let resp = self
            .client
            .get(self.page_url(offset, limit))
            .header("Accept", "application/json")
            .header("Cache-Control", "no-store")
            .send()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| self.fallback_message.to_string());
            return Err(FeedError::Status {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<FeedPage<T>>()
            .map_err(|e| FeedError::Decode(e.to_string()))
    }
}
