//! Incremental list feed: owns the items accumulated for one view of a list
//! and pulls further pages when the end of the list comes into view.
//!
//! State machine: `Idle → Loading → Idle | Error`. A fetch only starts from
//! `Idle` with more rows upstream, so at most one is in flight per
//! controller. Results arriving after [`FeedController::detach`] are dropped.

pub mod api;

pub use api::ApiFeedSource;

use crate::domain::{BuildingListItem, ReviewListItem};
use serde::Deserialize;
use std::collections::HashSet;
use std::hash::Hash;
use thiserror::Error;
use tracing::{debug, warn};

/// Items carry a unique key used to drop duplicates when pages overlap.
pub trait Keyed {
    type Key: Eq + Hash + Clone;

    fn key(&self) -> Self::Key;
}

impl Keyed for ReviewListItem {
    type Key = i64;

    fn key(&self) -> i64 {
        self.summary.id
    }
}

impl Keyed for BuildingListItem {
    type Key = i64;

    fn key(&self) -> i64 {
        self.room_id
    }
}

/// One page as served by the JSON list endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub has_more: bool,
    pub next_offset: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response; `message` is the server's `error` field when present.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("could not read response: {0}")]
    Decode(String),
}

pub trait FeedSource {
    type Item: Keyed;

    fn fetch_page(&self, offset: u32, limit: u32) -> Result<FeedPage<Self::Item>, FeedError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Idle,
    Loading,
    Error(String),
}

/// Handed out when a fetch starts; redeemed with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub offset: u32,
    pub limit: u32,
}

pub struct FeedController<S: FeedSource> {
    source: S,
    items: Vec<S::Item>,
    seen: HashSet<<S::Item as Keyed>::Key>,
    total_count: u64,
    has_more: bool,
    next_offset: Option<u32>,
    page_size: u32,
    state: FeedState,
    attached: bool,
}

impl<S: FeedSource> FeedController<S> {
    /// Start from a page that was already rendered.
    pub fn new(source: S, first_page: FeedPage<S::Item>, page_size: u32) -> Self {
        let mut feed = Self {
            source,
            items: Vec::new(),
            seen: HashSet::new(),
            total_count: 0,
            has_more: false,
            next_offset: None,
            page_size,
            state: FeedState::Idle,
            attached: true,
        };
        feed.apply_page(first_page);
        feed
    }

    /// Fetch the first page from the source itself.
    pub fn bootstrap(source: S, page_size: u32) -> Result<Self, FeedError> {
        let first = source.fetch_page(0, page_size)?;
        Ok(Self::new(source, first, page_size))
    }

    pub fn items(&self) -> &[S::Item] {
        &self.items
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn next_offset(&self) -> Option<u32> {
        self.next_offset
    }

    /// Claim the next fetch. `None` unless idle, attached, and more rows exist.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if !self.attached || self.state != FeedState::Idle || !self.has_more {
            return None;
        }
        let offset = self.next_offset?;
        self.state = FeedState::Loading;
        Some(FetchTicket {
            offset,
            limit: self.page_size,
        })
    }

    /// Like [`begin_fetch`](Self::begin_fetch), but from `Error`, re-requesting
    /// the offset that failed.
    pub fn begin_retry(&mut self) -> Option<FetchTicket> {
        if !self.attached || !matches!(self.state, FeedState::Error(_)) {
            return None;
        }
        let offset = self.next_offset?;
        self.state = FeedState::Loading;
        Some(FetchTicket {
            offset,
            limit: self.page_size,
        })
    }

    /// Apply the outcome of a claimed fetch. Returns whether state changed.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<FeedPage<S::Item>, FeedError>,
    ) -> bool {
        if !self.attached {
            debug!(offset = ticket.offset, "feed detached, dropping late page");
            return false;
        }
        if self.state != FeedState::Loading {
            return false;
        }

        match result {
            Ok(page) => {
                self.apply_page(page);
                self.state = FeedState::Idle;
            }
            Err(err) => {
                warn!(offset = ticket.offset, error = %err, "feed page failed");
                self.state = FeedState::Error(err.to_string());
            }
        }
        true
    }

    /// The sentinel at the end of the list became visible.
    pub fn on_sentinel_visible(&mut self) -> bool {
        match self.begin_fetch() {
            Some(ticket) => self.run(ticket),
            None => false,
        }
    }

    /// Manual retry after an error.
    pub fn retry(&mut self) -> bool {
        match self.begin_retry() {
            Some(ticket) => self.run(ticket),
            None => false,
        }
    }

    /// The view went away; nothing applies after this.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Drop the controller, handing back what was accumulated.
    pub fn into_items(self) -> Vec<S::Item> {
        self.items
    }

    fn run(&mut self, ticket: FetchTicket) -> bool {
        let result = self.source.fetch_page(ticket.offset, ticket.limit);
        self.complete(ticket, result)
    }

    fn apply_page(&mut self, page: FeedPage<S::Item>) {
        self.merge(page.items);
        self.total_count = page.total_count;
        self.has_more = page.has_more;
        self.next_offset = if page.has_more { page.next_offset } else { None };
    }

    fn merge(&mut self, incoming: Vec<S::Item>) {
        for item in incoming {
            if self.seen.insert(item.key()) {
                self.items.push(item);
            }
        }
    }
}
