//! Read access to the hosted backend's views.
//!
//! The backend exposes filter/sort/range primitives over Postgres views; this
//! module names them once in [`ViewQuery`] and lets [`ListStore`]
//! implementations decide how they are executed.

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use serde_json::Value;
use thiserror::Error;

pub const REVIEWS_VIEW: &str = "reviews_with_room_summary";
pub const BUILDINGS_VIEW: &str = "room_review_stats";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode rows: {0}")]
    Decode(String),

    #[error("fixture error: {0}")]
    Fixture(String),

    #[error("unknown view: {0}")]
    UnknownView(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Exact match on a text column.
    Eq { column: &'static str, value: String },
    /// Case-insensitive substring match.
    Contains { column: &'static str, needle: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Order {
    pub column: &'static str,
    pub ascending: bool,
    pub nulls_last: bool,
}

impl Order {
    pub fn desc(column: &'static str) -> Self {
        Self {
            column,
            ascending: false,
            nulls_last: true,
        }
    }

    pub fn asc(column: &'static str) -> Self {
        Self {
            column,
            ascending: true,
            nulls_last: true,
        }
    }
}

/// One windowed, counted select against a view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewQuery {
    pub view: &'static str,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub offset: u32,
    pub limit: u32,
}

impl ViewQuery {
    pub fn new(view: &'static str) -> Self {
        Self {
            view,
            filters: Vec::new(),
            order: None,
            offset: 0,
            limit: crate::filters::DEFAULT_LIMIT,
        }
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq {
            column,
            value: value.into(),
        });
        self
    }

    pub fn contains(mut self, column: &'static str, needle: impl Into<String>) -> Self {
        self.filters.push(Filter::Contains {
            column,
            needle: needle.into(),
        });
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// Rows `[offset, offset + limit)`.
    pub fn range(mut self, offset: u32, limit: u32) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }
}

/// Rows of one window plus the exact count of the filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewPage {
    pub rows: Vec<Value>,
    pub total_count: u64,
}

pub trait ListStore: Send + Sync {
    fn select(&self, query: &ViewQuery) -> Result<ViewPage, StoreError>;
}
