//! The list fetcher shared by the review and building feeds: one counted,
//! windowed view query per page.

pub mod buildings;
pub mod reviews;

pub use buildings::fetch_buildings;
pub use reviews::fetch_reviews;

use crate::errors::ServerError;
use crate::store::{StoreError, ViewPage};
use serde::de::DeserializeOwned;
use tracing::error;

/// One window of a list plus where the next one starts.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub has_more: bool,
    /// `None` once the window reaches the end of the list.
    pub next_offset: Option<u32>,
}

/// `(has_more, min(offset + limit, total))` for a window.
pub fn window_bounds(offset: u32, limit: u32, total_count: u64) -> (bool, u64) {
    let end = offset as u64 + limit as u64;
    (end < total_count, end.min(total_count))
}

impl<T> ListPage<T> {
    pub fn from_window(items: Vec<T>, offset: u32, limit: u32, total_count: u64) -> Self {
        let (has_more, end) = window_bounds(offset, limit, total_count);
        Self {
            items,
            total_count,
            has_more,
            // has_more implies end < total_count, so end fits in the offset range.
            next_offset: if has_more { u32::try_from(end).ok() } else { None },
        }
    }
}

/// Decode view rows, reporting failures with the caller's user-facing prefix.
fn decode_rows<T: DeserializeOwned>(page: ViewPage, message: &str) -> Result<Vec<T>, ServerError> {
    page.rows
        .into_iter()
        .map(|row| {
            serde_json::from_value(row)
                .map_err(|e| upstream_error(message, StoreError::Decode(e.to_string())))
        })
        .collect()
}

fn upstream_error(message: &str, err: StoreError) -> ServerError {
    error!(error = %err, "{message}");
    ServerError::Upstream(format!("{message}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_of_forty_five() {
        let page = ListPage::from_window(vec![(); 20], 0, 20, 45);
        assert!(page.has_more);
        assert_eq!(page.next_offset, Some(20));
    }

    #[test]
    fn last_page_of_forty_five() {
        let page = ListPage::from_window(vec![(); 5], 40, 20, 45);
        assert!(!page.has_more);
        assert_eq!(page.next_offset, None);
    }

    #[test]
    fn bounds_hold_across_windows() {
        for total in [0u64, 1, 19, 20, 21, 45, 100] {
            for offset in [0u32, 1, 20, 40, 99, 120] {
                for limit in [1u32, 20, 100] {
                    let (has_more, next) = window_bounds(offset, limit, total);
                    assert_eq!(has_more, (offset as u64 + limit as u64) < total);
                    assert_eq!(next, (offset as u64 + limit as u64).min(total));

                    let page: ListPage<()> = ListPage::from_window(vec![], offset, limit, total);
                    assert_eq!(page.next_offset.is_some(), has_more);
                }
            }
        }
    }
}
