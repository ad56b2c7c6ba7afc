// src/store/memory.rs

use super::{Filter, ListStore, Order, StoreError, ViewPage, ViewQuery};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Views held in memory, evaluated with the same filter/sort/window
/// semantics as the hosted backend. Backs offline runs (`SEOF_FIXTURES`)
/// and the router tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    views: HashMap<String, Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(mut self, view: &str, rows: Vec<Value>) -> Self {
        self.views.insert(view.to_string(), rows);
        self
    }

    /// Fixture file layout: `{ "<view name>": [ {row}, ... ], ... }`.
    pub fn from_fixture_file(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path)
            .map_err(|e| StoreError::Fixture(format!("read {}: {e}", path.display())))?;
        let views: HashMap<String, Vec<Value>> = serde_json::from_str(&text)
            .map_err(|e| StoreError::Fixture(format!("parse {}: {e}", path.display())))?;

        for (view, rows) in &views {
            info!(view = %view, rows = rows.len(), "loaded fixture view");
        }
        Ok(Self { views })
    }
}

fn matches(row: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq { column, value } => row.get(*column).and_then(Value::as_str) == Some(value.as_str()),
        Filter::Contains { column, needle } => row
            .get(*column)
            .and_then(Value::as_str)
            .map(|s| s.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn compare_rows(a: &Value, b: &Value, order: &Order) -> Ordering {
    let a = a.get(order.column).filter(|v| !v.is_null());
    let b = b.get(order.column).filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) if order.nulls_last => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) if order.nulls_last => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            let ord = compare_values(a, b);
            if order.ascending {
                ord
            } else {
                ord.reverse()
            }
        }
    }
}

impl ListStore for MemoryStore {
    fn select(&self, query: &ViewQuery) -> Result<ViewPage, StoreError> {
        let rows = self
            .views
            .get(query.view)
            .ok_or_else(|| StoreError::UnknownView(query.view.to_string()))?;

        let mut hits: Vec<&Value> = rows
            .iter()
            .filter(|row| query.filters.iter().all(|f| matches(row, f)))
            .collect();

        if let Some(order) = &query.order {
            hits.sort_by(|a, b| compare_rows(a, b, order));
        }

        let total_count = hits.len() as u64;
        let rows = hits
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();

        Ok(ViewPage { rows, total_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::new().with_view(
            "rooms",
            vec![
                json!({"id": 1, "name": "Alpha House", "score": 3.0}),
                json!({"id": 2, "name": "beta villa", "score": null}),
                json!({"id": 3, "name": "Gamma", "score": 4.5}),
                json!({"id": 4, "name": "alphaville", "score": 1.0}),
            ],
        )
    }

    fn ids(page: &ViewPage) -> Vec<i64> {
        page.rows.iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    #[test]
    fn orders_with_nulls_last_both_directions() {
        let s = store();
        let desc = s
            .select(&ViewQuery::new("rooms").order(Order::desc("score")).range(0, 10))
            .unwrap();
        assert_eq!(ids(&desc), vec![3, 1, 4, 2]);

        let asc = s
            .select(&ViewQuery::new("rooms").order(Order::asc("score")).range(0, 10))
            .unwrap();
        assert_eq!(ids(&asc), vec![4, 1, 3, 2]);
    }

    #[test]
    fn contains_is_case_insensitive_and_counts_before_window() {
        let page = store()
            .select(&ViewQuery::new("rooms").contains("name", "ALPHA").range(1, 1))
            .unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(ids(&page), vec![4]);
    }

    #[test]
    fn window_past_the_end_is_empty() {
        let page = store().select(&ViewQuery::new("rooms").range(10, 5)).unwrap();
        assert_eq!(page.total_count, 4);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn unknown_view_is_an_error() {
        let err = store().select(&ViewQuery::new("nope")).unwrap_err();
        assert!(matches!(err, StoreError::UnknownView(_)));
    }
}
