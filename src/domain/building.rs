// src/domain/building.rs

use serde::{Deserialize, Serialize};

/// One row of the `room_review_stats` view: a room with its review rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSummary {
    pub room_id: i64,
    pub room_name: String,
    pub room_address: String,
    pub room_postcode: Option<String>,
    pub average_score: Option<f64>,
    pub review_count: i64,
    pub average_annual_rent: Option<f64>,
}

/// A building as listed: unrated rooms report an average of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingListItem {
    pub room_id: i64,
    pub room_name: String,
    pub room_address: String,
    pub room_postcode: Option<String>,
    pub average_score: f64,
    pub review_count: i64,
    pub average_annual_rent: Option<f64>,
}

impl From<BuildingSummary> for BuildingListItem {
    fn from(row: BuildingSummary) -> Self {
        Self {
            room_id: row.room_id,
            room_name: row.room_name,
            room_address: row.room_address,
            room_postcode: row.room_postcode,
            average_score: row.average_score.unwrap_or(0.0),
            review_count: row.review_count,
            average_annual_rent: row.average_annual_rent,
        }
    }
}

impl BuildingListItem {
    pub fn has_reviews(&self) -> bool {
        self.review_count > 0
    }
}
