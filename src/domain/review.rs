// src/domain/review.rs

use crate::domain::rent::{annual_rent_label, RentType};
use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// One row of the `reviews_with_room_summary` view: a review joined with
/// the identity of the room it is about and its aggregate annual rent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub id: i64,
    pub created_at: String,
    pub room_id: i64,
    pub room_name: String,
    pub room_address: String,
    pub room_postcode: Option<String>,
    pub score: f64,
    pub rent_type: RentType,
    pub annual_rent: Option<f64>,
    pub deposit: Option<f64>,
    pub rent: Option<f64>,
    pub move_at: String,
    pub floor: Option<String>,
    pub context: Option<String>,
}

/// What the list endpoints hand out: the view row plus its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewListItem {
    #[serde(flatten)]
    pub summary: ReviewSummary,
    #[serde(rename = "annualRentLabel")]
    pub annual_rent_label: Option<String>,
}

impl From<ReviewSummary> for ReviewListItem {
    fn from(summary: ReviewSummary) -> Self {
        let annual_rent_label = annual_rent_label(summary.annual_rent, summary.rent_type);
        Self {
            summary,
            annual_rent_label,
        }
    }
}

impl ReviewListItem {
    /// `2024.05.01` for RFC 3339 timestamps, the raw string otherwise.
    pub fn created_date(&self) -> String {
        DateTime::parse_from_rfc3339(&self.summary.created_at)
            .map(|dt| dt.format("%Y.%m.%d").to_string())
            .unwrap_or_else(|_| self.summary.created_at.clone())
    }

    /// Score rendered with one decimal, e.g. `4.5`.
    pub fn score_label(&self) -> String {
        format!("{:.1}", self.summary.score)
    }
}
