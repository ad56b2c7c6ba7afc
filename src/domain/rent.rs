// src/domain/rent.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a room is rented. Values are stored upstream in Korean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RentType {
    /// Deposit plus monthly rent.
    #[serde(rename = "월세")]
    Monthly,
    /// Lump-sum deposit, no rent.
    #[serde(rename = "전세")]
    Jeonse,
    /// Deposit plus a year of rent paid up front.
    #[serde(rename = "사글세")]
    Yearly,
}

impl RentType {
    pub const ALL: [RentType; 3] = [RentType::Monthly, RentType::Jeonse, RentType::Yearly];

    pub fn as_str(self) -> &'static str {
        match self {
            RentType::Monthly => "월세",
            RentType::Jeonse => "전세",
            RentType::Yearly => "사글세",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    /// Prefix used when labelling the aggregate annual rent of a review.
    pub fn annual_rent_prefix(self) -> &'static str {
        match self {
            RentType::Monthly | RentType::Yearly => "연",
            RentType::Jeonse => "보증금",
        }
    }
}

impl fmt::Display for RentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `"{label} 1,234만원"`, rounded to the nearest 만원. `None` stays `None`.
pub fn format_annual_rent(value: Option<f64>, label: &str) -> Option<String> {
    let value = value?;
    Some(format!("{label} {}만원", group_digits(value.round() as i64)))
}

pub fn annual_rent_label(value: Option<f64>, rent_type: RentType) -> Option<String> {
    format_annual_rent(value, rent_type.annual_rent_prefix())
}

/// ko-KR grouping: commas every three digits.
pub fn group_digits(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
