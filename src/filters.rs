//! Query parameter normalization for the list routes.
//!
//! Page routes degrade gracefully: anything unrecognized or malformed falls
//! back to a default. The JSON routes are strict about the pagination
//! integers so that a broken feed client shows up as a 400 instead of a
//! silently different page.

use crate::domain::RentType;
use crate::errors::{FieldErrors, ServerError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;
pub const MAX_SEARCH_CHARS: usize = 120;

/// Raw query string values, keeping repeats in order.
#[derive(Debug, Default, Clone)]
pub struct RawParams {
    values: BTreeMap<String, Vec<String>>,
}

impl RawParams {
    pub fn from_query(query: Option<&str>) -> Self {
        let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();
        if let Some(q) = query {
            for (k, v) in url::form_urlencoded::parse(q.as_bytes()) {
                values.entry(k.into_owned()).or_default().push(v.into_owned());
            }
        }
        Self { values }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (k, v) in pairs {
            values.entry(k.to_string()).or_default().push(v.to_string());
        }
        Self { values }
    }

    pub fn all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.all(key).first().map(String::as_str)
    }
}

/// A fixed set of named sort orders. The first entry is the default.
pub trait SortOption: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;
    fn label(self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == value)
    }

    fn default_option() -> Self {
        Self::ALL[0]
    }

    /// First recognized value among repeats, or the default.
    fn extract(values: &[String]) -> Self {
        values
            .iter()
            .find_map(|v| Self::parse(v))
            .unwrap_or_else(Self::default_option)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSort {
    Latest,
    RatingDesc,
    RatingAsc,
    RentDesc,
    RentAsc,
}

impl SortOption for ReviewSort {
    const ALL: &'static [Self] = &[
        ReviewSort::Latest,
        ReviewSort::RatingDesc,
        ReviewSort::RatingAsc,
        ReviewSort::RentDesc,
        ReviewSort::RentAsc,
    ];

    fn as_str(self) -> &'static str {
        match self {
            ReviewSort::Latest => "latest",
            ReviewSort::RatingDesc => "rating_desc",
            ReviewSort::RatingAsc => "rating_asc",
            ReviewSort::RentDesc => "rent_desc",
            ReviewSort::RentAsc => "rent_asc",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ReviewSort::Latest => "최신순",
            ReviewSort::RatingDesc => "평점 높은 순",
            ReviewSort::RatingAsc => "평점 낮은 순",
            ReviewSort::RentDesc => "임대료 높은 순",
            ReviewSort::RentAsc => "임대료 낮은 순",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingSort {
    RatingDesc,
    RatingAsc,
    RentDesc,
    RentAsc,
    ReviewCountDesc,
}

impl SortOption for BuildingSort {
    const ALL: &'static [Self] = &[
        BuildingSort::RatingDesc,
        BuildingSort::RatingAsc,
        BuildingSort::RentDesc,
        BuildingSort::RentAsc,
        BuildingSort::ReviewCountDesc,
    ];

    fn as_str(self) -> &'static str {
        match self {
            BuildingSort::RatingDesc => "rating_desc",
            BuildingSort::RatingAsc => "rating_asc",
            BuildingSort::RentDesc => "rent_desc",
            BuildingSort::RentAsc => "rent_asc",
            BuildingSort::ReviewCountDesc => "review_count_desc",
        }
    }

    fn label(self) -> &'static str {
        match self {
            BuildingSort::RatingDesc => "평점 높은 순",
            BuildingSort::RatingAsc => "평점 낮은 순",
            BuildingSort::RentDesc => "임대료 높은 순",
            BuildingSort::RentAsc => "임대료 낮은 순",
            BuildingSort::ReviewCountDesc => "리뷰 많은 순",
        }
    }
}

impl BuildingSort {
    pub fn is_rating(self) -> bool {
        matches!(self, BuildingSort::RatingDesc | BuildingSort::RatingAsc)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    pub sort: ReviewSort,
    pub rent_type: Option<RentType>,
    pub search: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingQuery {
    pub sort: BuildingSort,
    pub search: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            sort: ReviewSort::default_option(),
            rent_type: None,
            search: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Default for BuildingQuery {
    fn default() -> Self {
        Self {
            sort: BuildingSort::default_option(),
            search: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl ReviewQuery {
    /// Lenient: used by the server-rendered page, always the first page.
    pub fn from_page_params(raw: &RawParams) -> Self {
        Self {
            sort: ReviewSort::extract(raw.all("sort")),
            rent_type: extract_rent_type(raw.all("rentType")),
            search: lenient_search(raw.all("q")),
            limit: lenient_limit(raw.first("limit")),
            offset: 0,
        }
    }

    /// Strict: used by `/api/reviews` and the htmx feed fragment.
    pub fn from_api_params(raw: &RawParams) -> Result<Self, ServerError> {
        let (search, limit, offset) = strict_window(raw)?;
        Ok(Self {
            sort: ReviewSort::extract(raw.all("sort")),
            rent_type: extract_rent_type(raw.all("rentType")),
            search,
            limit,
            offset,
        })
    }

    pub fn with_offset(&self, offset: u32) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }

    /// Query string pairs understood by the list routes.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("sort", self.sort.as_str().to_string())];
        if let Some(rent_type) = self.rent_type {
            pairs.push(("rentType", rent_type.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("q", search.clone()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("offset", self.offset.to_string()));
        pairs
    }

    /// `현재 정렬: 최신순 · 임대방식 월세 · 검색어 "..."`
    pub fn summary_label(&self) -> String {
        let mut parts = vec![format!("현재 정렬: {}", self.sort.label())];
        if let Some(rent_type) = self.rent_type {
            parts.push(format!("임대방식 {rent_type}"));
        }
        if let Some(search) = &self.search {
            parts.push(format!("검색어 \"{search}\""));
        }
        parts.join(" · ")
    }
}

impl BuildingQuery {
    pub fn from_page_params(raw: &RawParams) -> Self {
        Self {
            sort: BuildingSort::extract(raw.all("sort")),
            search: lenient_search(raw.all("q")),
            limit: lenient_limit(raw.first("limit")),
            offset: 0,
        }
    }

    pub fn from_api_params(raw: &RawParams) -> Result<Self, ServerError> {
        let (search, limit, offset) = strict_window(raw)?;
        Ok(Self {
            sort: BuildingSort::extract(raw.all("sort")),
            search,
            limit,
            offset,
        })
    }

    pub fn with_offset(&self, offset: u32) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("sort", self.sort.as_str().to_string())];
        if let Some(search) = &self.search {
            pairs.push(("q", search.clone()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("offset", self.offset.to_string()));
        pairs
    }

    pub fn summary_label(&self) -> String {
        let mut parts = vec![format!("현재 정렬: {}", self.sort.label())];
        if let Some(search) = &self.search {
            parts.push(format!("검색어 \"{search}\""));
        }
        parts.join(" · ")
    }
}

/// Encode pairs as `a=1&b=2`.
pub fn encode_pairs(pairs: &[(&str, String)]) -> String {
    let mut ser = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        ser.append_pair(k, v);
    }
    ser.finish()
}

fn extract_rent_type(values: &[String]) -> Option<RentType> {
    values.iter().find_map(|v| RentType::parse(v))
}

fn trimmed_search(values: &[String]) -> Option<String> {
    let raw = values.first()?;
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn lenient_search(values: &[String]) -> Option<String> {
    trimmed_search(values).map(|s| {
        if s.chars().count() > MAX_SEARCH_CHARS {
            debug!("search term longer than {MAX_SEARCH_CHARS} chars, truncating");
            s.chars().take(MAX_SEARCH_CHARS).collect()
        } else {
            s
        }
    })
}

fn lenient_limit(value: Option<&str>) -> u32 {
    match parse_integer_param(value, "limit") {
        Ok(Some(n)) if (1..=MAX_LIMIT as i64).contains(&n) => n as u32,
        Ok(None) => DEFAULT_LIMIT,
        _ => {
            debug!(?value, "ignoring invalid limit on page route");
            DEFAULT_LIMIT
        }
    }
}

fn strict_window(raw: &RawParams) -> Result<(Option<String>, u32, u32), ServerError> {
    let search = trimmed_search(raw.all("q"));
    let limit = parse_integer_param(raw.first("limit"), "limit")?;
    let offset = parse_integer_param(raw.first("offset"), "offset")?;

    let mut errors = FieldErrors::default();
    let limit = match limit {
        None => DEFAULT_LIMIT,
        Some(n) if n < 1 => {
            errors.push("limit", "Number must be greater than 0");
            DEFAULT_LIMIT
        }
        Some(n) if n > MAX_LIMIT as i64 => {
            errors.push("limit", format!("Number must be less than or equal to {MAX_LIMIT}"));
            DEFAULT_LIMIT
        }
        Some(n) => n as u32,
    };
    let offset = match offset {
        None => 0,
        Some(n) if n < 0 => {
            errors.push("offset", "Number must be greater than or equal to 0");
            0
        }
        Some(n) => u32::try_from(n).unwrap_or_else(|_| {
            errors.push("offset", format!("Number must be less than or equal to {}", u32::MAX));
            0
        }),
    };
    if let Some(s) = &search {
        if s.chars().count() > MAX_SEARCH_CHARS {
            errors.push(
                "search",
                format!("String must contain at most {MAX_SEARCH_CHARS} character(s)"),
            );
        }
    }

    if errors.is_empty() {
        Ok((search, limit, offset))
    } else {
        Err(ServerError::Validation { details: errors })
    }
}

/// Absent or blank → `None`. Otherwise the value must be a finite number
/// with no fractional part (`"20"`, `"20.0"` and `"2e1"` all qualify).
pub fn parse_integer_param(value: Option<&str>, field: &'static str) -> Result<Option<i64>, ServerError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(Some(n));
    }
    // Whole numbers beyond the i64 range saturate so the range check reports them.
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => Ok(Some(f as i64)),
        _ => Err(ServerError::InvalidParam { field }),
    }
}
