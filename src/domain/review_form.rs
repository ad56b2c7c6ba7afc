// src/domain/review_form.rs

//! The three-step review form. Each step is its own variant carrying only
//! the fields it collects, validated by a pure function per variant.

use crate::domain::RentType;
use crate::filters::RawParams;
use thiserror::Error;

const STEP_TITLES: [&str; 3] = ["주소 및 건물 선택", "임대 정보 입력", "리뷰 작성"];

const MAX_CONTEXT_CHARS: usize = 4000;
const MAX_BUILDING_NAME_CHARS: usize = 120;
const BUILDING_NAME_MESSAGE: &str =
    "건물 이름에는 공백을 포함할 수 없으며 괄호() 외 특수문자를 사용할 수 없습니다.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StepError(pub String);

fn fail<T>(message: &str) -> Result<T, StepError> {
    Err(StepError(message.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuildingChoice {
    /// A room that already exists at the address. Ids are positive.
    Existing(i64),
    /// A room to be created under this name.
    New(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewFormStep {
    Location {
        address: String,
        postcode: Option<String>,
        building: BuildingChoice,
    },
    Lease {
        rent_type: RentType,
        deposit: Option<f64>,
        rent: Option<f64>,
        move_at: String,
        floor: Option<String>,
    },
    Review {
        score: f64,
        context: String,
    },
}

impl ReviewFormStep {
    pub fn index(&self) -> usize {
        match self {
            ReviewFormStep::Location { .. } => 0,
            ReviewFormStep::Lease { .. } => 1,
            ReviewFormStep::Review { .. } => 2,
        }
    }

    pub fn title(&self) -> &'static str {
        STEP_TITLES[self.index()]
    }

    pub fn is_last(&self) -> bool {
        self.index() == STEP_TITLES.len() - 1
    }

    pub fn validate(&self) -> Result<(), StepError> {
        match self {
            ReviewFormStep::Location {
                address, building, ..
            } => validate_location(address, building),
            ReviewFormStep::Lease {
                rent_type,
                deposit,
                rent,
                move_at,
                ..
            } => validate_lease(*rent_type, *deposit, *rent, move_at),
            ReviewFormStep::Review { score, context } => validate_review(*score, context),
        }
    }

    /// Read the fields of step `index` from submitted form values.
    pub fn from_form(index: usize, form: &RawParams) -> Result<Self, StepError> {
        match index {
            0 => Ok(ReviewFormStep::Location {
                address: text(form, "address"),
                postcode: optional(form, "postcode"),
                building: building_choice(form),
            }),
            1 => Ok(ReviewFormStep::Lease {
                rent_type: rent_type(form)?,
                deposit: parse_price(form.first("deposit")),
                rent: parse_price(form.first("rent")),
                move_at: text(form, "moveAt"),
                floor: optional(form, "floor"),
            }),
            2 => Ok(ReviewFormStep::Review {
                score: score(form),
                context: form.first("context").unwrap_or("").to_string(),
            }),
            _ => fail("알 수 없는 단계입니다."),
        }
    }

    /// Title of the step after this one, if any.
    pub fn next_title(&self) -> Option<&'static str> {
        (!self.is_last()).then(|| STEP_TITLES[self.index() + 1])
    }
}

fn text(form: &RawParams, key: &str) -> String {
    form.first(key).unwrap_or("").trim().to_string()
}

fn optional(form: &RawParams, key: &str) -> Option<String> {
    Some(text(form, key)).filter(|v| !v.is_empty())
}

/// A blank id or `__new__` means a new building named by `newBuildingName`.
fn building_choice(form: &RawParams) -> BuildingChoice {
    match form.first("buildingId").map(str::trim) {
        None | Some("") | Some("__new__") => BuildingChoice::New(text(form, "newBuildingName")),
        Some(id) => BuildingChoice::Existing(id.parse().unwrap_or(0)),
    }
}

fn rent_type(form: &RawParams) -> Result<RentType, StepError> {
    match form.first("rentType").and_then(RentType::parse) {
        Some(rent_type) => Ok(rent_type),
        None => fail("임대 방식을 선택해 주세요."),
    }
}

fn score(form: &RawParams) -> f64 {
    form.first("score")
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|s| s.is_finite())
        .unwrap_or(0.0)
}

/// `"1,500"` → `1500.0`; blank or non-numeric → `None`.
pub fn parse_price(value: Option<&str>) -> Option<f64> {
    let cleaned = value?.replace(',', "");
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Letters, digits and parentheses only.
pub fn is_valid_building_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '(' || c == ')')
}

fn validate_location(address: &str, building: &BuildingChoice) -> Result<(), StepError> {
    if address.trim().is_empty() {
        return fail("주소를 먼저 검색해 선택해 주세요.");
    }
    match building {
        BuildingChoice::New(name) => {
            let name = name.trim();
            if name.is_empty() {
                return fail("새 건물 이름을 입력해 주세요.");
            }
            if !is_valid_building_name(name) {
                return fail(BUILDING_NAME_MESSAGE);
            }
        }
        BuildingChoice::Existing(id) if *id <= 0 => return fail("기존 건물을 선택해 주세요."),
        BuildingChoice::Existing(_) => {}
    }
    Ok(())
}

fn validate_lease(
    rent_type: RentType,
    deposit: Option<f64>,
    rent: Option<f64>,
    move_at: &str,
) -> Result<(), StepError> {
    if move_at.trim().is_empty() {
        return fail("입주 날짜를 입력해 주세요.");
    }
    let non_negative = |v: Option<f64>| v.is_some_and(|v| v >= 0.0);
    let positive = |v: Option<f64>| v.is_some_and(|v| v > 0.0);

    match rent_type {
        RentType::Monthly => {
            if !non_negative(deposit) {
                return fail("월세 보증금을 올바르게 입력해 주세요.");
            }
            if !positive(rent) {
                return fail("월세 금액을 올바르게 입력해 주세요.");
            }
        }
        RentType::Jeonse => {
            if !positive(deposit) {
                return fail("전세 보증금을 올바르게 입력해 주세요.");
            }
        }
        RentType::Yearly => {
            if !positive(deposit) {
                return fail("사글세 보증금을 올바르게 입력해 주세요.");
            }
            if !positive(rent) {
                return fail("1년 사글세 금액을 올바르게 입력해 주세요.");
            }
        }
    }
    Ok(())
}

fn validate_review(score: f64, context: &str) -> Result<(), StepError> {
    if score < 0.5 {
        return fail("평점을 선택해 주세요.");
    }
    if context.trim().is_empty() {
        return fail("리뷰 내용을 입력해 주세요.");
    }
    Ok(())
}

/// Everything the form submits once all steps pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewPayload {
    pub address: String,
    pub postcode: Option<String>,
    pub building: BuildingChoice,
    pub rent_type: RentType,
    pub deposit: Option<f64>,
    pub rent: Option<f64>,
    pub move_at: String,
    pub floor: Option<String>,
    pub score: f64,
    pub context: Option<String>,
}

impl ReviewPayload {
    /// Collect every step's fields from the final submission.
    pub fn from_form(form: &RawParams) -> Result<Self, StepError> {
        Ok(Self {
            address: text(form, "address"),
            postcode: optional(form, "postcode"),
            building: building_choice(form),
            rent_type: rent_type(form)?,
            deposit: parse_price(form.first("deposit")),
            rent: parse_price(form.first("rent")),
            move_at: text(form, "moveAt"),
            floor: optional(form, "floor"),
            score: score(form),
            context: optional(form, "context"),
        })
    }

    /// Submit-time rules. Collects every problem instead of stopping at the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, message: &str| {
            if !ok {
                errors.push(message.to_string());
            }
        };

        check(!self.address.trim().is_empty(), "주소를 선택해 주세요.");
        check(
            self.postcode.as_ref().map_or(true, |p| p.trim().chars().count() <= 20),
            "우편번호가 너무 깁니다.",
        );
        match &self.building {
            BuildingChoice::Existing(id) => check(*id > 0, "기존 건물을 선택해 주세요."),
            BuildingChoice::New(name) => {
                let name = name.trim();
                check(!name.is_empty(), "건물 이름을 입력해 주세요.");
                check(
                    name.chars().count() <= MAX_BUILDING_NAME_CHARS,
                    "건물 이름이 너무 깁니다.",
                );
            }
        }
        check(self.deposit.map_or(true, |d| d >= 0.0), "보증금은 0 이상이어야 합니다.");
        check(self.rent.map_or(true, |r| r >= 0.0), "임대료는 0 이상이어야 합니다.");

        match self.rent_type {
            RentType::Monthly => {
                check(self.deposit.is_some(), "보증금을 입력해 주세요.");
                check(self.rent.is_some(), "월세를 입력해 주세요.");
            }
            RentType::Jeonse => {
                check(self.deposit.is_some(), "전세 보증금을 입력해 주세요.");
                check(self.rent.is_none(), "전세에서는 월세를 입력할 수 없습니다.");
            }
            RentType::Yearly => {
                check(self.deposit.is_some(), "사글세 보증금을 입력해 주세요.");
                check(self.rent.is_some(), "1년 사글세 금액을 입력해 주세요.");
            }
        }

        let move_at = self.move_at.trim();
        check(!move_at.is_empty(), "입주 날짜를 입력해 주세요.");
        check(move_at.chars().count() <= 32, "입주 날짜 형식이 올바르지 않습니다.");
        check(
            self.floor.as_ref().map_or(true, |f| f.trim().chars().count() <= 32),
            "층 정보가 너무 깁니다.",
        );
        check(
            (0.5..=5.0).contains(&self.score),
            "평점은 0.5점에서 5점 사이여야 합니다.",
        );
        check((self.score * 2.0).fract().abs() < 1e-8, "평점은 0.5점 단위여야 합니다.");
        check(
            self.context
                .as_ref()
                .map_or(true, |c| c.chars().count() <= MAX_CONTEXT_CHARS),
            "리뷰는 최대 4000자까지 작성할 수 있습니다.",
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
