use astra::Response;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, query validation) or downstream layers (the REST store).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// A pagination integer that does not parse as an integer.
    #[error("\"{field}\" must be an integer value.")]
    InvalidParam { field: &'static str },

    /// Parsed values outside their allowed ranges, keyed by field.
    #[error("Invalid query parameters")]
    Validation { details: FieldErrors },

    /// The upstream view query failed. Carries the user-facing message.
    #[error("{0}")]
    Upstream(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

/// Field name → messages, serialized as the `details` of a 400 body.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct FieldErrors {
    #[serde(rename = "fieldErrors")]
    pub fields: BTreeMap<&'static str, Vec<String>>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_)
            | ServerError::InvalidParam { .. }
            | ServerError::Validation { .. } => 400,
            ServerError::Upstream(_) | ServerError::Internal(_) => 500,
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
