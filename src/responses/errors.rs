use crate::errors::{FieldErrors, ServerError};
use crate::templates::pages::error_page;
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;
use tracing::error;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a FieldErrors>,
}

fn fallback(status: u16, body: String, content_type: &str) -> Response {
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", content_type)
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

/// Convert a ServerError into an HTML error page.
pub fn html_error_response(err: ServerError) -> Response {
    let status = err.status();
    if status >= 500 {
        error!(error = %err, "request failed");
    }
    let message = match &err {
        ServerError::Internal(_) => "Internal Server Error".to_string(),
        other => other.to_string(),
    };
    fallback(
        status,
        error_page(status, &message).into_string(),
        mime::TEXT_HTML_UTF_8.as_ref(),
    )
}

/// Convert a ServerError into `{error, details?}` for the JSON routes.
/// `what` names the list in the generic 500 message, e.g. "reviews".
pub fn json_error_response(err: ServerError, what: &str) -> Response {
    let status = err.status();
    let body = match &err {
        ServerError::Validation { details } => ErrorBody {
            error: err.to_string(),
            details: Some(details),
        },
        ServerError::Upstream(_) | ServerError::Internal(_) => {
            error!(error = %err, "Failed to load {what}");
            ErrorBody {
                error: format!("Failed to load {what}"),
                details: None,
            }
        }
        other => ErrorBody {
            error: other.to_string(),
            details: None,
        },
    };

    let json = serde_json::to_string(&body)
        .unwrap_or_else(|_| "{\"error\":\"Internal Server Error\"}".to_string());
    fallback(status, json, mime::APPLICATION_JSON.as_ref())
}
