use crate::portal::Portal;
use crate::validation::ValidationError;
use reqwest::{StatusCode, header};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("client set an invalid header value: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
    #[error("server responded with {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Status { status: StatusCode, detail: Option<String> },
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("unable to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("not logged in to the {portal} portal, log in at {}", portal.login_route())]
    Unauthenticated { portal: Portal },
}

impl ApiError {
    /// The message shown to the user: the server's detail, the validation
    /// message, or the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { detail: Some(detail), .. } => detail.clone(),
            ApiError::Validation(err) => err.to_string(),
            ApiError::Unauthenticated { .. } => self.to_string(),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthenticated { .. })
            || matches!(self, ApiError::Status { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
    message: Option<String>,
}

/// Extracts the human readable error from an error response body. The
/// backend sends either `{"detail": "..."}` or a list of validation items
/// `{"detail": [{"msg": "..."}]}`.
pub fn extract_detail(body: &str) -> Option<String> {
    let body = serde_json::from_str::<ErrorBody>(body).ok()?;

    match body.detail {
        Some(Value::String(detail)) if !detail.trim().is_empty() => Some(detail),
        Some(Value::Array(items)) => {
            let messages = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => body.message.filter(|message| !message.trim().is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::string(r#"{"detail": "Slot already taken"}"#, Some("Slot already taken"))]
    #[case::list(r#"{"detail": [{"loc": ["body", "date"], "msg": "field required"}, {"msg": "bad time"}]}"#, Some("field required; bad time"))]
    #[case::message(r#"{"message": "Forbidden"}"#, Some("Forbidden"))]
    #[case::blank(r#"{"detail": "  "}"#, None)]
    #[case::empty_list(r#"{"detail": []}"#, None)]
    #[case::not_json("<html>Bad gateway</html>", None)]
    fn extract_detail_reads_the_server_message(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_detail(body).as_deref(), expected);
    }

    #[test]
    fn user_message_falls_back_without_a_detail() {
        let error = ApiError::Status {
            status: StatusCode::BAD_GATEWAY,
            detail: None,
        };

        assert_eq!(error.user_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn user_message_prefers_the_server_detail() {
        let error = ApiError::Status {
            status: StatusCode::CONFLICT,
            detail: Some("Slot already taken".to_string()),
        };

        assert_eq!(error.user_message(), "Slot already taken");
    }

    #[test]
    fn user_message_shows_validation_errors() {
        let error = ApiError::from(ValidationError::Required { field: "name" });

        assert_eq!(error.user_message(), "name is required");
    }

    #[test]
    fn unauthorized_covers_missing_tokens_and_401_responses() {
        assert!(ApiError::Unauthenticated { portal: Portal::Admin }.is_unauthorized());
        assert!(
            ApiError::Status {
                status: StatusCode::UNAUTHORIZED,
                detail: None
            }
            .is_unauthorized()
        );
        assert!(
            !ApiError::Status {
                status: StatusCode::NOT_FOUND,
                detail: None
            }
            .is_unauthorized()
        );
    }
}
