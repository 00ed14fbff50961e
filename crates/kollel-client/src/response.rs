//! Request outcomes

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message used when a failure carries no server detail.
pub const DEFAULT_FAILURE_MESSAGE: &str = "An unexpected error occurred.";

const DEFAULT_FAILURE_STATUS: u16 = 500;

/// Everything a call to [`ApiClient::request`](crate::ApiClient::request)
/// can resolve to.
///
/// The failure arms are intentionally not unified under one error type: the
/// backend's callers branch on the shape of what came back, and the arms
/// keep those shapes distinct. `request` never returns an `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    /// Parsed body of a successful response.
    Body(Value),
    /// The server answered with an error; passed through untouched.
    ErrorResponse(ErrorResponse),
    /// No usable response was received; synthesized failure payload.
    Failure(FailureBody),
    /// The server flagged the session invalid. The stored token has been
    /// cleared and a redirect to the login view issued; there is nothing
    /// for the caller here.
    SessionInvalidated,
}

impl ApiOutcome {
    /// Body of a successful call
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Body(body) => Some(body),
            _ => None,
        }
    }

    /// Whether the call fully succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Body(_))
    }
}

/// Error response as the server sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw body; JSON when the server sent JSON, a plain string otherwise
    pub body: Value,
}

impl ErrorResponse {
    pub(crate) fn from_body(status: u16, text: &str) -> Self {
        let body = serde_json::from_str::<Value>(text)
            .unwrap_or_else(|_| Value::String(text.to_string()));
        Self { status, body }
    }

    /// Server signal that the session must re-authenticate
    pub fn re_login(&self) -> bool {
        self.body
            .get("reLogin")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Human readable message, when the server sent one
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}

/// Structured failure returned when no response was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureBody {
    /// Always `false`
    pub success: bool,
    /// Best-effort description of what went wrong
    pub message: String,
    /// Status code the transport reported, 500 when it had none
    pub status: u16,
}

impl FailureBody {
    /// Empty messages and a zero status fall back to the defaults, the way
    /// the web clients treat them.
    pub(crate) fn new(message: Option<String>, status: Option<u16>) -> Self {
        Self {
            success: false,
            message: message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            status: status.filter(|status| *status != 0).unwrap_or(DEFAULT_FAILURE_STATUS),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_error_response_keeps_json_body() {
        let response = ErrorResponse::from_body(422, r#"{"message": "Invalid input"}"#);

        assert_eq!(response.status, 422);
        assert_eq!(response.body, json!({"message": "Invalid input"}));
        assert_eq!(response.message(), Some("Invalid input"));
    }

    #[test]
    fn test_error_response_keeps_non_json_body_as_string() {
        let response = ErrorResponse::from_body(502, "Bad Gateway");

        assert_eq!(response.body, json!("Bad Gateway"));
        assert_eq!(response.message(), None);
    }

    #[test]
    fn test_re_login_detection() {
        let flagged = ErrorResponse::from_body(401, r#"{"reLogin": true}"#);
        assert!(flagged.re_login());

        let unflagged = ErrorResponse::from_body(401, r#"{"reLogin": false}"#);
        assert!(!unflagged.re_login());

        let absent = ErrorResponse::from_body(401, r#"{"message": "nope"}"#);
        assert!(!absent.re_login());

        // A non-boolean flag does not count as a re-login signal
        let mistyped = ErrorResponse::from_body(401, r#"{"reLogin": "true"}"#);
        assert!(!mistyped.re_login());
    }

    #[test]
    fn test_failure_body_defaults() {
        let failure = FailureBody::new(None, None);

        assert!(!failure.success);
        assert_eq!(failure.message, DEFAULT_FAILURE_MESSAGE);
        assert_eq!(failure.status, 500);
    }

    #[test]
    fn test_failure_body_falsy_fields_fall_back() {
        let failure = FailureBody::new(Some(String::new()), Some(0));

        assert_eq!(failure.message, DEFAULT_FAILURE_MESSAGE);
        assert_eq!(failure.status, 500);
    }

    #[test]
    fn test_failure_body_keeps_provided_fields() {
        let failure = FailureBody::new(Some("socket closed".to_string()), Some(502));

        assert_eq!(failure.message, "socket closed");
        assert_eq!(failure.status, 502);
    }

    #[test]
    fn test_failure_body_serializes_to_wire_shape() {
        let failure = FailureBody::new(None, None);
        let value = serde_json::to_value(&failure).expect("serializable");

        assert_eq!(
            value,
            json!({
                "success": false,
                "message": DEFAULT_FAILURE_MESSAGE,
                "status": 500,
            })
        );
    }

    #[test]
    fn test_outcome_body_accessor() {
        let outcome = ApiOutcome::Body(json!({"items": []}));
        assert!(outcome.is_success());
        assert_eq!(outcome.body(), Some(&json!({"items": []})));

        let outcome = ApiOutcome::SessionInvalidated;
        assert!(!outcome.is_success());
        assert!(outcome.body().is_none());
    }
}
