//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; the JSON envelope is stable across all endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::middleware::trace::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with existing state.
    Conflict,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload returned to adapters.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    #[schema(example = "Something went wrong")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error, panicking if the message is blank.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        assert!(
            !message.trim().is_empty(),
            "error messages must not be blank"
        );
        Self {
            code,
            message,
            details: None,
            trace_id: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Request-scoped trace identifier, when one was in scope.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    ///
    /// Captures the request-scoped [`TraceId`] automatically so redacted
    /// responses stay correlatable with server logs.
    pub fn internal(message: impl Into<String>) -> Self {
        let mut error = Self::new(ErrorCode::InternalError, message);
        error.trace_id = TraceId::current().map(|id| id.to_string());
        error
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(ErrorCode::InvalidRequest, "invalid_request")]
    #[case(ErrorCode::Unauthorized, "unauthorized")]
    #[case(ErrorCode::NotFound, "not_found")]
    #[case(ErrorCode::Conflict, "conflict")]
    fn error_codes_serialize_snake_case(#[case] code: ErrorCode, #[case] expected: &str) {
        let json = serde_json::to_value(code).expect("serialize");
        assert_eq!(json, json!(expected));
    }

    #[test]
    fn details_and_trace_id_are_omitted_when_absent() {
        let value = serde_json::to_value(Error::not_found("missing")).expect("serialize");
        assert!(value.get("details").is_none());
        assert!(value.get("traceId").is_none());
    }

    #[test]
    fn details_round_trip() {
        let error = Error::invalid_request("bad").with_details(json!({ "field": "quantity" }));
        let value = serde_json::to_value(&error).expect("serialize");
        assert_eq!(
            value
                .get("details")
                .and_then(|details| details.get("field"))
                .and_then(serde_json::Value::as_str),
            Some("quantity")
        );
    }

    #[test]
    #[should_panic(expected = "error messages must not be blank")]
    fn blank_messages_are_rejected() {
        let _ = Error::internal("   ");
    }
}
