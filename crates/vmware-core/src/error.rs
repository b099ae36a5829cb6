//! Error types for VMware as a Service operations.
//!
//! This module provides the error hierarchy returned by every operation,
//! including parsing of the structured error body the service returns on
//! non-2xx responses.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for VMware as a Service operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Required fields are missing or empty; raised before any network I/O
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The configured base URL or a resolved request URL is invalid
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// No base service URL is configured
    #[error("Service URL missing")]
    ServiceUrlMissing,

    /// The authenticator could not produce credentials
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The service could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The request or call deadline elapsed
    #[error("Request deadline exceeded: {0}")]
    Timeout(String),

    /// The request body could not be encoded
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The service answered with a success status but the body could not be decoded
    #[error("Failed to decode response: {message}")]
    DecodeError {
        /// Decoder error message
        message: String,
        /// The raw response, kept for diagnostics
        response: Box<RawResponse>,
    },

    /// The service answered with a non-2xx status
    #[error("Service error {status}: {message}")]
    ServiceError {
        /// HTTP status code
        status: u16,
        /// Primary error message
        message: String,
        /// Structured error entries reported by the service
        errors: Vec<ErrorDetail>,
        /// Service trace identifier, when present
        trace: Option<String>,
        /// The raw response
        response: Box<RawResponse>,
    },
}

/// Specialized result type for VMware as a Service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Status, headers and body of an HTTP response, captured as plain data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers (name, value)
    pub headers: Vec<(String, String)>,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// Capture a response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> Self {
        let headers = headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        Self {
            status: status.as_u16(),
            headers,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Look up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A single error entry in the service error schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Error code for programmatic handling
    #[serde(default)]
    pub code: String,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
    /// Link to a page with more information about this error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
}

/// Error body returned by the service on non-2xx responses.
///
/// The canonical shape is `{"errors": [...], "trace": "..."}`; older services
/// report a single `error`, `message` or `errorMessage` field instead.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ServiceErrorBody {
    /// Structured error entries
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
    /// Trace identifier
    #[serde(default)]
    pub trace: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "errorMessage")]
    error_message: Option<String>,
}

impl ServiceErrorBody {
    /// The most specific message the body carries.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.errors
            .iter()
            .map(|e| e.message.clone())
            .find(|m| !m.is_empty())
            .or_else(|| self.error.clone())
            .or_else(|| self.message.clone())
            .or_else(|| self.error_message.clone())
    }
}

impl Error {
    /// Build a [`Error::ServiceError`] from a non-2xx response.
    #[must_use]
    pub fn from_service_response(response: RawResponse) -> Self {
        let body: ServiceErrorBody = serde_json::from_str(&response.body).unwrap_or_default();
        let status = StatusCode::from_u16(response.status).ok();
        let message = body.message().unwrap_or_else(|| {
            status
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown error")
                .to_string()
        });

        Self::ServiceError {
            status: response.status,
            message,
            errors: body.errors,
            trace: body.trace,
            response: Box::new(response),
        }
    }

    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::ServiceUrlMissing => "SERVICE_URL_MISSING",
            Self::AuthenticationError(_) => "AUTHENTICATION_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Timeout(_) => "TIMEOUT",
            Self::SerializationError(_) => "SERIALIZATION_ERROR",
            Self::DecodeError { .. } => "DECODE_ERROR",
            Self::ServiceError { .. } => "SERVICE_ERROR",
        }
    }

    /// HTTP status code of the response that caused this error, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }

    /// The raw response attached to this error, if the request reached the service.
    #[must_use]
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::DecodeError { response, .. } | Self::ServiceError { response, .. } => {
                Some(response)
            }
            _ => None,
        }
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::ConfigError(_) | Self::AuthenticationError(_) | Self::DecodeError { .. }
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::ValidationError("test".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(Error::ServiceUrlMissing.error_code(), "SERVICE_URL_MISSING");
        assert_eq!(Error::Timeout("test".to_string()).error_code(), "TIMEOUT");
        assert_eq!(
            Error::DecodeError {
                message: "bad".to_string(),
                response: Box::new(raw(200, "{")),
            }
            .error_code(),
            "DECODE_ERROR"
        );
        assert_eq!(
            Error::from_service_response(raw(404, "")).error_code(),
            "SERVICE_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(Error::ServiceUrlMissing.to_string(), "Service URL missing");

        let err = Error::Timeout("operation timed out".to_string());
        assert!(err.to_string().contains("deadline exceeded"));
    }

    #[test]
    fn test_service_error_parses_errors_array() {
        let body = r#"{
            "errors": [
                {"code": "not_found", "message": "Director site not found", "more_info": "https://cloud.ibm.com/docs"}
            ],
            "trace": "7d4f2a"
        }"#;

        let err = Error::from_service_response(raw(404, body));
        match &err {
            Error::ServiceError {
                status,
                message,
                errors,
                trace,
                ..
            } => {
                assert_eq!(*status, 404);
                assert_eq!(message, "Director site not found");
                assert_eq!(errors[0].code, "not_found");
                assert_eq!(errors[0].more_info.as_deref(), Some("https://cloud.ibm.com/docs"));
                assert_eq!(trace.as_deref(), Some("7d4f2a"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_service_error_message_fallbacks() {
        let err = Error::from_service_response(raw(400, r#"{"errorMessage": "bad site"}"#));
        assert_eq!(err.to_string(), "Service error 400: bad site");

        let err = Error::from_service_response(raw(503, "<html>upstream</html>"));
        assert_eq!(err.to_string(), "Service error 503: Service Unavailable");
    }

    #[test]
    fn test_raw_response_header_lookup() {
        let response = raw(200, "{}");
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert!(response.header("x-missing").is_none());
    }

    #[test]
    fn test_response_only_for_server_errors() {
        assert!(Error::ServiceUrlMissing.response().is_none());
        assert!(Error::HttpError("reset".to_string()).status_code().is_none());

        let err = Error::DecodeError {
            message: "expected value".to_string(),
            response: Box::new(raw(201, "not json")),
        };
        assert_eq!(err.response().map(|r| r.body.as_str()), Some("not json"));
    }

    #[test]
    fn test_should_log() {
        assert!(Error::ConfigError("test".to_string()).should_log());
        assert!(Error::AuthenticationError("test".to_string()).should_log());
        assert!(!Error::ValidationError("test".to_string()).should_log());
        assert!(!Error::ServiceUrlMissing.should_log());
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let converted: Error = err.into();
        assert!(matches!(converted, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let converted: Error = err.into();
        assert!(matches!(converted, Error::SerializationError(_)));
    }

    #[test]
    fn test_error_clone_and_eq() {
        let err = Error::from_service_response(raw(409, r#"{"message": "conflict"}"#));
        assert_eq!(err.clone(), err);
        assert_ne!(err, Error::ServiceUrlMissing);
    }
}
