use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error as ThisError;

use super::{IsRetryable, TransportError, ValidationError};

/// Every way a generation can fail. `Display` is the message shown to the user.
#[derive(Debug, ThisError)]
pub enum PitchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Cannot connect to server at {endpoint}. Please make sure the backend is running.")]
    Connection { endpoint: String },

    #[error("Request rejected ({status}): {message}")]
    Client { status: StatusCode, message: String },

    #[error("Rate limited by the server: {message}. Please wait a moment and try again.")]
    RateLimited { message: String },

    #[error("Server error ({status}): {message}")]
    Server { status: StatusCode, message: String },

    #[error(
        "Request timed out after {}s. The server may be busy, please try again.",
        .0.as_secs()
    )]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response from server: {0}")]
    MalformedResponse(String),

    #[error("Generation failed: {0}")]
    Rejected(String),

    #[error("Server is {0}. Generation is unavailable until it is back online.")]
    Unavailable(String),

    #[error("Still checking the server. Please try again in a moment.")]
    HealthPending,

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Coarse failure classes, for callers that branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Connection,
    Client,
    Server,
    Timeout,
    Protocol,
    Unavailable,
}

impl PitchError {
    pub(crate) fn from_transport(err: TransportError, endpoint: &url::Url) -> Self {
        match err {
            TransportError::Connect(_) => Self::Connection {
                endpoint: endpoint.origin().ascii_serialization(),
            },
            TransportError::Timeout(after) => Self::Timeout(after),
            TransportError::Other(detail) => Self::Network(detail),
        }
    }

    /// Classifies a non-success HTTP status. `body` is mined for a `detail`/`message` field.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_message(body)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| "unknown error".to_string());

        if status == StatusCode::TOO_MANY_REQUESTS {
            Self::RateLimited { message }
        } else if status.is_server_error() {
            Self::Server { status, message }
        } else {
            Self::Client { status, message }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Connection { .. } => ErrorKind::Connection,
            Self::Client { .. } => ErrorKind::Client,
            Self::RateLimited { .. } | Self::Server { .. } | Self::Network(_) => ErrorKind::Server,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::MalformedResponse(_)
            | Self::Rejected(_)
            | Self::InvalidUrl(_)
            | Self::Encode(_) => ErrorKind::Protocol,
            Self::Unavailable(_) | Self::HealthPending => ErrorKind::Unavailable,
        }
    }
}

impl IsRetryable for PitchError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Server { .. } | Self::Timeout(_) | Self::Network(_)
        )
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["detail", "message"]
        .into_iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .or_else(|| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
        })
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification_follows_retry_taxonomy() {
        let unavailable = PitchError::from_status(StatusCode::SERVICE_UNAVAILABLE, "");
        assert!(unavailable.is_retryable());
        assert_eq!(unavailable.kind(), ErrorKind::Server);

        let limited = PitchError::from_status(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(limited.is_retryable());

        for status in [StatusCode::BAD_REQUEST, StatusCode::UNAUTHORIZED] {
            let err = PitchError::from_status(status, "");
            assert!(!err.is_retryable(), "{status} must not be retried");
            assert_eq!(err.kind(), ErrorKind::Client);
        }
    }

    #[test]
    fn connection_and_timeout_split_fatal_from_transient() {
        let url = url::Url::parse("http://localhost:8000/api/generate").expect("url");

        let refused = PitchError::from_transport(TransportError::Connect("refused".into()), &url);
        assert!(!refused.is_retryable());
        assert!(refused.to_string().contains("http://localhost:8000"));

        let timeout =
            PitchError::from_transport(TransportError::Timeout(Duration::from_secs(120)), &url);
        assert!(timeout.is_retryable());
        assert!(timeout.to_string().contains("120s"));
    }

    #[test]
    fn message_prefers_structured_detail() {
        let err = PitchError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"idea must not be empty"}"#,
        );
        assert_eq!(
            err.to_string(),
            "Request rejected (400 Bad Request): idea must not be empty"
        );

        let err = PitchError::from_status(
            StatusCode::BAD_GATEWAY,
            r#"{"error":{"code":"UPSTREAM_ERROR","message":"Upstream service error."}}"#,
        );
        assert!(err.to_string().ends_with("Upstream service error."));
    }

    #[test]
    fn pending_health_is_not_called_a_server_state() {
        let err = PitchError::HealthPending;
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(!err.is_retryable());
        assert!(!err.to_string().starts_with("Server is"));
    }

    #[test]
    fn unstructured_body_falls_back_to_reason_phrase() {
        let err = PitchError::from_status(StatusCode::SERVICE_UNAVAILABLE, "<html>oops</html>");
        assert_eq!(
            err.to_string(),
            "Server error (503 Service Unavailable): Service Unavailable"
        );
    }
}
