use super::{IsRetryable, TransportError};
use thiserror::Error as ThisError;

/// Failure of a call to the deck provider behind the backend.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum UpstreamError {
    #[error("{provider} returned HTTP {status}: {message}")]
    Status {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("{provider} returned an unreadable body: {detail}")]
    Malformed {
        provider: &'static str,
        detail: String,
    },

    #[error("{provider} returned no deck content")]
    Empty { provider: &'static str },
}

/// The configured provider could not be wired up at startup.
#[derive(Debug, ThisError)]
pub enum ProviderSetupError {
    #[error("invalid {provider} endpoint: {source}")]
    Endpoint {
        provider: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("{provider} API key contains characters not allowed in a header")]
    InvalidKey { provider: &'static str },

    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl IsRetryable for UpstreamError {
    fn is_retryable(&self) -> bool {
        match self {
            UpstreamError::Status { status, .. } => *status == 429 || *status >= 500,
            UpstreamError::Transport { source, .. } => {
                !matches!(source, TransportError::Timeout(_))
            }
            UpstreamError::Malformed { .. } | UpstreamError::Empty { .. } => false,
        }
    }
}
