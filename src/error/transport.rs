use std::time::Duration;
use thiserror::Error as ThisError;

/// Failure below the HTTP status line: nothing usable came back.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum TransportError {
    #[error("connection refused: {0}")]
    Connect(String),

    #[error("request aborted after {0:?}")]
    Timeout(Duration),

    #[error("transport failure: {0}")]
    Other(String),
}

impl TransportError {
    pub fn from_reqwest(err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}
