use cofoundr_schema::{GenerateResponse, GenerationRequest};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::retry::RetryPolicy;
use super::transport::Transport;
use crate::config::ClientConfig;
use crate::error::{IsRetryable, PitchError};
use crate::utils::logging::{preview, with_pretty_json_debug};

/// Prefix of every failure string handed back to the presentation layer.
pub const FAILURE_GLYPH: &str = "❌";

/// Which generation endpoint to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeckKind {
    /// Five slides, `POST /api/generate`.
    #[default]
    Standard,
    /// Ten slides, `POST /api/generate-detailed`.
    Detailed,
}

impl DeckKind {
    pub fn path(self) -> &'static str {
        match self {
            DeckKind::Standard => "api/generate",
            DeckKind::Detailed => "api/generate-detailed",
        }
    }
}

/// Joins `path` below `base`, keeping any path prefix the base already has.
pub fn endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    if base.path().ends_with('/') {
        base.join(path)
    } else {
        let mut base = base.clone();
        base.set_path(&format!("{}/", base.path()));
        base.join(path)
    }
}

pub fn render_failure(err: &PitchError) -> String {
    format!("{FAILURE_GLYPH} {err}")
}

pub fn is_failure(text: &str) -> bool {
    text.starts_with(FAILURE_GLYPH)
}

/// Generation client: one POST per attempt, transient failures retried per [`RetryPolicy`].
pub struct ResilientClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
    retry: RetryPolicy,
    timeout: Duration,
}

impl ResilientClient {
    pub fn new(transport: Arc<dyn Transport>, cfg: &ClientConfig) -> Self {
        Self {
            transport,
            base_url: cfg.base_url.clone(),
            retry: RetryPolicy::from_config(cfg),
            timeout: cfg.generation_timeout(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Standard deck, or the failure string. Never errors.
    pub async fn send(&self, request: &GenerationRequest) -> String {
        self.send_kind(DeckKind::Standard, request).await
    }

    /// Detailed deck, or the failure string. Never errors.
    pub async fn send_detailed(&self, request: &GenerationRequest) -> String {
        self.send_kind(DeckKind::Detailed, request).await
    }

    pub async fn send_kind(&self, kind: DeckKind, request: &GenerationRequest) -> String {
        match self.try_send(kind, request).await {
            Ok(deck) => deck,
            Err(err) => render_failure(&err),
        }
    }

    /// Typed variant of [`send_kind`](Self::send_kind) for callers that branch on the failure.
    pub async fn try_send(
        &self,
        kind: DeckKind,
        request: &GenerationRequest,
    ) -> Result<String, PitchError> {
        let url = endpoint(&self.base_url, kind.path())?;
        let body = serde_json::to_value(request)?;

        with_pretty_json_debug(&body, |pretty_body| {
            debug!(
                url = %url,
                request_id = %request.request_id,
                body = %pretty_body,
                "[Generate] Request payload"
            );
        });

        let mut attempt = 0usize;
        self.retry
            .run_classified(|| {
                attempt += 1;
                self.attempt(attempt, kind, &url, &body)
            })
            .await
            .inspect_err(|err| {
                warn!(
                    url = %url,
                    request_id = %request.request_id,
                    retryable = err.is_retryable(),
                    kind = ?err.kind(),
                    "[Generate] Giving up: {err}"
                );
            })
    }

    async fn attempt(
        &self,
        attempt: usize,
        kind: DeckKind,
        url: &Url,
        body: &serde_json::Value,
    ) -> Result<String, PitchError> {
        info!(
            url = %url,
            deck = ?kind,
            attempt,
            max_attempts = self.retry.max_attempts(),
            "[Generate] Attempt {attempt}/{}",
            self.retry.max_attempts()
        );

        let resp = self
            .transport
            .post_json(url, body, self.timeout)
            .await
            .map_err(|e| PitchError::from_transport(e, url))
            .inspect_err(|err| {
                warn!(url = %url, attempt, kind = ?err.kind(), "[Generate] Transport error: {err}");
            })?;

        if !resp.status.is_success() {
            let err = PitchError::from_status(resp.status, &resp.body);
            warn!(
                url = %url,
                attempt,
                status = %resp.status,
                retryable = err.is_retryable(),
                body = %preview(&resp.body),
                "[Generate] Server answered with error status"
            );
            return Err(err);
        }

        let payload: GenerateResponse = serde_json::from_str(&resp.body).map_err(|e| {
            warn!(url = %url, body = %preview(&resp.body), "[Generate] Undecodable response");
            PitchError::MalformedResponse(e.to_string())
        })?;

        with_pretty_json_debug(&payload, |pretty_body| {
            debug!(url = %url, body = %pretty_body, "[Generate] Response payload");
        });

        if !payload.success {
            return Err(PitchError::Rejected(
                payload
                    .message
                    .unwrap_or_else(|| "the server could not generate a deck".to_string()),
            ));
        }

        match payload.deck {
            Some(deck) if !deck.trim().is_empty() => Ok(deck),
            _ => Err(PitchError::MalformedResponse(
                "response carried no deck".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_prefix() {
        let base = Url::parse("http://localhost:8000").expect("url");
        assert_eq!(
            endpoint(&base, DeckKind::Standard.path())
                .expect("join")
                .as_str(),
            "http://localhost:8000/api/generate"
        );

        let prefixed = Url::parse("http://example.test/cofoundr").expect("url");
        assert_eq!(
            endpoint(&prefixed, DeckKind::Detailed.path())
                .expect("join")
                .as_str(),
            "http://example.test/cofoundr/api/generate-detailed"
        );
    }

    #[test]
    fn failure_strings_carry_the_glyph() {
        let rendered = render_failure(&PitchError::Rejected("quota exceeded".to_string()));
        assert!(is_failure(&rendered));
        assert_eq!(rendered, "❌ Generation failed: quota exceeded");
        assert!(!is_failure("**SLIDE 1: PROBLEM**"));
    }
}
