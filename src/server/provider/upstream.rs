use crate::client::RetryPolicy;
use crate::config::ServerConfig;
use crate::error::{ProviderSetupError, TransportError, UpstreamError};
use cofoundr_schema::upstream::UpstreamErrorBody;
use reqwest::header::HeaderMap;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Characters of a failed upstream body kept for the error message.
const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;

/// JSON POSTs to a provider: per-call timeout, 429/5xx retried with linear backoff.
#[derive(Debug, Clone)]
pub(crate) struct UpstreamHttp {
    client: reqwest::Client,
    timeout: Duration,
    retry: RetryPolicy,
}

impl UpstreamHttp {
    pub(crate) fn from_config(cfg: &ServerConfig) -> Result<Self, ProviderSetupError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cofoundr-server/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            timeout: cfg.upstream_timeout(),
            retry: RetryPolicy::new(cfg.upstream_max_attempts, cfg.upstream_retry_delay()),
        })
    }

    pub(crate) async fn post_json<B, R>(
        &self,
        provider: &'static str,
        url: &Url,
        headers: &HeaderMap,
        body: &B,
    ) -> Result<R, UpstreamError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        self.retry
            .run_classified(|| self.post_once(provider, url, headers, body))
            .await
    }

    async fn post_once<B, R>(
        &self,
        provider: &'static str,
        url: &Url,
        headers: &HeaderMap,
        body: &B,
    ) -> Result<R, UpstreamError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let transport = |err: &reqwest::Error| UpstreamError::Transport {
            provider,
            source: TransportError::from_reqwest(err, self.timeout),
        };

        let resp = self
            .client
            .post(url.clone())
            .headers(headers.clone())
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| transport(&e))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| transport(&e))?;

        if !status.is_success() {
            let message = upstream_message(&text);
            debug!(
                provider,
                %status,
                url = %url,
                body = %message,
                "Upstream answered with an error"
            );
            return Err(UpstreamError::Status {
                provider,
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| UpstreamError::Malformed {
            provider,
            detail: e.to_string(),
        })
    }
}

/// `error.message` of the provider envelope, else a preview of the raw body.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<UpstreamErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let preview: String = body
                .trim()
                .chars()
                .take(UPSTREAM_BODY_PREVIEW_CHARS)
                .collect();
            if preview.is_empty() {
                "empty response body".to_string()
            } else {
                preview
            }
        })
}

/// `base` joined with `path`, keeping the last segment of a base without a trailing slash.
pub(crate) fn endpoint(
    provider: &'static str,
    base: &Url,
    path: &str,
) -> Result<Url, ProviderSetupError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(path)
        .map_err(|source| ProviderSetupError::Endpoint { provider, source })
}
