use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::config::ClientConfig;
use crate::error::TransportError;

/// Status line and body of an HTTP exchange that completed, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The HTTP seam of the client. Every call carries its own timeout.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        url: &Url,
        body: &Value,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;

    async fn get(&self, url: &Url, timeout: Duration) -> Result<TransportResponse, TransportError>;
}

/// [`Transport`] over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn from_config(cfg: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self::new(client))
    }

    async fn finish(
        request: reqwest::RequestBuilder,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let resp = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&e, timeout))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&e, timeout))?;

        Ok(TransportResponse { status, body })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &Url,
        body: &Value,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        Self::finish(self.client.post(url.clone()).json(body), timeout).await
    }

    async fn get(&self, url: &Url, timeout: Duration) -> Result<TransportResponse, TransportError> {
        Self::finish(self.client.get(url.clone()), timeout).await
    }
}
