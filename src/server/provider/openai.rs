use super::prompt;
use super::upstream::{UpstreamHttp, endpoint};
use crate::client::DeckKind;
use crate::config::ServerConfig;
use crate::error::{ProviderSetupError, UpstreamError};
use cofoundr_schema::GenerationRequest;
use cofoundr_schema::upstream::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use url::Url;

pub(crate) const PROVIDER: &str = "openai";

/// Chat completions client producing one deck per call.
#[derive(Debug)]
pub struct OpenAiDeckClient {
    http: UpstreamHttp,
    url: Url,
    headers: HeaderMap,
    model: String,
    temperature: f32,
}

impl OpenAiDeckClient {
    pub(crate) fn new(cfg: &ServerConfig, api_key: &str) -> Result<Self, ProviderSetupError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| ProviderSetupError::InvalidKey { provider: PROVIDER })?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        Ok(Self {
            http: UpstreamHttp::from_config(cfg)?,
            url: endpoint(PROVIDER, &cfg.openai_base_url, "chat/completions")?,
            headers,
            model: cfg.model_name().to_string(),
            temperature: cfg.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) async fn generate(
        &self,
        kind: DeckKind,
        req: &GenerationRequest,
    ) -> Result<String, UpstreamError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(prompt::system_prompt(kind)),
                ChatMessage::user(prompt::user_prompt(kind, req)),
            ],
            max_tokens: prompt::max_tokens(kind),
            temperature: self.temperature,
        };

        let resp: ChatCompletionResponse = self
            .http
            .post_json(PROVIDER, &self.url, &self.headers, &body)
            .await?;

        resp.first_content()
            .map(|content| content.trim().to_string())
            .ok_or(UpstreamError::Empty { provider: PROVIDER })
    }
}
