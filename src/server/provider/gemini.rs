use super::prompt;
use super::upstream::{UpstreamHttp, endpoint};
use crate::client::DeckKind;
use crate::config::ServerConfig;
use crate::error::{ProviderSetupError, UpstreamError};
use cofoundr_schema::GenerationRequest;
use cofoundr_schema::upstream::{
    GeminiContent, GeminiGenerateRequest, GeminiGenerateResponse, GeminiGenerationConfig,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

pub(crate) const PROVIDER: &str = "gemini";

const X_GOOG_API_KEY: HeaderName = HeaderName::from_static("x-goog-api-key");

/// `generateContent` client producing one deck per call.
#[derive(Debug)]
pub struct GeminiDeckClient {
    http: UpstreamHttp,
    url: Url,
    headers: HeaderMap,
    model: String,
    temperature: f32,
}

impl GeminiDeckClient {
    pub(crate) fn new(cfg: &ServerConfig, api_key: &str) -> Result<Self, ProviderSetupError> {
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|_| ProviderSetupError::InvalidKey { provider: PROVIDER })?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(X_GOOG_API_KEY, key);

        let model = cfg.model_name().to_string();
        let path = format!("models/{model}:generateContent");
        Ok(Self {
            http: UpstreamHttp::from_config(cfg)?,
            url: endpoint(PROVIDER, &cfg.gemini_base_url, &path)?,
            headers,
            model,
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
        let body = GeminiGenerateRequest {
            contents: vec![GeminiContent::text(
                Some("user"),
                prompt::user_prompt(kind, req),
            )],
            system_instruction: Some(GeminiContent::text(None, prompt::system_prompt(kind))),
            generation_config: Some(GeminiGenerationConfig {
                max_output_tokens: prompt::max_tokens(kind),
                temperature: self.temperature,
            }),
        };

        let resp: GeminiGenerateResponse = self
            .http
            .post_json(PROVIDER, &self.url, &self.headers, &body)
            .await?;

        resp.first_text()
            .map(|text| text.trim().to_string())
            .ok_or(UpstreamError::Empty { provider: PROVIDER })
    }
}
