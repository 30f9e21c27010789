//! Deck sources of the backend: the built-in templates or a language model provider.

mod gemini;
mod openai;
pub mod prompt;
mod upstream;

pub use gemini::GeminiDeckClient;
pub use openai::OpenAiDeckClient;

use crate::client::DeckKind;
use crate::config::{ProviderKind, ServerConfig};
use crate::error::{ProviderSetupError, UpstreamError};
use crate::server::deck;
use cofoundr_schema::GenerationRequest;
use std::sync::Arc;
use tracing::{info, warn};

/// Produces the deck text for one request.
#[derive(Debug, Clone)]
pub enum DeckEngine {
    /// Keyword-themed templates, no network access.
    Template,
    OpenAi(Arc<OpenAiDeckClient>),
    Gemini(Arc<GeminiDeckClient>),
}

impl DeckEngine {
    /// Engine for the configured provider. A provider without an API key falls back to
    /// [`DeckEngine::Template`].
    pub fn from_config(cfg: &ServerConfig) -> Result<Self, ProviderSetupError> {
        let engine = match (cfg.provider, cfg.api_key()) {
            (ProviderKind::Template, _) => Self::Template,
            (ProviderKind::Openai, Some(key)) => {
                Self::OpenAi(Arc::new(OpenAiDeckClient::new(cfg, key)?))
            }
            (ProviderKind::Gemini, Some(key)) => {
                Self::Gemini(Arc::new(GeminiDeckClient::new(cfg, key)?))
            }
            (provider, None) => {
                warn!(
                    %provider,
                    "No API key configured for provider, serving template decks instead"
                );
                Self::Template
            }
        };

        info!(
            provider = %engine.provider(),
            model = engine.model().unwrap_or("-"),
            "Deck engine ready"
        );
        Ok(engine)
    }

    pub fn provider(&self) -> ProviderKind {
        match self {
            Self::Template => ProviderKind::Template,
            Self::OpenAi(_) => ProviderKind::Openai,
            Self::Gemini(_) => ProviderKind::Gemini,
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, Self::Template)
    }

    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Template => None,
            Self::OpenAi(client) => Some(client.model()),
            Self::Gemini(client) => Some(client.model()),
        }
    }

    pub async fn generate(
        &self,
        kind: DeckKind,
        req: &GenerationRequest,
    ) -> Result<String, UpstreamError> {
        match self {
            Self::Template => Ok(deck::render(kind, req)),
            Self::OpenAi(client) => client.generate(kind, req).await,
            Self::Gemini(client) => client.generate(kind, req).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_without_key_falls_back_to_templates() {
        let cfg = ServerConfig {
            provider: ProviderKind::Gemini,
            ..ServerConfig::template()
        };
        let engine = DeckEngine::from_config(&cfg).expect("engine");
        assert!(engine.is_template());
        assert_eq!(engine.model(), None);
    }

    #[test]
    fn keyed_provider_uses_configured_model() {
        let cfg = ServerConfig {
            provider: ProviderKind::Openai,
            model: Some("gpt-4o-mini".to_string()),
            openai_api_key: Some("sk-test".to_string()),
            ..ServerConfig::template()
        };
        let engine = DeckEngine::from_config(&cfg).expect("engine");
        assert_eq!(engine.provider(), ProviderKind::Openai);
        assert_eq!(engine.model(), Some("gpt-4o-mini"));
    }

    #[test]
    fn key_with_newline_is_rejected() {
        let cfg = ServerConfig {
            provider: ProviderKind::Openai,
            openai_api_key: Some("sk-\ntest".to_string()),
            ..ServerConfig::template()
        };
        assert!(matches!(
            DeckEngine::from_config(&cfg),
            Err(ProviderSetupError::InvalidKey { provider: "openai" })
        ));
    }
}
