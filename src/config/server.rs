use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Where the backend gets its decks from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Built-in keyword-themed templates; no network access.
    Template,
    Openai,
    Gemini,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProviderKind::Template => "template",
            ProviderKind::Openai => "openai",
            ProviderKind::Gemini => "gemini",
        })
    }
}

/// Deck generation backend settings.
///
/// API keys are never read from `config.toml` defaults serialization; they come from
/// `OPENAI_API_KEY` / `GEMINI_API_KEY` (a `.env` file works) unless set explicitly in the table.
#[derive(Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// TOML: `server.provider`. Default: `openai`, or `template` when `MOCK_MODE=true`,
    /// or `gemini` when `USE_GEMINI=true`.
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,

    /// Model name sent upstream. TOML: `server.model`. Default: per provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// TOML: `server.openai_base_url`. Default: `https://api.openai.com/v1/`.
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: Url,

    /// TOML: `server.gemini_base_url`.
    /// Default: `https://generativelanguage.googleapis.com/v1beta/`.
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: Url,

    #[serde(default = "default_openai_api_key", skip_serializing)]
    pub openai_api_key: Option<String>,

    #[serde(default = "default_gemini_api_key", skip_serializing)]
    pub gemini_api_key: Option<String>,

    /// Timeout of one upstream call, in seconds.
    /// TOML: `server.upstream_timeout_secs`. Default: `120`.
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,

    /// Attempts per upstream call; 429 and 5xx answers are retried.
    /// TOML: `server.upstream_max_attempts`. Default: `2`.
    #[serde(default = "default_upstream_max_attempts")]
    pub upstream_max_attempts: usize,

    /// TOML: `server.upstream_retry_delay_ms`. Default: `1000`.
    #[serde(default = "default_upstream_retry_delay_ms")]
    pub upstream_retry_delay_ms: u64,

    /// TOML: `server.temperature`. Default: `0.7`.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("provider", &self.provider)
            .field("model", &self.model_name())
            .field("openai_base_url", &self.openai_base_url.as_str())
            .field("gemini_base_url", &self.gemini_base_url.as_str())
            .field("api_key_configured", &self.api_key().is_some())
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .finish_non_exhaustive()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            openai_base_url: default_openai_base_url(),
            gemini_base_url: default_gemini_base_url(),
            openai_api_key: default_openai_api_key(),
            gemini_api_key: default_gemini_api_key(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
            upstream_max_attempts: default_upstream_max_attempts(),
            upstream_retry_delay_ms: default_upstream_retry_delay_ms(),
            temperature: default_temperature(),
        }
    }
}

impl ServerConfig {
    /// Template-only settings that never reach the network or the environment.
    pub fn template() -> Self {
        Self {
            provider: ProviderKind::Template,
            openai_api_key: None,
            gemini_api_key: None,
            ..Self::default()
        }
    }

    pub fn model_name(&self) -> &str {
        match (&self.model, self.provider) {
            (Some(model), _) if !model.trim().is_empty() => model.trim(),
            (_, ProviderKind::Gemini) => DEFAULT_GEMINI_MODEL,
            _ => DEFAULT_OPENAI_MODEL,
        }
    }

    /// Key of the selected provider, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        let key = match self.provider {
            ProviderKind::Template => None,
            ProviderKind::Openai => self.openai_api_key.as_deref(),
            ProviderKind::Gemini => self.gemini_api_key.as_deref(),
        };
        key.map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn upstream_retry_delay(&self) -> Duration {
        Duration::from_millis(self.upstream_retry_delay_ms)
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn default_provider() -> ProviderKind {
    if env_flag("MOCK_MODE") {
        ProviderKind::Template
    } else if env_flag("USE_GEMINI") {
        ProviderKind::Gemini
    } else {
        ProviderKind::Openai
    }
}

fn default_openai_base_url() -> Url {
    Url::parse(DEFAULT_OPENAI_BASE_URL).expect("default openai url is valid")
}

fn default_gemini_base_url() -> Url {
    Url::parse(DEFAULT_GEMINI_BASE_URL).expect("default gemini url is valid")
}

fn default_openai_api_key() -> Option<String> {
    env_value("OPENAI_API_KEY")
}

fn default_gemini_api_key() -> Option<String> {
    env_value("GEMINI_API_KEY")
}

fn default_upstream_timeout_secs() -> u64 {
    120
}

fn default_upstream_max_attempts() -> usize {
    2
}

fn default_upstream_retry_delay_ms() -> u64 {
    1000
}

fn default_temperature() -> f32 {
    0.7
}
