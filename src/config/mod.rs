mod basic;
mod client;
mod server;

pub use basic::BasicConfig;
pub use client::{ClientConfig, DEFAULT_BASE_URL};
pub use server::{
    DEFAULT_GEMINI_MODEL, DEFAULT_OPENAI_MODEL, ProviderKind, ServerConfig,
};

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Generation client settings (see `client` table in config.toml).
    #[serde(default)]
    pub client: ClientConfig,

    /// Deck provider settings of the backend (see `server` table in config.toml).
    #[serde(default)]
    pub server: ServerConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Builds a Figment that merges defaults and a config TOML file.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        }
    }

    /// Loads configuration by merging defaults and `config.toml` if present.
    pub fn from_optional_toml() -> Self {
        Self::figment().extract().unwrap_or_else(|err| {
            panic!("failed to extract configuration (defaults + optional config.toml): {err}")
        })
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_optional_toml);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides_only_named_fields() {
        let cfg: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                r#"
                [basic]
                listen_port = 9100

                [client]
                base_url = "http://127.0.0.1:9100"
                retry_max_attempts = 5
                "#,
            ))
            .extract()
            .expect("extract config");

        assert_eq!(cfg.basic.listen_port, 9100);
        assert_eq!(cfg.basic.loglevel, "info");
        assert_eq!(cfg.client.base_url.as_str(), "http://127.0.0.1:9100/");
        assert_eq!(cfg.client.retry_max_attempts, 5);
        assert_eq!(cfg.client.retry_base_delay_ms, 2000);
        assert_eq!(cfg.client.health_interval_secs, 30);
    }

    #[test]
    fn server_table_selects_provider_and_model() {
        let cfg: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                r#"
                [server]
                provider = "gemini"
                gemini_api_key = "test-key"
                upstream_max_attempts = 1
                "#,
            ))
            .extract()
            .expect("extract config");

        assert_eq!(cfg.server.provider, ProviderKind::Gemini);
        assert_eq!(cfg.server.model_name(), DEFAULT_GEMINI_MODEL);
        assert_eq!(cfg.server.api_key(), Some("test-key"));
        assert_eq!(cfg.server.upstream_max_attempts, 1);
        assert_eq!(cfg.server.upstream_timeout_secs, 120);
    }

    #[test]
    fn template_settings_ignore_keys_and_hide_them() {
        let cfg = ServerConfig {
            openai_api_key: Some("sk-secret".to_string()),
            ..ServerConfig::template()
        };
        assert_eq!(cfg.provider, ProviderKind::Template);
        assert_eq!(cfg.api_key(), None);
        assert!(!format!("{cfg:?}").contains("sk-secret"));
    }
}
