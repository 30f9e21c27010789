use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Settings of the generation client and its health monitor.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Backend base URL; endpoint paths are joined onto it.
    /// TOML: `client.base_url`. Default: `http://localhost:8000`.
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Per-attempt timeout of generation calls, in seconds.
    /// TOML: `client.generation_timeout_secs`. Default: `120`.
    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,

    /// Timeout of a single health probe, in seconds.
    /// TOML: `client.health_timeout_secs`. Default: `10`.
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,

    /// Interval between health probes, in seconds.
    /// TOML: `client.health_interval_secs`. Default: `30`.
    #[serde(default = "default_health_interval_secs")]
    pub health_interval_secs: u64,

    /// Total attempts of a generation call, first try included.
    /// TOML: `client.retry_max_attempts`. Default: `3`.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: usize,

    /// Linear backoff unit; the n-th retry waits `n * retry_base_delay_ms`.
    /// TOML: `client.retry_base_delay_ms`. Default: `2000`.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    /// TOML: `client.user_agent`.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            generation_timeout_secs: default_generation_timeout_secs(),
            health_timeout_secs: default_health_timeout_secs(),
            health_interval_secs: default_health_interval_secs(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base url is valid")
}

fn default_generation_timeout_secs() -> u64 {
    120
}

fn default_health_timeout_secs() -> u64 {
    10
}

fn default_health_interval_secs() -> u64 {
    30
}

fn default_retry_max_attempts() -> usize {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    2000
}

fn default_user_agent() -> String {
    format!("cofoundr/{}", env!("CARGO_PKG_VERSION"))
}
