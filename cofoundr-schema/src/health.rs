use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Liveness payload served by `GET /api/health`.
///
/// Backends may attach arbitrary extra fields; they are kept in `extra` and merged over a
/// `status: "healthy"` base when absent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthPayload {
    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(flatten)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

pub const HEALTHY: &str = "healthy";

fn default_status() -> String {
    HEALTHY.to_string()
}

impl HealthPayload {
    pub fn healthy(service: impl Into<String>) -> Self {
        Self {
            status: default_status(),
            service: Some(service.into()),
            timestamp: Some(Utc::now()),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case(HEALTHY) || self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_merges_into_healthy() {
        let parsed: HealthPayload = serde_json::from_str("{}").expect("parse empty payload");
        assert!(parsed.is_healthy());
        assert!(parsed.extra.is_empty());
    }

    #[test]
    fn unknown_fields_are_kept() {
        let raw = r#"{"service":"pitch-deck-generator","mock_mode":"enabled"}"#;
        let parsed: HealthPayload = serde_json::from_str(raw).expect("parse payload");

        assert_eq!(parsed.status, HEALTHY);
        assert_eq!(parsed.service.as_deref(), Some("pitch-deck-generator"));
        assert_eq!(
            parsed.extra.get("mock_mode").and_then(Value::as_str),
            Some("enabled")
        );
    }

    #[test]
    fn explicit_degraded_status_is_not_healthy() {
        let parsed: HealthPayload =
            serde_json::from_str(r#"{"status":"degraded"}"#).expect("parse payload");
        assert!(!parsed.is_healthy());
    }
}
