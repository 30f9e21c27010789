use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payload of `GET /`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub status: String,
    pub endpoints: BTreeMap<String, String>,
}

impl ServiceInfo {
    pub fn running<I, K, V>(
        service: impl Into<String>,
        version: impl Into<String>,
        endpoints: I,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            service: service.into(),
            version: version.into(),
            status: "running".to_string(),
            endpoints: endpoints
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
