use serde::{Deserialize, Serialize};

/// Response of the generation endpoints.
///
/// A failed generation still answers `200` with `success: false` and an empty deck; the reason
/// is carried in `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GenerateResponse {
    pub fn generated(deck: String, message: impl Into<String>) -> Self {
        Self {
            success: true,
            deck: Some(deck),
            message: Some(message.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            deck: Some(String::new()),
            message: Some(message.into()),
        }
    }
}
