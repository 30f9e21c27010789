use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate` and `POST /api/generate-detailed`.
///
/// Optional fields are omitted from the wire form when unset. `request_id` carries no meaning to
/// the backend beyond making two otherwise identical requests distinct.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationRequest {
    /// The startup idea, as typed by the user.
    #[serde(rename = "idea")]
    pub idea_text: String,

    #[serde(default = "default_target_audience")]
    pub target_audience: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    #[serde(default = "default_funding_stage")]
    pub funding_stage: String,

    #[serde(default = "default_presentation_style")]
    pub presentation_style: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_context: Option<String>,

    #[serde(default)]
    pub request_id: String,
}

pub const DEFAULT_TARGET_AUDIENCE: &str = "general investors";
pub const DEFAULT_FUNDING_STAGE: &str = "seed";
pub const DEFAULT_PRESENTATION_STYLE: &str = "balanced";

fn default_target_audience() -> String {
    DEFAULT_TARGET_AUDIENCE.to_string()
}

fn default_funding_stage() -> String {
    DEFAULT_FUNDING_STAGE.to_string()
}

fn default_presentation_style() -> String {
    DEFAULT_PRESENTATION_STYLE.to_string()
}
