use chrono::Utc;
use cofoundr_schema::GenerationRequest;
use cofoundr_schema::pitch::{
    DEFAULT_FUNDING_STAGE, DEFAULT_PRESENTATION_STYLE, DEFAULT_TARGET_AUDIENCE,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

const REQUEST_ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// User-selected knobs of a generation. Unset and blank values take the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationOptions {
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub funding_stage: Option<String>,
    #[serde(default)]
    pub presentation_style: Option<String>,
    #[serde(default)]
    pub business_model: Option<String>,
    #[serde(default)]
    pub competitor_context: Option<String>,
}

impl GenerationOptions {
    pub fn target_audience(mut self, value: impl Into<String>) -> Self {
        self.target_audience = Some(value.into());
        self
    }

    pub fn industry(mut self, value: impl Into<String>) -> Self {
        self.industry = Some(value.into());
        self
    }

    pub fn funding_stage(mut self, value: impl Into<String>) -> Self {
        self.funding_stage = Some(value.into());
        self
    }

    pub fn presentation_style(mut self, value: impl Into<String>) -> Self {
        self.presentation_style = Some(value.into());
        self
    }

    pub fn business_model(mut self, value: impl Into<String>) -> Self {
        self.business_model = Some(value.into());
        self
    }

    pub fn competitor_context(mut self, value: impl Into<String>) -> Self {
        self.competitor_context = Some(value.into());
        self
    }
}

/// Assembles the wire request. Does not validate; run the content validator first.
pub fn build(idea: &str, options: &GenerationOptions) -> GenerationRequest {
    GenerationRequest {
        idea_text: idea.to_string(),
        target_audience: or_default(options.target_audience.as_deref(), DEFAULT_TARGET_AUDIENCE),
        industry: non_blank(options.industry.as_deref()),
        funding_stage: or_default(options.funding_stage.as_deref(), DEFAULT_FUNDING_STAGE),
        presentation_style: or_default(
            options.presentation_style.as_deref(),
            DEFAULT_PRESENTATION_STYLE,
        ),
        business_model: non_blank(options.business_model.as_deref()),
        competitor_context: non_blank(options.competitor_context.as_deref()),
        request_id: generate_request_id(),
    }
}

/// `<epoch_ms>_<base36 suffix>`; only there to keep the backend from deduplicating.
pub fn generate_request_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..REQUEST_ID_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();
    format!("{}_{suffix}", Utc::now().timestamp_millis())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn or_default(value: Option<&str>, default: &str) -> String {
    non_blank(value).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_take_defaults() {
        let req = build(
            "A mobile app for dog walking services",
            &GenerationOptions::default(),
        );

        assert_eq!(req.idea_text, "A mobile app for dog walking services");
        assert_eq!(req.target_audience, "general investors");
        assert_eq!(req.funding_stage, "seed");
        assert_eq!(req.presentation_style, "balanced");
        assert!(req.industry.is_none());
        assert!(req.business_model.is_none());
        assert!(req.competitor_context.is_none());
        assert!(!req.request_id.is_empty());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let options = GenerationOptions::default()
            .target_audience("   ")
            .funding_stage("")
            .industry(" ");
        let req = build("A marketplace for used textbooks", &options);

        assert_eq!(req.target_audience, "general investors");
        assert_eq!(req.funding_stage, "seed");
        assert!(req.industry.is_none());
    }

    #[test]
    fn explicit_options_pass_through() {
        let options = GenerationOptions::default()
            .target_audience("angel investors")
            .industry("Pet care")
            .funding_stage("series-a")
            .presentation_style("bold")
            .business_model("subscription")
            .competitor_context("Rover, Wag");
        let req = build("A mobile app for dog walking services", &options);

        assert_eq!(req.target_audience, "angel investors");
        assert_eq!(req.industry.as_deref(), Some("Pet care"));
        assert_eq!(req.funding_stage, "series-a");
        assert_eq!(req.presentation_style, "bold");
        assert_eq!(req.business_model.as_deref(), Some("subscription"));
        assert_eq!(req.competitor_context.as_deref(), Some("Rover, Wag"));
    }

    #[test]
    fn request_id_has_timestamp_and_base36_suffix() {
        let id = generate_request_id();
        let (millis, suffix) = id.split_once('_').expect("separator");

        assert!(millis.parse::<i64>().expect("epoch millis") > 0);
        assert_eq!(suffix.len(), REQUEST_ID_SUFFIX_LEN);
        assert!(
            suffix
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
        );
    }

    #[test]
    fn identical_calls_get_distinct_ids() {
        let options = GenerationOptions::default();
        let a = build("A mobile app for dog walking services", &options);
        let b = build("A mobile app for dog walking services", &options);

        assert_ne!(a.request_id, b.request_id);
        assert_eq!(
            GenerationRequest {
                request_id: String::new(),
                ..a
            },
            GenerationRequest {
                request_id: String::new(),
                ..b
            }
        );
    }

    #[test]
    fn wire_form_matches_backend_field_names() {
        let req = build(
            "A mobile app for dog walking services",
            &GenerationOptions::default(),
        );
        let value = serde_json::to_value(&req).expect("serialize");

        assert_eq!(value["idea"], "A mobile app for dog walking services");
        assert_eq!(value["target_audience"], "general investors");
        assert_eq!(value["funding_stage"], "seed");
        assert_eq!(value["presentation_style"], "balanced");
        assert!(value["request_id"].as_str().is_some_and(|id| !id.is_empty()));
    }
}
