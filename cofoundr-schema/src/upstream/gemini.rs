use serde::{Deserialize, Serialize};

/// Body of `POST /models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerateRequest {
    pub contents: Vec<GeminiContent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiContent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    pub fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![GeminiPart {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeminiGenerateResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: GeminiContent,
}

impl GeminiGenerateResponse {
    /// Text parts of the first candidate, concatenated.
    pub fn first_text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_keys() {
        let req = GeminiGenerateRequest {
            contents: vec![GeminiContent::text(Some("user"), "pitch")],
            system_instruction: Some(GeminiContent::text(None, "advisor")),
            generation_config: Some(GeminiGenerationConfig {
                max_output_tokens: 1500,
                temperature: 0.5,
            }),
        };
        let value = serde_json::to_value(&req).expect("serialize");

        assert_eq!(value["contents"][0]["parts"][0]["text"], "pitch");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "advisor");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 1500);
        assert!(value["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn first_text_joins_parts() {
        let parsed: GeminiGenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"**SLIDE 1"},{"text":": PROBLEM**"}]}}]}"#,
        )
        .expect("parse response");
        assert_eq!(parsed.first_text().as_deref(), Some("**SLIDE 1: PROBLEM**"));
        assert_eq!(GeminiGenerateResponse::default().first_text(), None);
    }
}
