//! Request and response bodies of the language model APIs the backend can delegate to.

mod gemini;
mod openai;

pub use gemini::{
    GeminiCandidate, GeminiContent, GeminiGenerateRequest, GeminiGenerateResponse,
    GeminiGenerationConfig, GeminiPart,
};
pub use openai::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

use serde::{Deserialize, Serialize};

/// `{"error": {"message": ..}}`, the error envelope both providers answer with.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpstreamErrorBody {
    #[serde(default)]
    pub error: UpstreamErrorObject,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpstreamErrorObject {
    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
