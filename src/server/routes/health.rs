use crate::server::router::CofoundrState;
use axum::{Json, extract::State};
use cofoundr_schema::{HealthPayload, ServiceInfo};
use serde_json::{Value, json};

pub const SERVICE_NAME: &str = "Cofoundr Pitch Deck Generator";
pub const SERVER_SERVICE: &str = "cofoundr-server";
pub const GENERATOR_SERVICE: &str = "pitch-deck-generator";

pub async fn service_info_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo::running(
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        [
            ("generate_pitch", "/api/generate"),
            ("generate_detailed_pitch", "/api/generate-detailed"),
            ("health", "/api/health"),
        ],
    ))
}

pub async fn global_health_handler(State(state): State<CofoundrState>) -> Json<HealthPayload> {
    Json(
        HealthPayload::healthy(SERVER_SERVICE)
            .with_field("uptime_secs", state.uptime_secs())
            .with_field("openai_configured", state.keys().openai),
    )
}

pub async fn api_health_handler(State(state): State<CofoundrState>) -> Json<HealthPayload> {
    let engine = state.engine();
    let keys = state.keys();
    let mock_mode = if engine.is_template() {
        "enabled"
    } else {
        "disabled"
    };

    Json(
        HealthPayload::healthy(GENERATOR_SERVICE)
            .with_field("mode", engine.provider().to_string())
            .with_field("mock_mode", mock_mode)
            .with_field("model", engine.model().map(str::to_string))
            .with_field("openai_configured", keys.openai)
            .with_field("gemini_configured", keys.gemini),
    )
}

/// Reports whether template decks are served and the raw `MOCK_MODE` variable.
pub async fn test_mock_handler(State(state): State<CofoundrState>) -> Json<Value> {
    let mock_env = std::env::var("MOCK_MODE").unwrap_or_else(|_| "not-set".to_string());
    Json(json!({
        "mock_mode": state.engine().is_template(),
        "mock_env": mock_env,
    }))
}
