use crate::server::router::CofoundrState;
use axum::{
    Router,
    routing::{get, post},
};

pub mod extract;
pub mod generate;
pub mod health;

pub fn router() -> Router<CofoundrState> {
    Router::new()
        .route("/", get(health::service_info_handler))
        .route("/health", get(health::global_health_handler))
        .route("/api/health", get(health::api_health_handler))
        .route("/api/test-mock", get(health::test_mock_handler))
        .route("/api/generate", post(generate::generate_handler))
        .route(
            "/api/generate-detailed",
            post(generate::generate_detailed_handler),
        )
}
