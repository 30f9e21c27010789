use crate::config::ServerConfig;
use crate::error::ProviderSetupError;
use crate::server::provider::DeckEngine;
use crate::server::routes;

use axum::{
    Router,
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
};
use base64::Engine as _;
use rand::RngCore;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn protocol_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

/// Which provider keys were present at startup, reported by `/health` and `/api/health`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyStatus {
    pub openai: bool,
    pub gemini: bool,
}

impl KeyStatus {
    pub fn from_config(cfg: &ServerConfig) -> Self {
        let present = |key: Option<&str>| key.is_some_and(|k| !k.trim().is_empty());
        Self {
            openai: present(cfg.openai_api_key.as_deref()),
            gemini: present(cfg.gemini_api_key.as_deref()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CofoundrState {
    engine: DeckEngine,
    keys: KeyStatus,
    started_at: Instant,
}

impl CofoundrState {
    /// Template decks only, no provider keys.
    pub fn new() -> Self {
        Self::with_engine(DeckEngine::Template, KeyStatus::default())
    }

    pub fn with_engine(engine: DeckEngine, keys: KeyStatus) -> Self {
        Self {
            engine,
            keys,
            started_at: Instant::now(),
        }
    }

    pub fn from_config(cfg: &ServerConfig) -> Result<Self, ProviderSetupError> {
        Ok(Self::with_engine(
            DeckEngine::from_config(cfg)?,
            KeyStatus::from_config(cfg),
        ))
    }

    pub fn engine(&self) -> &DeckEngine {
        &self.engine
    }

    pub fn keys(&self) -> KeyStatus {
        self.keys
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl Default for CofoundrState {
    fn default() -> Self {
        Self::new()
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

fn header_str<'a>(req: &'a Request, name: &HeaderName) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// One line per request, level chosen by status class. Echoes or assigns `x-request-id`.
async fn access_log(req: Request, next: Next) -> Response {
    let request_id = header_str(&req, &X_REQUEST_ID)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string);
    let line_head = format!(
        "{} {} {}",
        req.method(),
        req.uri().path(),
        protocol_label(req.version())
    );
    let user_agent = header_str(&req, &USER_AGENT).unwrap_or("-").to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;
    let elapsed_ms = start.elapsed().as_millis();

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let line = format!(
        "[{request_id}] {line_head} -> {} in {elapsed_ms}ms ({user_agent})",
        status.as_u16()
    );
    match status {
        s if s.is_server_error() => error!("{line}"),
        s if s.is_client_error() => warn!("{line}"),
        _ => info!("{line}"),
    }

    resp
}

pub fn cofoundr_router(state: CofoundrState) -> Router {
    Router::new()
        .merge(routes::router())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(access_log))
}
