#![allow(dead_code)]

use async_trait::async_trait;
use cofoundr::client::{Transport, TransportResponse};
use cofoundr::error::TransportError;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

pub type Reply = Result<TransportResponse, TransportError>;

pub fn ok_json(body: &str) -> Reply {
    Ok(TransportResponse::new(StatusCode::OK, body))
}

pub fn status(code: u16, body: &str) -> Reply {
    Ok(TransportResponse::new(
        StatusCode::from_u16(code).expect("valid status code"),
        body,
    ))
}

pub const HEALTHY_BODY: &str = r#"{"status":"healthy","service":"pitch-deck-generator"}"#;

pub fn deck_body(deck: &str) -> String {
    serde_json::json!({ "success": true, "deck": deck, "message": "ok" }).to_string()
}

/// In-memory transport: POSTs consume a script, GETs answer per the `healthy` switch.
///
/// Every POST is recorded with its URL, body and the (tokio) instant it arrived.
pub struct ScriptedTransport {
    posts: Mutex<VecDeque<Reply>>,
    healthy: AtomicBool,
    calls: Mutex<Vec<(Url, Value, Instant)>>,
    gets: Mutex<usize>,
}

impl ScriptedTransport {
    pub fn new(posts: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            posts: Mutex::new(posts.into_iter().collect()),
            healthy: AtomicBool::new(true),
            calls: Mutex::new(Vec::new()),
            gets: Mutex::new(0),
        }
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<(Url, Value, Instant)> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn post_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    pub fn get_count(&self) -> usize {
        *self.gets.lock().expect("gets lock")
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(
        &self,
        url: &Url,
        body: &Value,
        _timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((url.clone(), body.clone(), Instant::now()));
        self.posts
            .lock()
            .expect("posts lock")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("script exhausted".to_string())))
    }

    async fn get(
        &self,
        _url: &Url,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        *self.gets.lock().expect("gets lock") += 1;
        if self.healthy.load(Ordering::SeqCst) {
            ok_json(HEALTHY_BODY)
        } else {
            Err(TransportError::Timeout(timeout))
        }
    }
}
