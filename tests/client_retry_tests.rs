mod common;

use cofoundr::client::{DeckKind, ResilientClient, RetryPolicy, build, is_failure};
use cofoundr::config::ClientConfig;
use cofoundr::error::{ErrorKind, TransportError};
use common::{ScriptedTransport, deck_body, status};
use std::sync::Arc;
use std::time::Duration;

const DECK: &str = "**SLIDE 1: PROBLEM**\n• Dog owners work long hours";

fn client(transport: &Arc<ScriptedTransport>) -> ResilientClient {
    ResilientClient::new(transport.clone(), &ClientConfig::default())
}

fn dog_walking() -> cofoundr_schema::GenerationRequest {
    build("A mobile app for dog walking services", &Default::default())
}

#[tokio::test(start_paused = true)]
async fn transient_failures_back_off_linearly_then_succeed() {
    let transport = Arc::new(ScriptedTransport::new([
        status(503, r#"{"detail":"warming up"}"#),
        status(503, ""),
        Ok(cofoundr::client::TransportResponse::new(
            reqwest::StatusCode::OK,
            deck_body(DECK),
        )),
    ]));

    let deck = client(&transport).send(&dog_walking()).await;
    assert_eq!(deck, DECK);

    let calls = transport.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].2 - calls[0].2, Duration::from_millis(2000));
    assert_eq!(calls[2].2 - calls[1].2, Duration::from_millis(4000));
    assert!(calls.iter().all(|(url, _, _)| url.path() == "/api/generate"));
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_surface_the_last_error() {
    let transport = Arc::new(ScriptedTransport::new([
        status(500, ""),
        status(502, ""),
        status(503, r#"{"message":"overloaded"}"#),
    ]));

    let text = client(&transport).send(&dog_walking()).await;

    assert_eq!(transport.post_count(), 3);
    assert_eq!(text, "❌ Server error (503 Service Unavailable): overloaded");
}

#[tokio::test(start_paused = true)]
async fn client_errors_are_not_retried() {
    let transport = Arc::new(ScriptedTransport::new([status(
        401,
        r#"{"detail":"missing api key"}"#,
    )]));

    let err = client(&transport)
        .try_send(DeckKind::Standard, &dog_walking())
        .await
        .expect_err("401 must fail");

    assert_eq!(transport.post_count(), 1);
    assert_eq!(err.kind(), ErrorKind::Client);
    assert_eq!(
        err.to_string(),
        "Request rejected (401 Unauthorized): missing api key"
    );
}

#[tokio::test(start_paused = true)]
async fn rate_limit_is_retried() {
    let transport = Arc::new(ScriptedTransport::new([
        status(429, ""),
        Ok(cofoundr::client::TransportResponse::new(
            reqwest::StatusCode::OK,
            deck_body(DECK),
        )),
    ]));

    let deck = client(&transport).send(&dog_walking()).await;

    assert_eq!(deck, DECK);
    assert_eq!(transport.post_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn refused_connection_fails_fast_with_endpoint() {
    let transport = Arc::new(ScriptedTransport::new([Err(TransportError::Connect(
        "connection refused".to_string(),
    ))]));

    let text = client(&transport).send(&dog_walking()).await;

    assert!(is_failure(&text));
    assert_eq!(
        text,
        concat!(
            "❌ Cannot connect to server at http://localhost:8000. ",
            "Please make sure the backend is running."
        )
    );
    assert_eq!(transport.post_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn timeouts_are_retried_and_reported() {
    let timeout = Duration::from_secs(120);
    let transport = Arc::new(ScriptedTransport::new([
        Err(TransportError::Timeout(timeout)),
        Err(TransportError::Timeout(timeout)),
        Err(TransportError::Timeout(timeout)),
    ]));

    let err = client(&transport)
        .try_send(DeckKind::Detailed, &dog_walking())
        .await
        .expect_err("timeouts must fail");

    assert_eq!(transport.post_count(), 3);
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(err.to_string().contains("after 120s"));
    assert!(
        transport
            .calls()
            .iter()
            .all(|(url, _, _)| url.path() == "/api/generate-detailed")
    );
}

#[tokio::test(start_paused = true)]
async fn rejected_and_empty_payloads_are_fatal() {
    let transport = Arc::new(ScriptedTransport::new([common::ok_json(
        r#"{"success":false,"deck":"","message":"quota exceeded"}"#,
    )]));
    let text = client(&transport).send(&dog_walking()).await;
    assert_eq!(text, "❌ Generation failed: quota exceeded");
    assert_eq!(transport.post_count(), 1);

    let transport = Arc::new(ScriptedTransport::new([common::ok_json(
        r#"{"success":true,"deck":"   "}"#,
    )]));
    let err = client(&transport)
        .try_send(DeckKind::Standard, &dog_walking())
        .await
        .expect_err("blank deck must fail");
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(transport.post_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn custom_policy_limits_attempts() {
    let transport = Arc::new(ScriptedTransport::new([status(503, ""), status(503, "")]));
    let client = client(&transport)
        .with_retry_policy(RetryPolicy::new(1, Duration::from_millis(10)));

    let text = client.send(&dog_walking()).await;

    assert!(is_failure(&text));
    assert_eq!(transport.post_count(), 1);
}
