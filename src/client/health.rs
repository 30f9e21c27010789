use chrono::{DateTime, Utc};
use cofoundr_schema::HealthPayload;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use url::Url;

use super::resilient::endpoint;
use super::transport::Transport;
use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::utils::logging::preview;

pub const HEALTH_PATH: &str = "api/health";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// No probe has completed yet.
    Checking,
    Online,
    /// Connection refused.
    Offline,
    /// No answer within the probe timeout.
    Timeout,
    /// Answered, but not with a healthy payload.
    Unhealthy,
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HealthState::Checking => "checking",
            HealthState::Online => "online",
            HealthState::Offline => "offline",
            HealthState::Timeout => "timeout",
            HealthState::Unhealthy => "unhealthy",
        })
    }
}

/// Result of the latest probe. The newest probe always replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub state: HealthState,
    pub message: Option<String>,
    pub checked_at: Option<DateTime<Utc>>,
}

impl HealthStatus {
    pub fn checking() -> Self {
        Self {
            state: HealthState::Checking,
            message: None,
            checked_at: None,
        }
    }

    fn probed(state: HealthState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: Some(message.into()),
            checked_at: Some(Utc::now()),
        }
    }

    pub fn is_online(&self) -> bool {
        self.state == HealthState::Online
    }
}

/// One-shot liveness check against `GET /api/health`.
pub struct HealthProber {
    transport: Arc<dyn Transport>,
    url: Url,
    timeout: Duration,
}

impl HealthProber {
    pub fn new(transport: Arc<dyn Transport>, cfg: &ClientConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            transport,
            url: endpoint(&cfg.base_url, HEALTH_PATH)?,
            timeout: cfg.health_timeout(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn check_health(&self) -> HealthStatus {
        match self.transport.get(&self.url, self.timeout).await {
            Ok(resp) if resp.status.is_success() => {
                match serde_json::from_str::<HealthPayload>(&resp.body) {
                    Ok(payload) if payload.is_healthy() => HealthStatus::probed(
                        HealthState::Online,
                        format!(
                            "{} is healthy",
                            payload.service.as_deref().unwrap_or("server")
                        ),
                    ),
                    Ok(payload) => HealthStatus::probed(
                        HealthState::Unhealthy,
                        format!("server reported status '{}'", payload.status),
                    ),
                    Err(e) => {
                        debug!(
                            url = %self.url,
                            body = %preview(&resp.body),
                            "[Health] Undecodable payload"
                        );
                        HealthStatus::probed(
                            HealthState::Unhealthy,
                            format!("malformed health payload: {e}"),
                        )
                    }
                }
            }
            Ok(resp) => HealthStatus::probed(
                HealthState::Unhealthy,
                format!("health endpoint answered {}", resp.status),
            ),
            Err(TransportError::Connect(_)) => HealthStatus::probed(
                HealthState::Offline,
                format!("cannot connect to {}", self.url.origin().ascii_serialization()),
            ),
            Err(TransportError::Timeout(after)) => HealthStatus::probed(
                HealthState::Timeout,
                format!("no answer within {}s", after.as_secs()),
            ),
            Err(TransportError::Other(detail)) => {
                HealthStatus::probed(HealthState::Unhealthy, detail)
            }
        }
    }
}

/// Process-wide health state, written only by the polling task it owns.
///
/// Probes once immediately, then every `interval`. Dropping the monitor stops the polling.
pub struct HealthMonitor {
    status: watch::Receiver<HealthStatus>,
    task: JoinHandle<()>,
}

impl HealthMonitor {
    pub fn spawn(prober: HealthProber, interval: Duration) -> Self {
        let (tx, status) = watch::channel(HealthStatus::checking());
        let interval = interval.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut previous = HealthState::Checking;

            loop {
                ticker.tick().await;
                let probe = prober.check_health().await;

                if probe.state == previous {
                    debug!(url = %prober.url(), state = %probe.state, "[Health] Probe unchanged");
                } else if probe.is_online() {
                    info!(url = %prober.url(), from = %previous, "[Health] Server online");
                } else {
                    warn!(
                        url = %prober.url(),
                        from = %previous,
                        to = %probe.state,
                        message = probe.message.as_deref().unwrap_or("-"),
                        "[Health] Server not available"
                    );
                }
                previous = probe.state;

                if tx.send(probe).is_err() {
                    break;
                }
            }
        });

        Self { status, task }
    }

    pub fn current(&self) -> HealthStatus {
        self.status.borrow().clone()
    }

    pub fn is_online(&self) -> bool {
        self.status.borrow().is_online()
    }

    pub fn subscribe(&self) -> watch::Receiver<HealthStatus> {
        self.status.clone()
    }

    /// Waits until the first probe has landed and returns its result.
    pub async fn first_probe(&self) -> HealthStatus {
        let mut rx = self.status.clone();
        match rx.wait_for(|s| s.state != HealthState::Checking).await {
            Ok(status) => status.clone(),
            Err(_) => self.current(),
        }
    }

    /// Stops polling. Equivalent to dropping the monitor.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}
