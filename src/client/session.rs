use std::sync::Arc;
use tracing::debug;

use super::builder::{GenerationOptions, build};
use super::health::{HealthMonitor, HealthProber, HealthState};
use super::progress::LoadingSequence;
use super::resilient::{DeckKind, ResilientClient, render_failure};
use super::transport::{ReqwestTransport, Transport};
use super::validator::check_idea;
use crate::config::ClientConfig;
use crate::error::PitchError;

/// What a front-end holds for its lifetime: the generation client plus the health monitor
/// that gates it.
///
/// A generation runs validate, health gate, build, send. Overlapping calls are not
/// serialized; each carries its own request.
pub struct PitchSession {
    client: ResilientClient,
    health: HealthMonitor,
    loading: LoadingSequence,
}

impl PitchSession {
    pub fn connect(cfg: &ClientConfig) -> Result<Self, PitchError> {
        let transport =
            ReqwestTransport::from_config(cfg).map_err(|e| PitchError::Network(e.to_string()))?;
        Self::with_transport(Arc::new(transport), cfg)
    }

    pub fn with_transport(
        transport: Arc<dyn Transport>,
        cfg: &ClientConfig,
    ) -> Result<Self, PitchError> {
        let prober = HealthProber::new(transport.clone(), cfg)?;
        Ok(Self {
            client: ResilientClient::new(transport, cfg),
            health: HealthMonitor::spawn(prober, cfg.health_interval()),
            loading: LoadingSequence::default(),
        })
    }

    pub fn with_loading_sequence(mut self, loading: LoadingSequence) -> Self {
        self.loading = loading;
        self
    }

    pub fn health(&self) -> &HealthMonitor {
        &self.health
    }

    pub fn client(&self) -> &ResilientClient {
        &self.client
    }

    /// Deck text, or a failure string starting with the failure glyph.
    pub async fn generate(
        &self,
        idea: &str,
        options: &GenerationOptions,
        kind: DeckKind,
    ) -> String {
        self.generate_with_progress(idea, options, kind, |message| {
            debug!("[Session] {message}");
        })
        .await
    }

    pub async fn generate_with_progress<M>(
        &self,
        idea: &str,
        options: &GenerationOptions,
        kind: DeckKind,
        on_message: M,
    ) -> String
    where
        M: FnMut(&str),
    {
        match self.try_generate(idea, options, kind, on_message).await {
            Ok(deck) => deck,
            Err(err) => render_failure(&err),
        }
    }

    pub async fn try_generate<M>(
        &self,
        idea: &str,
        options: &GenerationOptions,
        kind: DeckKind,
        on_message: M,
    ) -> Result<String, PitchError>
    where
        M: FnMut(&str),
    {
        check_idea(idea)?;

        let status = self.health.current();
        match status.state {
            HealthState::Online => {}
            HealthState::Checking => return Err(PitchError::HealthPending),
            state => return Err(PitchError::Unavailable(state.to_string())),
        }

        let request = build(idea, options);
        self.loading
            .clone()
            .track(self.client.try_send(kind, &request), on_message)
            .await
    }
}
