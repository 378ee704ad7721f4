use std::sync::Arc;

use chatstream_core::{Config, SanitizedConfig, SessionOrchestrator, StreamConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    orchestrator: Arc<SessionOrchestrator>,
}

impl AppState {
    pub fn new(config: Config, orchestrator: Arc<SessionOrchestrator>) -> Self {
        Self {
            config,
            orchestrator,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn orchestrator(&self) -> Arc<SessionOrchestrator> {
        Arc::clone(&self.orchestrator)
    }

    pub fn stream_config(&self) -> &StreamConfig {
        &self.config.stream
    }
}
