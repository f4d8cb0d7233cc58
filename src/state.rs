// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::config::ServerConfig;
use crate::services::responder::{EchoResponder, Responder, UpstreamResponder};
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub sessions: SessionManager,
    pub responder: Arc<dyn Responder>,
}

impl AppState {
    pub fn new(session_ttl: Duration, max_history: usize, responder: Arc<dyn Responder>) -> Self {
        Self {
            sessions: SessionManager::new(session_ttl, max_history),
            responder,
        }
    }

    /// Offline state with the echo responder.
    pub fn echo(session_ttl: Duration, max_history: usize) -> Self {
        Self::new(session_ttl, max_history, Arc::new(EchoResponder))
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let responder: Arc<dyn Responder> = match &config.model {
            Some(model) => Arc::new(UpstreamResponder::new(model.clone())),
            None => Arc::new(EchoResponder),
        };
        Self::new(config.session_ttl, config.max_history, responder)
    }
}
