//! Shared application state for the web server.

use std::collections::HashMap;
use std::sync::Arc;

use minijinja::Environment;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};

use pharmagent_agents::MasterAgent;
use pharmagent_common::models::DiscoveryRecord;
use pharmagent_common::{Config, PharmaError};

/// Events pushed to connected clients via SSE.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// A search request was answered
    SearchServed { molecule: String, results: usize },
    /// A discovery run was accepted
    DiscoveryStarted { request_id: String, molecule: String },
    /// A discovery run finished and its report is available
    DiscoveryCompleted { request_id: String, pdf_url: String },
    /// A discovery run failed
    DiscoveryFailed { request_id: String, error: String },
}

impl AppEvent {
    /// SSE event name; matches the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::SearchServed { .. } => "search_served",
            AppEvent::DiscoveryStarted { .. } => "discovery_started",
            AppEvent::DiscoveryCompleted { .. } => "discovery_completed",
            AppEvent::DiscoveryFailed { .. } => "discovery_failed",
        }
    }
}

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub config: Config,
    pub master: MasterAgent,
    /// Discovery runs by request id. Lives as long as the process.
    pub results: RwLock<HashMap<String, DiscoveryRecord>>,
    /// Broadcast channel for SSE push events
    pub event_tx: broadcast::Sender<AppEvent>,
    templates: Environment<'static>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, PharmaError> {
        let master = MasterAgent::new(&config);
        Self::with_master(config, master)
    }

    /// State around a caller-built orchestrator, e.g. one with a custom agent set.
    pub fn with_master(config: Config, master: MasterAgent) -> Result<Self, PharmaError> {
        let mut templates = Environment::new();
        templates
            .add_template("index.html", include_str!("../templates/index.html"))
            .map_err(anyhow::Error::from)?;

        let (event_tx, _) = broadcast::channel(256);
        Ok(Self {
            config,
            master,
            results: RwLock::new(HashMap::new()),
            event_tx,
            templates,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.event_tx.subscribe()
    }

    /// Send to current subscribers. Having none is fine.
    pub fn publish(&self, event: AppEvent) {
        let _ = self.event_tx.send(event);
    }

    pub fn templates(&self) -> &Environment<'static> {
        &self.templates
    }
}

pub type SharedState = Arc<AppState>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name_matches_type_tag() {
        let events = [
            AppEvent::SearchServed { molecule: "Metformin".into(), results: 4 },
            AppEvent::DiscoveryStarted { request_id: "req_1".into(), molecule: "Metformin".into() },
            AppEvent::DiscoveryCompleted { request_id: "req_1".into(), pdf_url: "u".into() },
            AppEvent::DiscoveryFailed { request_id: "req_1".into(), error: "boom".into() },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["type"], event.name());
        }
    }

    #[test]
    fn test_publish_without_subscribers_is_fine() {
        let state = AppState::new(Config::default()).unwrap();
        state.publish(AppEvent::SearchServed { molecule: "X".into(), results: 0 });

        let mut rx = state.subscribe();
        state.publish(AppEvent::SearchServed { molecule: "Y".into(), results: 4 });
        assert_eq!(rx.try_recv().unwrap().name(), "search_served");
    }
}
