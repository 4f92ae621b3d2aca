//! Service info, health check and the agent catalog.

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use pharmagent_common::models::AgentCatalog;

use crate::state::SharedState;

const SERVICE_NAME: &str = "Pharmagent";

/// GET /api
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "message": "Pharmagent - Multi-Agent Drug Discovery System",
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/api/v1/agents",
    }))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "service": SERVICE_NAME,
    }))
}

/// GET /api/v1/agents
pub async fn agents_info(State(state): State<SharedState>) -> Json<AgentCatalog> {
    Json(state.master.catalog())
}
