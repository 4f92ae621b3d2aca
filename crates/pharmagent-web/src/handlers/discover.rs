//! Discovery API: start a multi-agent run, then poll its status and results.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use tracing::{error, info, warn};

use pharmagent_agents::AgentTask;
use pharmagent_common::error::ApiError;
use pharmagent_common::models::{
    new_request_id, DiscoverRequest, DiscoverResponse, DiscoveryRecord, DiscoveryStatus,
    ResultsView, StatusView,
};
use pharmagent_common::validation::validate_molecule_name;

use crate::state::{AppEvent, SharedState};

const ESTIMATED_TIME: &str = "2-5 minutes";

/// POST /api/v1/discover
pub async fn discover(
    State(state): State<SharedState>,
    Json(req): Json<DiscoverRequest>,
) -> Result<Json<DiscoverResponse>, ApiError> {
    let molecule = validate_molecule_name(&req.molecule_name)?;
    if let Some(filters) = &req.filters {
        info!(n = filters.len(), "discovery filters supplied but not applied");
    }

    let request_id = new_request_id();
    state
        .results
        .write()
        .await
        .insert(request_id.clone(), DiscoveryRecord::processing(&request_id, &molecule));

    state.publish(AppEvent::DiscoveryStarted {
        request_id: request_id.clone(),
        molecule: molecule.clone(),
    });

    let task = AgentTask::new(molecule, req.indication);
    tokio::spawn(run_discovery(state.clone(), request_id.clone(), task));

    Ok(Json(DiscoverResponse {
        request_id,
        status: DiscoveryStatus::Processing,
        agents_active: state.master.agents_active(),
        estimated_time: ESTIMATED_TIME.to_string(),
        timestamp: Utc::now(),
    }))
}

/// Background half of a discovery request. Writes the outcome into the result store.
async fn run_discovery(state: SharedState, request_id: String, task: AgentTask) {
    let started = Instant::now();
    let outcome = state.master.run(&request_id, &task).await;

    let mut store = state.results.write().await;
    let Some(record) = store.get_mut(&request_id) else {
        warn!(request_id = %request_id, "discovery record vanished before completion");
        return;
    };

    match outcome {
        Ok(discovery) => {
            let pdf_url = discovery.pdf_url.clone();
            record.complete(discovery.findings, discovery.pdf_url, started.elapsed().as_secs_f64());
            info!(request_id = %request_id, "discovery completed");
            state.publish(AppEvent::DiscoveryCompleted { request_id, pdf_url });
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "discovery failed");
            record.fail(e.to_string());
            state.publish(AppEvent::DiscoveryFailed { request_id, error: e.to_string() });
        }
    }
}

fn not_found() -> ApiError {
    ApiError::not_found("Request not found")
}

/// GET /api/v1/results/{request_id}
pub async fn discovery_results(
    State(state): State<SharedState>,
    Path(request_id): Path<String>,
) -> Result<Json<ResultsView>, ApiError> {
    let store = state.results.read().await;
    let record = store.get(&request_id).ok_or_else(not_found)?;
    Ok(Json(ResultsView::from(record)))
}

/// GET /api/v1/status/{request_id}
pub async fn discovery_status(
    State(state): State<SharedState>,
    Path(request_id): Path<String>,
) -> Result<Json<StatusView>, ApiError> {
    let store = state.results.read().await;
    let record = store.get(&request_id).ok_or_else(not_found)?;
    Ok(Json(StatusView::from(record)))
}
