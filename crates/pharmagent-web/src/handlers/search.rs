//! Search form endpoint: molecule + disease area in, one JSON result per data agent out.

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::instrument;

use pharmagent_common::error::ApiError;
use pharmagent_common::validation::validate_molecule_name;
use pharmagent_common::{PharmaError, SearchQuery};

use crate::state::{AppEvent, SharedState};

/// Validate and run a search. Shared by the JSON endpoint and the page fallback.
pub async fn run_search(state: &SharedState, query: SearchQuery) -> Result<Vec<Value>, PharmaError> {
    let molecule_name = validate_molecule_name(&query.molecule_name)?;
    let query = SearchQuery::new(molecule_name, query.disease_area);

    let results = state.master.search(&query).await?;
    state.publish(AppEvent::SearchServed {
        molecule: query.molecule_name,
        results: results.len(),
    });
    Ok(results)
}

/// POST /api/search
#[instrument(skip(state))]
pub async fn api_search(
    State(state): State<SharedState>,
    Json(query): Json<SearchQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let results = run_search(&state, query).await?;
    Ok(Json(results))
}
