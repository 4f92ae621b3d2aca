//! Axum router. Maps all URL paths to handlers.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{
    discover::{discover, discovery_results, discovery_status},
    page::{search_page, search_page_submit},
    search::api_search,
    system::{agents_info, health, service_info},
};
use crate::sse::sse_handler;
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",       get(search_page))
        .route("/search", post(search_page_submit))

        // Service
        .route("/api",    get(service_info))
        .route("/health", get(health))

        // SSE streaming
        .route("/api/events", get(sse_handler))

        // Search form endpoint
        .route("/api/search", post(api_search))

        // Discovery API
        .route("/api/v1/discover",             post(discover))
        .route("/api/v1/results/{request_id}", get(discovery_results))
        .route("/api/v1/status/{request_id}",  get(discovery_status))
        .route("/api/v1/agents",               get(agents_info))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
