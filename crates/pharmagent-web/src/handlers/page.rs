//! Search page. `POST /search` is the no-script fallback: the server runs the
//! search itself and renders the results area into the page.

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Form,
};
use minijinja::context;
use serde_json::Value;
use tracing::error;

use pharmagent_client::dom::{DISEASE_AREA_ID, MOLECULE_NAME_ID, RESULTS_ID, SEARCH_FORM_ID};
use pharmagent_client::ResultsArea;
use pharmagent_common::SearchQuery;

use crate::handlers::search::run_search;
use crate::state::SharedState;

type PageResult = Result<Html<String>, (StatusCode, String)>;

/// GET /
pub async fn search_page(State(state): State<SharedState>) -> PageResult {
    render_page(&state, &SearchQuery::default(), &ResultsArea::new())
}

/// POST /search
pub async fn search_page_submit(
    State(state): State<SharedState>,
    Form(query): Form<SearchQuery>,
) -> PageResult {
    let mut area = ResultsArea::new();
    match run_search(&state, query.clone()).await {
        Ok(results) => {
            if let Err(e) = area.render(Some(&Value::Array(results))) {
                area.show_error(e);
            }
        }
        Err(e) => area.show_error(e),
    }
    render_page(&state, &query, &area)
}

fn render_page(state: &SharedState, query: &SearchQuery, area: &ResultsArea) -> PageResult {
    let results_html = area.to_html().map_err(internal)?;
    let tmpl = state.templates().get_template("index.html").map_err(internal)?;
    let html = tmpl
        .render(context! {
            form_id => SEARCH_FORM_ID,
            molecule_id => MOLECULE_NAME_ID,
            disease_id => DISEASE_AREA_ID,
            results_id => RESULTS_ID,
            molecule_name => query.molecule_name,
            disease_area => query.disease_area,
            results_html => results_html,
        })
        .map_err(internal)?;
    Ok(Html(html))
}

fn internal(err: minijinja::Error) -> (StatusCode, String) {
    error!(error = %err, "template rendering failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "template rendering failed".to_string())
}
