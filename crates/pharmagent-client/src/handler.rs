//! Submit handler: one POST to the search endpoint per form submission.
//!
//! There are no retries, no timeout and no cancellation. Every failure ends
//! the submission with an `Error: ...` line in the results area.

use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};
use url::Url;

use pharmagent_common::SearchQuery;

use crate::dom::{SearchForm, SubmitEvent};
use crate::error::SearchError;
use crate::results::ResultsArea;

pub const SEARCH_PATH: &str = "/api/search";

pub struct SubmitHandler {
    client: Client,
    endpoint: Url,
}

impl SubmitHandler {
    /// `base_url` is the page origin, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: &str) -> Result<Self, SearchError> {
        let client = Client::builder().build().map_err(SearchError::Client)?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, SearchError> {
        let endpoint = Url::parse(base_url)?.join(SEARCH_PATH)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST the query and decode the JSON body. Non-2xx statuses are errors.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn search(&self, query: &SearchQuery) -> Result<Value, SearchError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(query)
            .send()
            .await
            .map_err(SearchError::Network)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = resp.bytes().await.map_err(SearchError::Network)?;
        let data = serde_json::from_slice(&body).map_err(SearchError::Decode)?;
        debug!(bytes = body.len(), "search response decoded");
        Ok(data)
    }

    /// Handle one submission, writing into an area owned by the caller.
    pub async fn handle(
        &self,
        event: &mut SubmitEvent,
        form: &SearchForm,
        area: &mut ResultsArea,
    ) -> Result<(), SearchError> {
        let response = self.submit(event, form).await;
        write_outcome(area, response)
    }

    /// Handle one submission against an area shared between submissions.
    ///
    /// The lock is only taken once the response is in, so overlapping
    /// submissions write in completion order and the last to resolve wins.
    pub async fn handle_shared(
        &self,
        event: &mut SubmitEvent,
        form: &SearchForm,
        area: &Mutex<ResultsArea>,
    ) -> Result<(), SearchError> {
        let response = self.submit(event, form).await;
        let mut area = area.lock().await;
        write_outcome(&mut area, response)
    }

    async fn submit(&self, event: &mut SubmitEvent, form: &SearchForm) -> Result<Value, SearchError> {
        event.prevent_default();
        let query = form.query();
        info!(
            molecule_name = %query.molecule_name,
            disease_area = %query.disease_area,
            "Searching for"
        );
        self.search(&query).await
    }
}

fn write_outcome(
    area: &mut ResultsArea,
    response: Result<Value, SearchError>,
) -> Result<(), SearchError> {
    let outcome = response.and_then(|data| area.render(Some(&data)));
    if let Err(err) = &outcome {
        error!(error = %err, "search failed");
        area.show_error(err);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_is_origin_relative() {
        let handler = SubmitHandler::new("http://localhost:8000/app/").unwrap();
        assert_eq!(handler.endpoint().as_str(), "http://localhost:8000/api/search");
    }

    #[test]
    fn test_bad_base_url() {
        let err = SubmitHandler::new("not a url").err().unwrap();
        assert!(matches!(err, SearchError::Endpoint(_)));
    }

    #[test]
    fn test_write_outcome_renders_error_line() {
        let mut area = ResultsArea::new();
        let res = write_outcome(&mut area, Err(SearchError::Status(reqwest::StatusCode::BAD_GATEWAY)));
        assert!(res.is_err());
        assert_eq!(area.text(), "Error: HTTP error! status: 502");
    }

    #[test]
    fn test_write_outcome_shape_error() {
        let mut area = ResultsArea::new();
        let res = write_outcome(&mut area, Ok(serde_json::json!(42)));
        assert!(matches!(res, Err(SearchError::UnexpectedShape("number"))));
        assert_eq!(area.text(), "Error: expected a JSON array of results, got number");
    }
}
