use thiserror::Error;

/// Why a search submission produced no result list.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error! status: {}", .0.as_u16())]
    Status(reqwest::StatusCode),

    #[error("{0}")]
    Network(#[source] reqwest::Error),

    #[error("invalid JSON in response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("could not format result for display: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("expected a JSON array of results, got {0}")]
    UnexpectedShape(&'static str),

    #[error("invalid search endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = SearchError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "HTTP error! status: 503");
    }

    #[test]
    fn test_encode_is_not_reported_as_bad_response() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SearchError::Encode(cause);
        assert!(err.to_string().starts_with("could not format result for display"));
        assert!(!err.to_string().contains("invalid JSON in response"));
    }

    #[test]
    fn test_shape_message() {
        assert_eq!(
            SearchError::UnexpectedShape("object").to_string(),
            "expected a JSON array of results, got object"
        );
    }
}
