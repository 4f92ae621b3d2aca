use std::time::Duration;
use thiserror::Error;

use pharmagent_common::PharmaError;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{agent} failed: {message}")]
    Failed { agent: &'static str, message: String },

    #[error("discovery timed out after {0:?}")]
    Timeout(Duration),

    #[error("no {0} findings were produced")]
    MissingFindings(&'static str),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<AgentError> for PharmaError {
    fn from(err: AgentError) -> Self {
        PharmaError::Agent(err.to_string())
    }
}
