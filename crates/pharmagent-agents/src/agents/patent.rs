//! Patent landscape agent.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, instrument};

use pharmagent_common::models::PatentLandscape;

use super::{scaled_latency, simulate, AgentPayload, AgentTask, WorkerAgent};
use crate::{AgentError, Result};

const BASE_LATENCY_MS: u64 = 400;

pub struct PatentAgent {
    latency: Duration,
}

impl PatentAgent {
    pub fn new(latency_scale: f64) -> Self {
        Self { latency: scaled_latency(BASE_LATENCY_MS, latency_scale) }
    }
}

impl Default for PatentAgent {
    fn default() -> Self { Self::new(1.0) }
}

#[async_trait]
impl WorkerAgent for PatentAgent {
    fn key(&self) -> &'static str { "patents" }

    fn name(&self) -> &'static str { "Patent Agent" }

    fn description(&self) -> &'static str { "Analyzes patent landscape and competitive data" }

    #[instrument(skip(self), fields(molecule = %task.molecule))]
    async fn fetch(&self, task: &AgentTask) -> Result<AgentPayload> {
        simulate(self.latency).await;
        let expiry_date = NaiveDate::from_ymd_opt(2028, 6, 15).ok_or(AgentError::Failed {
            agent: self.name(),
            message: "invalid expiry date".to_string(),
        })?;
        let landscape = PatentLandscape {
            total_patents: 23,
            competitors: 5,
            expiry_date,
            strength: "strong".to_string(),
        };
        debug!(total = landscape.total_patents, "patent landscape ready");
        Ok(AgentPayload::Patents(landscape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_expiry_date() {
        let agent = PatentAgent::new(0.0);
        let AgentPayload::Patents(p) = agent.fetch(&AgentTask::new("Imatinib", None)).await.unwrap() else {
            panic!("expected patent payload");
        };
        assert_eq!(p.expiry_date.to_string(), "2028-06-15");
    }
}
