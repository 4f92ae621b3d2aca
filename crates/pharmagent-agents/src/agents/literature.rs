//! PubMed literature mining agent.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use pharmagent_common::models::LiteratureEvidence;

use super::{scaled_latency, simulate, AgentPayload, AgentTask, WorkerAgent};
use crate::Result;

const BASE_LATENCY_MS: u64 = 700;

pub struct PubMedAgent {
    latency: Duration,
}

impl PubMedAgent {
    pub fn new(latency_scale: f64) -> Self {
        Self { latency: scaled_latency(BASE_LATENCY_MS, latency_scale) }
    }
}

impl Default for PubMedAgent {
    fn default() -> Self { Self::new(1.0) }
}

#[async_trait]
impl WorkerAgent for PubMedAgent {
    fn key(&self) -> &'static str { "pubmed" }

    fn name(&self) -> &'static str { "PubMed Agent" }

    fn description(&self) -> &'static str { "Mines and synthesizes pharmaceutical literature" }

    #[instrument(skip(self), fields(molecule = %task.molecule))]
    async fn fetch(&self, task: &AgentTask) -> Result<AgentPayload> {
        simulate(self.latency).await;
        let evidence = LiteratureEvidence {
            papers_found: 5432,
            recent_papers: 145,
            key_findings: vec![
                "Efficacy in cardiovascular disease".to_string(),
                "Safety profile excellent".to_string(),
                "Potential for combination therapy".to_string(),
            ],
        };
        debug!(papers = evidence.papers_found, "literature evidence ready");
        Ok(AgentPayload::Literature(evidence))
    }
}
