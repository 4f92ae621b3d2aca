//! Clinical trials agent.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use pharmagent_common::models::TrialSummary;

use super::{scaled_latency, simulate, AgentPayload, AgentTask, WorkerAgent};
use crate::Result;

const BASE_LATENCY_MS: u64 = 600;

pub struct ClinicalTrialsAgent {
    latency: Duration,
}

impl ClinicalTrialsAgent {
    pub fn new(latency_scale: f64) -> Self {
        Self { latency: scaled_latency(BASE_LATENCY_MS, latency_scale) }
    }
}

impl Default for ClinicalTrialsAgent {
    fn default() -> Self { Self::new(1.0) }
}

#[async_trait]
impl WorkerAgent for ClinicalTrialsAgent {
    fn key(&self) -> &'static str { "clinical_trials" }

    fn name(&self) -> &'static str { "Clinical Trials Agent" }

    fn description(&self) -> &'static str { "Queries and analyzes clinical trial data" }

    #[instrument(skip(self), fields(molecule = %task.molecule, indication = ?task.indication))]
    async fn fetch(&self, task: &AgentTask) -> Result<AgentPayload> {
        simulate(self.latency).await;
        let summary = TrialSummary {
            active_trials: 12,
            recruiting: 5,
            phases: vec!["Phase 2".to_string(), "Phase 3".to_string()],
            enrollment_total: 450,
        };
        debug!(active = summary.active_trials, "trial summary ready");
        Ok(AgentPayload::Trials(summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recruiting_never_exceeds_active() {
        let agent = ClinicalTrialsAgent::new(0.0);
        let AgentPayload::Trials(t) = agent.fetch(&AgentTask::new("Aspirin", Some("cardiovascular".into()))).await.unwrap() else {
            panic!("expected trial payload");
        };
        assert!(t.recruiting <= t.active_trials);
        assert_eq!(t.phases, vec!["Phase 2", "Phase 3"]);
    }
}
