//! Worker agents. Each one answers for a single data domain.

pub mod literature;
pub mod market;
pub mod patent;
pub mod report;
pub mod trials;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use pharmagent_common::models::{
    AgentKind, LiteratureEvidence, MarketData, PatentLandscape, TrialSummary,
};

use crate::Result;

pub use literature::PubMedAgent;
pub use market::IqviaAgent;
pub use patent::PatentAgent;
pub use report::ReportAgent;
pub use trials::ClinicalTrialsAgent;

/// What a worker agent is asked to look at.
#[derive(Debug, Clone)]
pub struct AgentTask {
    pub molecule: String,
    pub indication: Option<String>,
}

impl AgentTask {
    pub fn new(molecule: impl Into<String>, indication: Option<String>) -> Self {
        Self { molecule: molecule.into(), indication }
    }
}

/// Output of one data agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AgentPayload {
    Market(MarketData),
    Trials(TrialSummary),
    Patents(PatentLandscape),
    Literature(LiteratureEvidence),
}

/// Common interface for all data agents.
#[async_trait]
pub trait WorkerAgent: Send + Sync {
    /// Short machine key, e.g. `iqvia`.
    fn key(&self) -> &'static str;

    /// Display name, e.g. `IQVIA Agent`.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn kind(&self) -> AgentKind {
        AgentKind::DataAgent
    }

    async fn fetch(&self, task: &AgentTask) -> Result<AgentPayload>;
}

/// Scale a base latency in milliseconds. Non-finite or negative scales count as
/// zero; a product too large for a `Duration` saturates.
pub(crate) fn scaled_latency(base_ms: u64, scale: f64) -> Duration {
    if !scale.is_finite() || scale <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(base_ms as f64 * scale / 1000.0).unwrap_or(Duration::MAX)
}

pub(crate) async fn simulate(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_latency() {
        assert_eq!(scaled_latency(500, 1.0), Duration::from_millis(500));
        assert_eq!(scaled_latency(700, 0.5), Duration::from_millis(350));
        assert_eq!(scaled_latency(700, 0.0), Duration::ZERO);
        assert_eq!(scaled_latency(700, -2.0), Duration::ZERO);
        assert_eq!(scaled_latency(700, f64::NAN), Duration::ZERO);
    }

    #[test]
    fn test_scaled_latency_saturates_instead_of_panicking() {
        assert_eq!(scaled_latency(500, 1e300), Duration::MAX);
        assert_eq!(scaled_latency(u64::MAX, f64::MAX), Duration::MAX);
    }

    #[test]
    fn test_payload_serializes_without_tag() {
        let payload = AgentPayload::Trials(TrialSummary {
            active_trials: 1,
            recruiting: 0,
            phases: vec!["Phase 1".into()],
            enrollment_total: 30,
        });
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["active_trials"], 1);
        assert!(v.get("Trials").is_none());
    }
}
