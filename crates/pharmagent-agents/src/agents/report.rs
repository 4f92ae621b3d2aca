//! Report generation agent. Produces the link under which a run's PDF report is published.

use std::time::Duration;

use tracing::{info, instrument};

use pharmagent_common::models::{AgentKind, Findings};

use super::{scaled_latency, simulate};
use crate::Result;

const BASE_LATENCY_MS: u64 = 300;

pub struct ReportAgent {
    base_url: String,
    latency: Duration,
}

impl ReportAgent {
    pub fn new(base_url: impl Into<String>, latency_scale: f64) -> Self {
        Self {
            base_url: base_url.into(),
            latency: scaled_latency(BASE_LATENCY_MS, latency_scale),
        }
    }

    pub fn name(&self) -> &'static str { "Report Agent" }

    pub fn description(&self) -> &'static str { "Generates comprehensive PDF reports" }

    pub fn kind(&self) -> AgentKind { AgentKind::OutputAgent }

    #[instrument(skip(self, findings))]
    pub async fn generate(&self, request_id: &str, findings: &Findings) -> Result<String> {
        simulate(self.latency).await;
        let url = format!(
            "{}/reports/{}_report.pdf",
            self.base_url.trim_end_matches('/'),
            request_id
        );
        info!(summary = %findings.summary, url = %url, "report generated");
        Ok(url)
    }
}
