//! IQVIA market data agent.
//!
//! Reports market size, sales trend and competitive share for a molecule.
//! Values are fixed reference figures; no IQVIA account is contacted.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use pharmagent_common::models::MarketData;

use super::{scaled_latency, simulate, AgentPayload, AgentTask, WorkerAgent};
use crate::Result;

const BASE_LATENCY_MS: u64 = 500;

pub struct IqviaAgent {
    latency: Duration,
}

impl IqviaAgent {
    pub fn new(latency_scale: f64) -> Self {
        Self { latency: scaled_latency(BASE_LATENCY_MS, latency_scale) }
    }

    fn market_data(&self) -> MarketData {
        MarketData {
            market_size: "$2.5B".to_string(),
            sales_trend: "growing".to_string(),
            competitors: 3,
            market_share: "45%".to_string(),
        }
    }
}

impl Default for IqviaAgent {
    fn default() -> Self { Self::new(1.0) }
}

#[async_trait]
impl WorkerAgent for IqviaAgent {
    fn key(&self) -> &'static str { "iqvia" }

    fn name(&self) -> &'static str { "IQVIA Agent" }

    fn description(&self) -> &'static str { "Fetches market data and sales information" }

    #[instrument(skip(self), fields(molecule = %task.molecule))]
    async fn fetch(&self, task: &AgentTask) -> Result<AgentPayload> {
        simulate(self.latency).await;
        let data = self.market_data();
        debug!(market_size = %data.market_size, "market data ready");
        Ok(AgentPayload::Market(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_returns_market_payload() {
        let agent = IqviaAgent::new(0.0);
        let payload = agent.fetch(&AgentTask::new("Metformin", None)).await.unwrap();
        match payload {
            AgentPayload::Market(m) => {
                assert_eq!(m.market_size, "$2.5B");
                assert_eq!(m.competitors, 3);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }
}
