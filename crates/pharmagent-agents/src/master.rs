//! Orchestrator for a discovery run.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::try_join_all;
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use pharmagent_common::models::{AgentCatalog, AgentInfo, AgentKind, Findings, SearchQuery};
use pharmagent_common::Config;

use crate::agents::{
    AgentPayload, AgentTask, ClinicalTrialsAgent, IqviaAgent, PatentAgent, PubMedAgent,
    ReportAgent, WorkerAgent,
};
use crate::{AgentError, Result};

/// Output of a completed discovery run.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub findings: Findings,
    pub pdf_url: String,
}

pub struct MasterAgent {
    workers: Vec<Arc<dyn WorkerAgent>>,
    report: ReportAgent,
    timeout: Duration,
}

impl MasterAgent {
    /// The standard agent set: IQVIA, clinical trials, patents, PubMed and the report agent.
    pub fn new(config: &Config) -> Self {
        let scale = config.agents.latency_scale;
        let workers: Vec<Arc<dyn WorkerAgent>> = vec![
            Arc::new(IqviaAgent::new(scale)),
            Arc::new(ClinicalTrialsAgent::new(scale)),
            Arc::new(PatentAgent::new(scale)),
            Arc::new(PubMedAgent::new(scale)),
        ];
        Self::with_workers(
            workers,
            ReportAgent::new(config.report.base_url.clone(), scale),
            Duration::from_secs(config.agents.timeout_secs),
        )
    }

    pub fn with_workers(
        workers: Vec<Arc<dyn WorkerAgent>>,
        report: ReportAgent,
        timeout: Duration,
    ) -> Self {
        Self { workers, report, timeout }
    }

    /// Describe the orchestrator and every agent it drives.
    pub fn catalog(&self) -> AgentCatalog {
        let mut agents = vec![AgentInfo {
            name: "Master Agent".to_string(),
            description: "Orchestrates all worker agents".to_string(),
            kind: AgentKind::Orchestrator,
        }];
        agents.extend(self.workers.iter().map(|w| AgentInfo {
            name: w.name().to_string(),
            description: w.description().to_string(),
            kind: w.kind(),
        }));
        agents.push(AgentInfo {
            name: self.report.name().to_string(),
            description: self.report.description().to_string(),
            kind: self.report.kind(),
        });
        let total_agents = agents.len();
        AgentCatalog { agents, total_agents }
    }

    /// Number of agents that take part in a run, the report agent included.
    pub fn agents_active(&self) -> u32 {
        self.workers.len() as u32 + 1
    }

    /// Run every worker concurrently. The first failure aborts the whole fan-out.
    async fn fan_out(&self, task: &AgentTask) -> Result<Vec<(&'static str, AgentPayload)>> {
        let fetches = self.workers.iter().map(|worker| async move {
            let payload = worker.fetch(task).await?;
            debug!(agent = worker.key(), "agent finished");
            Ok::<_, AgentError>((worker.key(), payload))
        });

        tokio::time::timeout(self.timeout, try_join_all(fetches))
            .await
            .map_err(|_| AgentError::Timeout(self.timeout))?
    }

    /// Full discovery run: data agents in parallel, then the report.
    #[instrument(skip(self), fields(molecule = %task.molecule))]
    pub async fn run(&self, request_id: &str, task: &AgentTask) -> Result<Discovery> {
        let outputs = self.fan_out(task).await?;
        let findings = assemble_findings(&task.molecule, outputs)?;
        let pdf_url = self.report.generate(request_id, &findings).await?;
        info!(request_id, "discovery run complete");
        Ok(Discovery { findings, pdf_url })
    }

    /// Flat result list for the search form: one JSON object per data agent.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Value>> {
        let indication = Some(query.disease_area.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let task = AgentTask::new(query.molecule_name.trim(), indication);

        let outputs = self.fan_out(&task).await?;
        let results = outputs
            .into_iter()
            .map(|(agent, payload)| -> Result<Value> {
                Ok(json!({
                    "agent": agent,
                    "molecule": task.molecule,
                    "disease_area": query.disease_area,
                    "data": serde_json::to_value(payload)?,
                }))
            })
            .collect::<Result<Vec<_>>>()?;

        info!(n = results.len(), "search results ready");
        Ok(results)
    }
}

fn assemble_findings(
    molecule: &str,
    outputs: Vec<(&'static str, AgentPayload)>,
) -> Result<Findings> {
    let mut market = None;
    let mut trials = None;
    let mut patents = None;
    let mut literature = None;

    for (_, payload) in outputs {
        match payload {
            AgentPayload::Market(m) => market = Some(m),
            AgentPayload::Trials(t) => trials = Some(t),
            AgentPayload::Patents(p) => patents = Some(p),
            AgentPayload::Literature(l) => literature = Some(l),
        }
    }

    Ok(Findings {
        iqvia_data: market.ok_or(AgentError::MissingFindings("market"))?,
        clinical_trials: trials.ok_or(AgentError::MissingFindings("clinical trial"))?,
        patent_landscape: patents.ok_or(AgentError::MissingFindings("patent"))?,
        literature_evidence: literature.ok_or(AgentError::MissingFindings("literature"))?,
        summary: format!("Analysis complete for {}", molecule),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio_test::{assert_err, assert_ok};

    fn instant_config() -> Config {
        let mut config = Config::default();
        config.agents.latency_scale = 0.0;
        config.report.base_url = "https://reports.test/".to_string();
        config
    }

    struct FailingAgent;

    #[async_trait]
    impl WorkerAgent for FailingAgent {
        fn key(&self) -> &'static str { "broken" }
        fn name(&self) -> &'static str { "Broken Agent" }
        fn description(&self) -> &'static str { "always fails" }
        async fn fetch(&self, _task: &AgentTask) -> Result<AgentPayload> {
            Err(AgentError::Failed { agent: self.name(), message: "upstream 503".to_string() })
        }
    }

    struct StalledAgent;

    #[async_trait]
    impl WorkerAgent for StalledAgent {
        fn key(&self) -> &'static str { "stalled" }
        fn name(&self) -> &'static str { "Stalled Agent" }
        fn description(&self) -> &'static str { "never answers in time" }
        async fn fetch(&self, _task: &AgentTask) -> Result<AgentPayload> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(AgentError::MissingFindings("stalled"))
        }
    }

    #[tokio::test]
    async fn test_run_assembles_findings_and_report() {
        let master = MasterAgent::new(&instant_config());
        let discovery = assert_ok!(master.run("req_abcdef12", &AgentTask::new("Metformin", None)).await);

        assert_eq!(discovery.findings.summary, "Analysis complete for Metformin");
        assert_eq!(discovery.findings.clinical_trials.active_trials, 12);
        assert_eq!(discovery.pdf_url, "https://reports.test/reports/req_abcdef12_report.pdf");
    }

    #[tokio::test]
    async fn test_search_returns_one_result_per_data_agent() {
        let master = MasterAgent::new(&instant_config());
        let results = master
            .search(&SearchQuery::new(" Metformin ", "oncology"))
            .await
            .unwrap();

        assert_eq!(results.len(), 4);
        let agents: Vec<&str> = results.iter().filter_map(|r| r["agent"].as_str()).collect();
        assert_eq!(agents, vec!["iqvia", "clinical_trials", "patents", "pubmed"]);
        assert!(results.iter().all(|r| r["molecule"] == "Metformin"));
        assert_eq!(results[0]["data"]["market_share"], "45%");
    }

    #[tokio::test]
    async fn test_agent_failure_aborts_run() {
        let config = instant_config();
        let master = MasterAgent::with_workers(
            vec![Arc::new(IqviaAgent::new(0.0)), Arc::new(FailingAgent)],
            ReportAgent::new(config.report.base_url, 0.0),
            Duration::from_secs(5),
        );
        let err = assert_err!(master.run("req_1", &AgentTask::new("X", None)).await);
        assert!(err.to_string().contains("upstream 503"));
    }

    #[tokio::test]
    async fn test_missing_agent_is_reported() {
        let master = MasterAgent::with_workers(
            vec![Arc::new(IqviaAgent::new(0.0))],
            ReportAgent::new("https://reports.test", 0.0),
            Duration::from_secs(5),
        );
        let err = master.run("req_2", &AgentTask::new("X", None)).await.unwrap_err();
        assert!(matches!(err, AgentError::MissingFindings("clinical trial")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_bounds_the_run() {
        let master = MasterAgent::with_workers(
            vec![Arc::new(StalledAgent)],
            ReportAgent::new("https://reports.test", 0.0),
            Duration::from_secs(1),
        );
        let err = master.run("req_3", &AgentTask::new("X", None)).await.unwrap_err();
        assert!(matches!(err, AgentError::Timeout(_)));
    }

    #[test]
    fn test_catalog_lists_six_agents() {
        let catalog = MasterAgent::new(&instant_config()).catalog();
        assert_eq!(catalog.total_agents, 6);
        assert_eq!(catalog.agents[0].kind, AgentKind::Orchestrator);
        assert_eq!(catalog.agents[1].name, "IQVIA Agent");
        assert_eq!(catalog.agents[5].kind, AgentKind::OutputAgent);
        assert_eq!(
            catalog.agents.iter().filter(|a| a.kind == AgentKind::DataAgent).count(),
            4
        );
    }

    #[test]
    fn test_agents_active_counts_report() {
        assert_eq!(MasterAgent::new(&instant_config()).agents_active(), 5);
    }
}
