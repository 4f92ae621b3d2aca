//! Request, response and finding types shared by the client, the agents and the web server.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Search ────────────────────────────────────────────────────────────────────

/// The two free-text fields of the search form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub molecule_name: String,
    pub disease_area: String,
}

impl SearchQuery {
    pub fn new(molecule_name: impl Into<String>, disease_area: impl Into<String>) -> Self {
        Self {
            molecule_name: molecule_name.into(),
            disease_area: disease_area.into(),
        }
    }
}

// ── Discovery API ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverRequest {
    pub molecule_name: String,
    #[serde(default)]
    pub indication: Option<String>,
    #[serde(default)]
    pub filters: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverResponse {
    pub request_id: String,
    pub status: DiscoveryStatus,
    pub agents_active: u32,
    pub estimated_time: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryStatus {
    Processing,
    Completed,
    Error,
}

/// Generates `req_` followed by eight hex characters.
pub fn new_request_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("req_{}", &hex[..8])
}

// ── Findings ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub market_size: String,
    pub sales_trend: String,
    pub competitors: u32,
    pub market_share: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    pub active_trials: u32,
    pub recruiting: u32,
    pub phases: Vec<String>,
    pub enrollment_total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatentLandscape {
    pub total_patents: u32,
    pub competitors: u32,
    pub expiry_date: NaiveDate,
    pub strength: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteratureEvidence {
    pub papers_found: u32,
    pub recent_papers: u32,
    pub key_findings: Vec<String>,
}

/// Aggregated output of one discovery run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Findings {
    pub iqvia_data: MarketData,
    pub clinical_trials: TrialSummary,
    pub patent_landscape: PatentLandscape,
    pub literature_evidence: LiteratureEvidence,
    pub summary: String,
}

// ── Result store records ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryRecord {
    pub request_id: String,
    pub status: DiscoveryStatus,
    pub molecule: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub findings: Option<Findings>,
    pub pdf_url: Option<String>,
    pub processing_time_seconds: Option<f64>,
    pub error: Option<String>,
}

impl DiscoveryRecord {
    pub fn processing(request_id: impl Into<String>, molecule: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            status: DiscoveryStatus::Processing,
            molecule: Some(molecule.into()),
            created_at: Utc::now(),
            completed_at: None,
            findings: None,
            pdf_url: None,
            processing_time_seconds: None,
            error: None,
        }
    }

    pub fn complete(&mut self, findings: Findings, pdf_url: String, elapsed_secs: f64) {
        self.status = DiscoveryStatus::Completed;
        self.findings = Some(findings);
        self.pdf_url = Some(pdf_url);
        self.processing_time_seconds = Some(elapsed_secs);
        self.completed_at = Some(Utc::now());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = DiscoveryStatus::Error;
        self.error = Some(message.into());
    }
}

/// Body of `GET /api/v1/results/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsView {
    pub request_id: String,
    pub status: DiscoveryStatus,
    pub findings: Option<Findings>,
    pub pdf_url: Option<String>,
    pub processing_time_seconds: Option<f64>,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&DiscoveryRecord> for ResultsView {
    fn from(r: &DiscoveryRecord) -> Self {
        Self {
            request_id: r.request_id.clone(),
            status: r.status,
            findings: r.findings.clone(),
            pdf_url: r.pdf_url.clone(),
            processing_time_seconds: r.processing_time_seconds,
            completed_at: r.completed_at,
            error: r.error.clone(),
        }
    }
}

/// Body of `GET /api/v1/status/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusView {
    pub request_id: String,
    pub status: DiscoveryStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&DiscoveryRecord> for StatusView {
    fn from(r: &DiscoveryRecord) -> Self {
        Self {
            request_id: r.request_id.clone(),
            status: r.status,
            created_at: r.created_at,
            completed_at: r.completed_at,
        }
    }
}

// ── Agent catalog ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Orchestrator,
    DataAgent,
    OutputAgent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AgentKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCatalog {
    pub agents: Vec<AgentInfo>,
    pub total_agents: usize,
}
