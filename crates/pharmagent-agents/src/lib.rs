//! Pharmagent Agents - the multi-agent discovery engine.
//!
//! A discovery run for one molecule fans out to four data agents:
//! 1. Market data (IQVIA)
//! 2. Clinical trials
//! 3. Patent landscape
//! 4. Literature evidence (PubMed)
//!
//! The master agent joins their outputs into `Findings` and asks the report
//! agent for a report link.

pub mod agents;
pub mod error;
pub mod master;

pub use agents::{AgentPayload, AgentTask, WorkerAgent};
pub use error::AgentError;
pub use master::{Discovery, MasterAgent};

pub type Result<T> = std::result::Result<T, AgentError>;
