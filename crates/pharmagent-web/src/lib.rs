//! pharmagent-web: HTTP front for Pharmagent.
//! Provides:
//!   - the molecule search page and its `/api/search` endpoint
//!   - the multi-agent discovery API under `/api/v1`
//!   - health and service info
//!   - a live event stream of discovery runs

pub mod handlers;
pub mod router;
pub mod sse;
pub mod state;
