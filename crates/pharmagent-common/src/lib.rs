//! pharmagent-common: shared types, errors, and configuration used across all Pharmagent crates.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, PharmaError, Result};
pub use models::SearchQuery;
