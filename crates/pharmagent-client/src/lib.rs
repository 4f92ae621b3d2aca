//! pharmagent-client: the search form handler.
//!
//! Mirrors what the search page does on submit:
//!   - suppress the form's default navigation
//!   - POST the two query fields to `/api/search` as JSON
//!   - render the response into the results area, or an `Error: ...` line
//!
//! The page contract (element ids) lives in [`dom`], rendering in [`results`]
//! and the network exchange in [`handler`].

pub mod dom;
pub mod error;
pub mod handler;
pub mod results;

pub use dom::{SearchForm, SubmitEvent};
pub use error::SearchError;
pub use handler::SubmitHandler;
pub use results::{ResultsArea, ResultsContent, NO_RESULTS};
