//! HTTP handlers for all web routes.

pub mod discover;
pub mod page;
pub mod search;
pub mod system;
