//! Shared helpers for the search and task services.

pub mod types;
pub mod utils;
pub mod env;
