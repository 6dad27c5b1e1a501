//! Service layer for the search and task services.
//! - Repository traits decouple business rules from storage.
//! - Each trait has an in-process implementation plus a real datastore one.
//! - Errors are reported through [`errors::ServiceError`].

pub mod errors;
pub mod task;
pub mod search;
#[cfg(test)]
pub mod test_support;
