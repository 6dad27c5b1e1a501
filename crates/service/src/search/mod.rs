//! Product search over a document collection.
//!
//! [`matcher::TextMatch`] is the single text predicate; the in-memory
//! repository evaluates it directly and the Mongo repository translates it
//! into a `$regex` filter.

pub mod domain;
pub mod matcher;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::SearchService;
