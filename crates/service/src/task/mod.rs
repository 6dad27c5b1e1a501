//! Task CRUD: domain types, repository abstraction and the service on top.
//!
//! Two repositories implement [`repository::TaskRepository`]:
//! [`repo::memory::InMemoryTaskRepository`] and [`repo::seaorm::SeaOrmTaskRepository`].

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::TaskService;
