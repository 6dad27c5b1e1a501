//! SeaORM entities and connection helpers for the persisted task store.

pub mod errors;
pub mod db;
pub mod task;

#[cfg(test)]
mod tests;
