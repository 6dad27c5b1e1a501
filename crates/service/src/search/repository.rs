use async_trait::async_trait;

use super::domain::{Product, ProductQuery};
use crate::errors::ServiceError;

/// Read-only access to the product collection.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All matching products in storage order.
    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>, ServiceError>;
}
