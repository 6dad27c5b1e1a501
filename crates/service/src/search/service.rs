use std::sync::Arc;

use tracing::{debug, instrument};

use super::domain::{Product, ProductQuery};
use super::repository::ProductRepository;
use crate::errors::ServiceError;

/// Search business rules on top of any [`ProductRepository`].
pub struct SearchService<R: ProductRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProductRepository + ?Sized> SearchService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Substring search over name, description and category.
    /// An empty query returns nothing rather than the whole collection.
    #[instrument(skip(self))]
    pub async fn search(&self, q: &str) -> Result<Vec<Product>, ServiceError> {
        if q.is_empty() {
            return Ok(Vec::new());
        }
        let found = self.repo.find(&ProductQuery::Text(q.to_string())).await?;
        debug!(count = found.len(), "text search");
        Ok(found)
    }

    #[instrument(skip(self))]
    pub async fn by_category(&self, category: &str) -> Result<Vec<Product>, ServiceError> {
        if category.is_empty() {
            return Ok(Vec::new());
        }
        self.repo.find(&ProductQuery::Category(category.to_string())).await
    }

    /// Inclusive range; bounds default to `0` and `+inf`.
    #[instrument(skip(self))]
    pub async fn by_price(&self, min: Option<f64>, max: Option<f64>) -> Result<Vec<Product>, ServiceError> {
        let min = min.unwrap_or(0.0);
        let max = max.unwrap_or(f64::INFINITY);
        self.repo.find(&ProductQuery::PriceRange { min, max }).await
    }
}
