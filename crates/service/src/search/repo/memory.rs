use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::search::domain::{Product, ProductQuery};
use crate::search::repository::ProductRepository;

/// Product collection held in memory, insertion order preserved.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products: RwLock::new(products) }
    }

    pub async fn insert(&self, product: Product) {
        self.products.write().await.push(product);
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>, ServiceError> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|p| query.matches(p)).cloned().collect())
    }
}
