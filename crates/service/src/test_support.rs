#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::search::domain::Product;

/// In-memory SQLite with migrations applied; one database per call.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_sqlite_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new("p1", "Wireless Mouse", "Ergonomic 2.4GHz mouse", "Electronics", 25.99),
        Product::new("p2", "Mechanical Keyboard", "Blue switches", "Electronics", 89.0),
        Product::new("p3", "Coffee Mug", "Ceramic, 350ml", "Kitchen", 9.99),
        Product::new("p4", "Notebook", "A5 dotted paper", "Stationery", 15.0),
        Product::new("p5", "Desk Lamp", "LED lamp for the office", "Home Electronics", 32.5),
    ]
}
