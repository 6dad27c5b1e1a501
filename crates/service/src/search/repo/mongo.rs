use async_trait::async_trait;
use configs::MongoConfig;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::search::domain::{Product, ProductQuery};
use crate::search::matcher::TextMatch;
use crate::search::repository::ProductRepository;

const FALLBACK_DATABASE: &str = "products";

/// MongoDB-backed product repository.
pub struct MongoProductRepository {
    collection: Collection<Document>,
}

impl MongoProductRepository {
    /// Connect using `[mongo]`; the driver connects lazily, so this does not
    /// fail when the server is down.
    pub async fn connect(cfg: &MongoConfig) -> Result<Self, ServiceError> {
        let client = Client::with_uri_str(&cfg.uri).await?;
        let db = match cfg.database.as_deref() {
            Some(name) => client.database(name),
            None => client.default_database().unwrap_or_else(|| client.database(FALLBACK_DATABASE)),
        };
        info!(database = %db.name(), collection = %cfg.collection, "mongo product repository ready");
        Ok(Self { collection: db.collection::<Document>(&cfg.collection) })
    }

    pub fn from_collection(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

/// Translate a query into the equivalent Mongo filter.
pub fn build_filter(query: &ProductQuery) -> Document {
    match query {
        ProductQuery::Text(q) => {
            let m = TextMatch::CONTAINS_IGNORE_CASE;
            let pattern = m.regex_pattern(q);
            let clauses: Vec<Document> = ProductQuery::TEXT_FIELDS
                .iter()
                .map(|field| doc! { *field: { "$regex": pattern.clone(), "$options": m.regex_options() } })
                .collect();
            doc! { "$or": clauses }
        }
        ProductQuery::Category(c) => {
            let m = TextMatch::EXACT_IGNORE_CASE;
            doc! { "category": { "$regex": m.regex_pattern(c), "$options": m.regex_options() } }
        }
        ProductQuery::PriceRange { min, max } => doc! { "price": { "$gte": *min, "$lte": *max } },
    }
}

/// Render a stored document as a [`Product`], stringifying `_id`.
pub fn product_from_document(mut doc: Document) -> Result<Product, ServiceError> {
    let id = match doc.remove("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s,
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let mut fields = match Bson::Document(doc).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    fields.insert("_id".into(), Value::String(id));
    serde_json::from_value(Value::Object(fields)).map_err(|e| ServiceError::Db(format!("malformed product document: {e}")))
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>, ServiceError> {
        let filter = build_filter(query);
        debug!(%filter, "mongo find");
        let mut cursor = self.collection.find(filter).await?;
        let mut products = Vec::new();
        while cursor.advance().await? {
            let doc = cursor.deserialize_current()?;
            products.push(product_from_document(doc)?);
        }
        Ok(products)
    }
}
