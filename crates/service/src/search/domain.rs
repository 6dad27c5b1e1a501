use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::matcher::TextMatch;

/// Product document as served to clients.
///
/// The store id is rendered as a string under `_id`; fields other than the
/// four known ones are passed through untouched. Known fields never reject a
/// document: odd types are coerced (see `lenient_text` and `lenient_price`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: &str, description: &str, category: &str, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category: category.into(),
            price,
            extra: Map::new(),
        }
    }
}

/// Strings as-is, `null` as empty, any other value in its JSON form.
fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Plain numbers, numeric strings and the extended-JSON wrappers Mongo uses
/// for `Decimal128`, `Int64` and non-finite doubles. Anything else, `null`
/// included, reads as `0`.
fn lenient_price<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(price_of(&Value::deserialize(d)?).unwrap_or(0.0))
}

fn price_of(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(m) => ["$numberDecimal", "$numberDouble", "$numberLong", "$numberInt"]
            .iter()
            .find_map(|k| m.get(*k))
            .and_then(price_of),
        _ => None,
    }
}

/// One of the three supported lookups.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductQuery {
    /// Case-insensitive substring of name, description or category.
    Text(String),
    /// Case-insensitive equality with the whole category.
    Category(String),
    /// Inclusive price bounds.
    PriceRange { min: f64, max: f64 },
}

impl ProductQuery {
    pub const TEXT_FIELDS: [&'static str; 3] = ["name", "description", "category"];

    pub fn matches(&self, p: &Product) -> bool {
        match self {
            ProductQuery::Text(q) => {
                let m = TextMatch::CONTAINS_IGNORE_CASE;
                m.matches(&p.name, q) || m.matches(&p.description, q) || m.matches(&p.category, q)
            }
            ProductQuery::Category(c) => TextMatch::EXACT_IGNORE_CASE.matches(&p.category, c),
            ProductQuery::PriceRange { min, max } => *min <= p.price && p.price <= *max,
        }
    }
}
