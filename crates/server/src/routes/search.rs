use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use service::search::domain::Product;
use tracing::info;

use super::SearchState;
use crate::errors::JsonApiError;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of name, description or category.
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceQuery {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

fn search_failed(e: service::errors::ServiceError) -> JsonApiError {
    JsonApiError::from_service(e, "Not Found", "Search Failed")
}

#[utoipa::path(
    get, path = "/api/search", tag = "search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products", body = [crate::openapi::ProductDoc]),
        (status = 500, description = "Search Failed")
    )
)]
pub async fn search(State(state): State<SearchState>, Query(q): Query<SearchQuery>) -> Result<Json<Vec<Product>>, JsonApiError> {
    let q = q.q.unwrap_or_default();
    let found = state.search.search(&q).await.map_err(search_failed)?;
    info!(query = %q, count = found.len(), "search");
    Ok(Json(found))
}

#[utoipa::path(
    get, path = "/api/search/category/{category}", tag = "search",
    params(("category" = String, Path, description = "Category name, case-insensitive")),
    responses(
        (status = 200, description = "Products in the category", body = [crate::openapi::ProductDoc]),
        (status = 500, description = "Search Failed")
    )
)]
pub async fn by_category(State(state): State<SearchState>, Path(category): Path<String>) -> Result<Json<Vec<Product>>, JsonApiError> {
    let found = state.search.by_category(&category).await.map_err(search_failed)?;
    info!(%category, count = found.len(), "search_by_category");
    Ok(Json(found))
}

#[utoipa::path(
    get, path = "/api/search/price", tag = "search",
    params(PriceQuery),
    responses(
        (status = 200, description = "Products priced within [min, max]", body = [crate::openapi::ProductDoc]),
        (status = 400, description = "Non-numeric bound"),
        (status = 500, description = "Search Failed")
    )
)]
pub async fn by_price(State(state): State<SearchState>, Query(p): Query<PriceQuery>) -> Result<Json<Vec<Product>>, JsonApiError> {
    let found = state.search.by_price(p.min, p.max).await.map_err(search_failed)?;
    info!(min = ?p.min, max = ?p.max, count = found.len(), "search_by_price");
    Ok(Json(found))
}
