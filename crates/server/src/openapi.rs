//! OpenAPI documents for both services, served at `/api-docs/openapi.json`.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Extra stored fields are passed through unchanged.
#[derive(Serialize, ToSchema)]
pub struct ProductDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDoc {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`
    pub due_date: Option<String>,
    pub completed: bool,
    pub user_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskDoc {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
    pub user_id: Option<i32>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskDoc {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::search::search,
        crate::routes::search::by_category,
        crate::routes::search::by_price,
    ),
    components(schemas(HealthResponse, ProductDoc)),
    tags((name = "health"), (name = "search"))
)]
pub struct SearchApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::tasks::index,
        crate::routes::tasks::list,
        crate::routes::tasks::get,
        crate::routes::tasks::create,
        crate::routes::tasks::update,
        crate::routes::tasks::delete,
    ),
    components(schemas(HealthResponse, TaskDoc, CreateTaskDoc, UpdateTaskDoc)),
    tags((name = "health"), (name = "tasks"))
)]
pub struct TaskApiDoc;
