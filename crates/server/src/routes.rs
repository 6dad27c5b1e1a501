use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::search::{repository::ProductRepository, SearchService};
use service::task::{repository::TaskRepository, TaskService};

use crate::openapi::{SearchApiDoc, TaskApiDoc};

pub mod search;
pub mod tasks;

#[derive(Clone)]
pub struct SearchState {
    pub search: Arc<SearchService<dyn ProductRepository>>,
}

impl SearchState {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { search: Arc::new(SearchService::new(repo)) }
    }
}

#[derive(Clone)]
pub struct TaskState {
    pub tasks: Arc<TaskService<dyn TaskRepository>>,
}

impl TaskState {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { tasks: Arc::new(TaskService::new(repo)) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "healthy" })
}

/// Search service router: `/api/search*`, `/health` and the OpenAPI document.
pub fn build_search_router(state: SearchState, cors: CorsLayer) -> Router {
    let app = Router::new()
        .route("/api/search", get(search::search))
        .route("/api/search/category/:category", get(search::by_category))
        .route("/api/search/price", get(search::by_price))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(|| async { Json(SearchApiDoc::openapi()) }))
        .with_state(state);
    with_layers(app, cors)
}

/// Task service router.
///
/// An empty `prefix` serves the collection at `/`; otherwise routes live
/// under `prefix` and `/` answers with a liveness message.
pub fn build_task_router(state: TaskState, cors: CorsLayer, prefix: &str) -> Router {
    let mut app = Router::new();
    if prefix.is_empty() {
        app = app.route("/", get(tasks::list).post(tasks::create));
    } else {
        app = app
            .route("/", get(tasks::index))
            .route(prefix, get(tasks::list).post(tasks::create))
            .route(&format!("{prefix}/"), get(tasks::list).post(tasks::create));
    }
    let app = app
        .route(&format!("{prefix}/:id"), get(tasks::get).put(tasks::update).delete(tasks::delete))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(|| async { Json(TaskApiDoc::openapi()) }))
        .with_state(state);
    with_layers(app, cors)
}

fn with_layers(app: Router, cors: CorsLayer) -> Router {
    app.layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            // 5xx
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
