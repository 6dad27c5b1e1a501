use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, TaskStoreKind};
use migration::MigratorTrait;
use service::search::{repo::mongo::MongoProductRepository, repository::ProductRepository};
use service::task::{
    repo::{memory::InMemoryTaskRepository, seaorm::SeaOrmTaskRepository},
    repository::TaskRepository,
};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::StartupError;
use crate::routes::{self, SearchState, TaskState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` (or `CONFIG_PATH`) plus environment overrides.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Resolves when Ctrl+C is received.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for ctrl_c");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

pub async fn search_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let repo: Arc<dyn ProductRepository> = Arc::new(MongoProductRepository::connect(&cfg.mongo).await?);
    Ok(routes::build_search_router(SearchState::new(repo), build_cors()))
}

/// Picks the task store from `[tasks].store`; the database store is migrated before use.
pub async fn task_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let repo: Arc<dyn TaskRepository> = match cfg.tasks.store {
        TaskStoreKind::Memory => {
            info!(store = "memory", "task store selected");
            Arc::new(InMemoryTaskRepository::new())
        }
        TaskStoreKind::Database => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            info!(store = "database", "task store selected, migrations applied");
            Arc::new(SeaOrmTaskRepository::new(db))
        }
    };
    Ok(routes::build_task_router(TaskState::new(repo), build_cors(), &cfg.tasks.route_prefix))
}

async fn serve<F>(app: Router, cfg: &AppConfig, name: &str, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(service = name, %addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| StartupError::Any(e.into()))?;
    info!(service = name, "server stopped");
    Ok(())
}

/// Run the product search service until `shutdown` resolves.
pub async fn run_search<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = search_app(&cfg).await?;
    serve(app, &cfg, "search_service", shutdown).await
}

/// Run the task service until `shutdown` resolves.
pub async fn run_tasks<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = task_app(&cfg).await?;
    info!(prefix = %cfg.tasks.route_prefix, standalone = cfg.tasks.is_standalone(), "task routes mounted");
    serve(app, &cfg, "task_service", shutdown).await
}

/// Process entry shared by the service binaries.
///
/// Loads `.env`, initializes logging, installs a panic hook, builds the tokio
/// runtime from `[server].worker_threads` and drives `run` to completion.
pub fn run_main<F, Fut>(name: &'static str, run: F) -> ExitCode
where
    F: FnOnce(AppConfig) -> Fut,
    Fut: Future<Output = Result<(), StartupError>>,
{
    // .env first so RUST_LOG / LOG_FORMAT take effect
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = name, event = "logger_init", "tracing subscriber initialized");

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = name, event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = name, event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    let worker_threads = cfg.server.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = name, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(service = name, event = "start", %service_id, pid, version, threads = worker_threads.unwrap_or_default(), "service starting");

    match rt.block_on(run(cfg)) {
        Ok(()) => {
            info!(service = name, event = "stop", %service_id, pid, "service stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = name, event = "run_failed", error = %e, "service exited with error");
            ExitCode::FAILURE
        }
    }
}
