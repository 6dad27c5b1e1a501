use std::net::SocketAddr;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct TestApp {
    base_url: String,
    stop: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<std::io::Result<()>>,
}

async fn start_server(cfg: AppConfig) -> anyhow::Result<TestApp> {
    let app = server::startup::task_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { let _ = stopped.await; })
            .await
    });
    Ok(TestApp { base_url, stop, handle })
}

#[tokio::test]
async fn e2e_task_service_over_http() -> anyhow::Result<()> {
    let app = start_server(AppConfig::default()).await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"message": "Task Service is running"}));

    let res = c.post(format!("{}/tasks", app.base_url))
        .json(&json!({"title": "Ship release", "userId": 3}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    let id = created["id"].as_i64().unwrap_or_default();

    let res = c.get(format!("{}/tasks?userId=3", app.base_url)).send().await?;
    let list = res.json::<Value>().await?;
    assert_eq!(list, json!([created]));

    let res = c.delete(format!("{}/tasks/{id}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("{}/tasks/{id}", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c
        .request(reqwest::Method::OPTIONS, format!("{}/tasks", app.base_url))
        .header("origin", "http://example.com")
        .header("access-control-request-method", "POST")
        .send().await?;
    assert!(res.headers().get("access-control-allow-origin").is_some());

    let _ = app.stop.send(());
    app.handle.await??;
    Ok(())
}

#[tokio::test]
async fn e2e_standalone_prefix_from_config() -> anyhow::Result<()> {
    let mut cfg = AppConfig::default();
    cfg.apply_env_overrides(|name| (name == "TASK_ROUTE_PREFIX").then(String::new))?;
    cfg.normalize_and_validate()?;
    assert!(cfg.tasks.is_standalone());

    let app = start_server(cfg).await?;
    let c = reqwest::Client::new();
    let res = c.post(format!("{}/", app.base_url)).json(&json!({"title": "root task"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let res = c.get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?[0]["title"], "root task");

    let _ = app.stop.send(());
    app.handle.await??;
    Ok(())
}
