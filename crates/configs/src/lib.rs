use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub mongo: MongoConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 5000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Document store settings for the search service.
#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    #[serde(default = "default_mongo_uri")]
    pub uri: String,
    /// Falls back to the database named in `uri`, then `products`.
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_mongo_uri() -> String { "mongodb://localhost:27017/products".into() }
fn default_collection() -> String { "products".into() }

impl Default for MongoConfig {
    fn default() -> Self {
        Self { uri: default_mongo_uri(), database: None, collection: default_collection() }
    }
}

/// Which task repository backs the task service.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStoreKind {
    #[default]
    Memory,
    Database,
}

impl FromStr for TaskStoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => Ok(Self::Memory),
            "database" | "db" | "sql" => Ok(Self::Database),
            other => Err(anyhow!("unknown task store `{other}` (expected memory|database)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TasksConfig {
    #[serde(default)]
    pub store: TaskStoreKind,
    /// `/tasks` mounts the task routes under a prefix; empty or `/` serves them at root.
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,
}

fn default_route_prefix() -> String { "/tasks".into() }

impl Default for TasksConfig {
    fn default() -> Self {
        Self { store: TaskStoreKind::default(), route_prefix: default_route_prefix() }
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// File config when present, otherwise defaults; env overrides applied on top.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) => {
                if let Some(io) = e.downcast_ref::<std::io::Error>() {
                    if io.kind() != std::io::ErrorKind::NotFound {
                        return Err(e);
                    }
                } else {
                    return Err(e);
                }
                AppConfig::default()
            }
        };
        cfg.apply_env_overrides(|name| std::env::var(name).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay environment values; `lookup` is `std::env::var` outside of tests.
    ///
    /// A variable that is set but does not parse is an error, never a silent default.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(host) = get("SERVER_HOST") {
            self.server.host = host;
        }
        for name in ["PORT", "SERVER_PORT"] {
            if let Some(port) = get(name) {
                self.server.port = port.parse::<u16>().map_err(|e| anyhow!("{name}=`{port}` is not a valid port: {e}"))?;
                break;
            }
        }
        if let Some(w) = get("TOKIO_WORKER_THREADS") {
            let threads = w.parse::<usize>().map_err(|e| anyhow!("TOKIO_WORKER_THREADS=`{w}` is not a number: {e}"))?;
            self.server.worker_threads = Some(threads);
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(uri) = get("MONGO_URI") {
            self.mongo.uri = uri;
        }
        if let Some(store) = get("TASK_STORE") {
            self.tasks.store = store.parse::<TaskStoreKind>().map_err(|e| anyhow!("TASK_STORE: {e}"))?;
        }
        if let Some(prefix) = lookup("TASK_ROUTE_PREFIX") {
            self.tasks.route_prefix = prefix.trim().to_string();
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.tasks.normalize()?;
        self.mongo.validate()?;
        if self.tasks.store == TaskStoreKind::Database {
            self.database.validate()?;
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

/// Paths the task router registers next to the prefixed routes.
const RESERVED_PREFIXES: [&str; 2] = ["/health", "/api-docs"];

impl TasksConfig {
    fn normalize(&mut self) -> Result<()> {
        let trimmed = self.route_prefix.trim().trim_end_matches('/');
        self.route_prefix = if trimmed.is_empty() {
            String::new()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };

        let prefix = self.route_prefix.as_str();
        if prefix.contains([':', '*', '{', '}']) || prefix.contains("//") {
            return Err(anyhow!("tasks.route_prefix `{prefix}` must be a literal path"));
        }
        if RESERVED_PREFIXES.iter().any(|r| prefix == *r || prefix.starts_with(&format!("{r}/"))) {
            return Err(anyhow!("tasks.route_prefix `{prefix}` collides with a built-in route"));
        }
        Ok(())
    }

    /// Standalone variant: task routes live at the root.
    pub fn is_standalone(&self) -> bool {
        self.route_prefix.is_empty()
    }
}

impl MongoConfig {
    pub fn validate(&self) -> Result<()> {
        let lower = self.uri.trim().to_lowercase();
        if !(lower.starts_with("mongodb://") || lower.starts_with("mongodb+srv://")) {
            return Err(anyhow!("mongo.uri must start with mongodb:// or mongodb+srv://"));
        }
        if self.collection.trim().is_empty() {
            return Err(anyhow!("mongo.collection must not be empty"));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_serve_on_port_5000_with_memory_store() {
        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.mongo.uri, "mongodb://localhost:27017/products");
        assert_eq!(cfg.mongo.collection, "products");
        assert_eq!(cfg.tasks.store, TaskStoreKind::Memory);
        assert_eq!(cfg.tasks.route_prefix, "/tasks");
    }

    #[test]
    fn toml_sections_parse() {
        let cfg = load_from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8081

            [database]
            url = "postgres://u:p@localhost:5432/tasks"

            [tasks]
            store = "database"
            route_prefix = "/"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8081);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.tasks.store, TaskStoreKind::Database);

        let mut cfg = cfg;
        cfg.normalize_and_validate().unwrap();
        assert!(cfg.tasks.is_standalone());
    }

    #[test]
    fn env_overrides_win_over_file() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(env_of(&[
            ("PORT", "7000"),
            ("MONGO_URI", "mongodb://mongo:27017/shop"),
            ("TASK_STORE", "database"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("TASK_ROUTE_PREFIX", ""),
        ]))
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 7000);
        assert_eq!(cfg.mongo.uri, "mongodb://mongo:27017/shop");
        assert_eq!(cfg.tasks.store, TaskStoreKind::Database);
        assert!(cfg.tasks.is_standalone());
    }

    #[test]
    fn database_store_requires_url() {
        let mut cfg = AppConfig::default();
        cfg.tasks.store = TaskStoreKind::Database;
        assert!(cfg.normalize_and_validate().is_err());

        cfg.database.url = "mysql://nope".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn memory_store_ignores_database_section() {
        let mut cfg = AppConfig::default();
        cfg.database.url = String::new();
        assert!(cfg.normalize_and_validate().is_ok());
    }

    #[test]
    fn route_prefix_is_normalized() {
        let mut t = TasksConfig { store: TaskStoreKind::Memory, route_prefix: "tasks/".into() };
        t.normalize().unwrap();
        assert_eq!(t.route_prefix, "/tasks");
        assert!(!t.is_standalone());
    }

    #[test]
    fn route_prefix_rejects_patterns_and_builtin_paths() {
        for bad in ["/tasks/:id", "/*rest", "health", "/api-docs/v1", "/{x}"] {
            let mut t = TasksConfig { store: TaskStoreKind::Memory, route_prefix: bad.into() };
            assert!(t.normalize().is_err(), "{bad} should be rejected");
        }
        let mut t = TasksConfig { store: TaskStoreKind::Memory, route_prefix: "/healthy-tasks".into() };
        assert!(t.normalize().is_ok());
    }

    #[test]
    fn unparsable_env_values_are_errors() {
        let mut cfg = AppConfig::default();
        let err = cfg
            .apply_env_overrides(env_of(&[("TASK_STORE", "postgres"), ("DATABASE_URL", "postgres://u:p@db/tasks")]))
            .unwrap_err();
        assert!(err.to_string().contains("TASK_STORE"));

        let mut cfg = AppConfig::default();
        let err = cfg.apply_env_overrides(env_of(&[("PORT", "80a")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert_eq!(cfg.server.port, 5000);

        let mut cfg = AppConfig::default();
        assert!(cfg.apply_env_overrides(env_of(&[("TOKIO_WORKER_THREADS", "many")])).is_err());
    }

    #[test]
    fn blank_env_values_keep_file_values() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(env_of(&[("PORT", "  "), ("TASK_STORE", "")])).unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.tasks.store, TaskStoreKind::Memory);
    }

    #[test]
    fn bad_mongo_uri_rejected() {
        let mut cfg = AppConfig::default();
        cfg.mongo.uri = "http://localhost".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn store_kind_from_str() {
        assert_eq!("Memory".parse::<TaskStoreKind>().unwrap(), TaskStoreKind::Memory);
        assert_eq!("db".parse::<TaskStoreKind>().unwrap(), TaskStoreKind::Database);
        assert!("redis".parse::<TaskStoreKind>().is_err());
    }
}
