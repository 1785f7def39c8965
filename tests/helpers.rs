// Shared helpers for integration tests.

use std::path::Path;
use std::sync::Arc;

use repo_validator::storage::{init_db_pool_with_path, run_migrations};
use repo_validator::{initialization, Config, LogFormat, LogLevel, ProcessingStats, ValidationEngine};
use sqlx::SqlitePool;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config for tests: quiet logging, short timeouts, a single attempt per request.
#[allow(dead_code)]
pub fn test_config(db_path: &Path) -> Config {
    Config {
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
        db_path: db_path.to_path_buf(),
        timeout_seconds: 5,
        target_timeout_seconds: 15,
        retry_attempts: 1,
        user_agent: "repo_validator_test/1.0".to_string(),
        ..Default::default()
    }
}

/// Engine backed by real HTTP clients built from `config`.
#[allow(dead_code)]
pub fn test_engine(config: &Config) -> ValidationEngine {
    let stats = Arc::new(ProcessingStats::new());
    let fetcher = initialization::init_fetcher(config, Arc::clone(&stats))
        .expect("Failed to build HTTP clients");
    ValidationEngine::new(Arc::new(fetcher))
        .with_target_timeout(config.target_timeout())
        .with_stats(stats)
}

/// Opens a file-backed pool with migrations applied.
#[allow(dead_code)]
pub async fn create_test_pool_with_path(db_path: &Path) -> SqlitePool {
    let pool = init_db_pool_with_path(db_path)
        .await
        .expect("Failed to open test database");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    (*pool).clone()
}

/// Serves a healthy repository page at `route` (HEAD 200, GET 200 "Welcome").
#[allow(dead_code)]
pub async fn mount_healthy_repo(server: &MockServer, route: &str) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string("Welcome"))
        .mount(server)
        .await;
}

/// Serves a deleted repository at `route` (404 with a "Not Found" page).
#[allow(dead_code)]
pub async fn mount_gone_repo(server: &MockServer, route: &str) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(server)
        .await;
}

/// A URL on a closed local port; every request to it fails to connect.
#[allow(dead_code)]
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1/owner/unreachable";
