//! Shared test helpers for storage module tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::storage::run_migrations;

/// Creates an in-memory database pool with migrations applied.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Inserts a pending repository and returns its id.
pub async fn create_test_repository(pool: &SqlitePool, url: &str) -> i64 {
    crate::storage::insert_pending_repository(pool, url, None)
        .await
        .expect("Failed to insert test repository")
        .expect("Test repository URL should be new")
}
