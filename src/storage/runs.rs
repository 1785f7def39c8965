//! Validation run metadata.

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

/// Final counters of a validation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStats<'a> {
    /// Run the counters belong to
    pub run_id: &'a str,
    /// Pending repositories selected for the run
    pub total_targets: usize,
    /// Outcomes with a `valid` verdict
    pub valid_count: usize,
    /// Outcomes with an `invalid` verdict
    pub invalid_count: usize,
    /// Outcomes that stopped on a transport failure or deadline
    pub errored_count: usize,
    /// Targets not started because the run was interrupted
    pub skipped_count: usize,
    /// Wall-clock duration of the run
    pub elapsed_seconds: f64,
}

/// Inserts the row for a run that is starting.
pub async fn insert_run_metadata(
    pool: &SqlitePool,
    run_id: &str,
    start_time_ms: i64,
    version: &str,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO validation_runs (run_id, version, start_time_ms)
         VALUES (?, ?, ?)
         ON CONFLICT(run_id) DO UPDATE SET
             version=excluded.version,
             start_time_ms=excluded.start_time_ms",
    )
    .bind(run_id)
    .bind(version)
    .bind(start_time_ms)
    .execute(pool)
    .await?;

    Ok(())
}

/// Records the final statistics of a run.
pub async fn update_run_stats(pool: &SqlitePool, stats: &RunStats<'_>) -> Result<(), DatabaseError> {
    let end_time_ms = chrono::Utc::now().timestamp_millis();
    let count = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);

    sqlx::query(
        "UPDATE validation_runs
         SET end_time_ms = ?, total_targets = ?, valid_count = ?, invalid_count = ?,
             errored_count = ?, skipped_count = ?, elapsed_seconds = ?
         WHERE run_id = ?",
    )
    .bind(end_time_ms)
    .bind(count(stats.total_targets))
    .bind(count(stats.valid_count))
    .bind(count(stats.invalid_count))
    .bind(count(stats.errored_count))
    .bind(count(stats.skipped_count))
    .bind(stats.elapsed_seconds)
    .bind(stats.run_id)
    .execute(pool)
    .await?;

    Ok(())
}
