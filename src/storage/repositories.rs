//! Repository records and their validation log.

use sqlx::SqlitePool;

use crate::activity::ActivityStatus;
use crate::batch::{AuditRecord, ValidationOutcome, ValidationTarget};
use crate::error_handling::DatabaseError;
use crate::repo_ref::RepoRef;

use super::models::{RepositoryRecord, ValidationLogRecord};

/// Check type recorded for activity checks in `validation_logs`.
pub const ACTIVITY_VALIDATION: &str = "activity";

/// Inserts a repository in `pending` state.
///
/// Returns the new id, or `None` if the URL, or the same `owner/name` on the
/// same host, is already stored.
pub async fn insert_pending_repository(
    pool: &SqlitePool,
    url: &str,
    repo: Option<&RepoRef>,
) -> Result<Option<i64>, DatabaseError> {
    let now = chrono::Utc::now().timestamp_millis();
    let id: Option<(i64,)> = sqlx::query_as(
        "INSERT INTO repositories
             (host, repo_name, owner, full_name, url, created_at_ms, updated_at_ms)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT DO NOTHING
         RETURNING id",
    )
    .bind(repo.map(|r| r.host.as_str()))
    .bind(repo.map(|r| r.name.as_str()))
    .bind(repo.map(|r| r.owner.as_str()))
    .bind(repo.map(RepoRef::full_name))
    .bind(url)
    .bind(now)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(id.map(|(id,)| id))
}

/// Selects up to `limit` pending repositories, oldest first.
pub async fn select_pending_targets(
    pool: &SqlitePool,
    limit: usize,
) -> Result<Vec<ValidationTarget>, DatabaseError> {
    let rows: Vec<(i64, String)> = sqlx::query_as(
        "SELECT id, url FROM repositories
         WHERE validation_status = 'pending'
         ORDER BY id
         LIMIT ?",
    )
    .bind(i64::try_from(limit).unwrap_or(i64::MAX))
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, url)| ValidationTarget { id, url })
        .collect())
}

/// Stores a validation outcome: the verdict on the repository row and one
/// audit row, in a single transaction.
pub async fn record_outcome(
    pool: &SqlitePool,
    outcome: &ValidationOutcome,
    run_id: Option<&str>,
) -> Result<(), DatabaseError> {
    let now = chrono::Utc::now().timestamp_millis();
    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE repositories
         SET validation_status = ?, validation_level = ?, http_status = ?, updated_at_ms = ?
         WHERE id = ?",
    )
    .bind(outcome.verdict.as_str())
    .bind(i64::from(outcome.validation_level))
    .bind(outcome.result.http_status.map(i64::from))
    .bind(now)
    .bind(outcome.target.id)
    .execute(&mut *tx)
    .await?;

    insert_audit(&mut tx, &outcome.audit, run_id, now).await?;

    tx.commit().await?;
    Ok(())
}

async fn insert_audit(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    audit: &AuditRecord,
    run_id: Option<&str>,
    executed_at_ms: i64,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO validation_logs
             (repo_id, validation_type, status_code, result, details, run_id, executed_at_ms)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(audit.repo_id)
    .bind(&audit.validation_type)
    .bind(audit.status_code.map(i64::from))
    .bind(audit.result)
    .bind(&audit.details)
    .bind(run_id)
    .bind(executed_at_ms)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Stores an activity status on the repository row and logs it as an
/// `activity` audit row.
pub async fn update_activity(
    pool: &SqlitePool,
    repo_id: i64,
    status: &ActivityStatus,
    run_id: Option<&str>,
) -> Result<(), DatabaseError> {
    let now = chrono::Utc::now().timestamp_millis();
    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE repositories SET is_active = ?, activity_reason = ?, updated_at_ms = ? WHERE id = ?",
    )
    .bind(status.is_active)
    .bind(&status.reason)
    .bind(now)
    .bind(repo_id)
    .execute(&mut *tx)
    .await?;

    let audit = AuditRecord {
        repo_id,
        validation_type: ACTIVITY_VALIDATION.to_string(),
        status_code: None,
        result: status.is_active,
        details: serde_json::json!({ "is_active": status.is_active, "reason": status.reason })
            .to_string(),
    };
    insert_audit(&mut tx, &audit, run_id, now).await?;

    tx.commit().await?;
    Ok(())
}

/// Loads one repository row.
pub async fn get_repository(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<RepositoryRecord>, DatabaseError> {
    let record = sqlx::query_as::<_, RepositoryRecord>(
        "SELECT id, host, repo_name, owner, full_name, url, validation_status, validation_level,
                http_status, is_active, activity_reason, created_at_ms, updated_at_ms
         FROM repositories WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

/// Loads the audit rows of a repository, oldest first.
pub async fn get_validation_logs(
    pool: &SqlitePool,
    repo_id: i64,
) -> Result<Vec<ValidationLogRecord>, DatabaseError> {
    let rows = sqlx::query_as::<_, ValidationLogRecord>(
        "SELECT id, repo_id, validation_type, status_code, result, details, run_id, executed_at_ms
         FROM validation_logs WHERE repo_id = ? ORDER BY id",
    )
    .bind(repo_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
