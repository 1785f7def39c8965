//! Row types read back from the database.

use serde::Serialize;

/// A row of the `repositories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct RepositoryRecord {
    /// Primary key
    pub id: i64,
    /// Host serving the repository, when the URL named one
    pub host: Option<String>,
    /// Repository name, when the URL named one
    pub repo_name: Option<String>,
    /// Owning account, when the URL named one
    pub owner: Option<String>,
    /// `owner/name`
    pub full_name: Option<String>,
    /// Normalized repository URL
    pub url: String,
    /// `pending`, `valid` or `invalid`
    pub validation_status: String,
    /// Number of passed checks (0-3) from the last validation
    pub validation_level: i64,
    /// Status returned by the existence check
    pub http_status: Option<i64>,
    /// Activity verdict; `None` until an activity check ran
    pub is_active: Option<bool>,
    /// Explanation of the activity verdict
    pub activity_reason: Option<String>,
    /// Insertion time (Unix milliseconds)
    pub created_at_ms: i64,
    /// Last update time (Unix milliseconds)
    pub updated_at_ms: i64,
}

/// A row of the `validation_logs` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ValidationLogRecord {
    /// Primary key
    pub id: i64,
    /// Repository the check ran for
    pub repo_id: i64,
    /// `full` or `activity`
    pub validation_type: String,
    /// HTTP status observed, if any
    pub status_code: Option<i64>,
    /// Whether the check passed
    pub result: bool,
    /// Check details as JSON
    pub details: String,
    /// Run that produced the row
    pub run_id: Option<String>,
    /// Execution time (Unix milliseconds)
    pub executed_at_ms: i64,
}
