//! Audit records for the validation log.

use serde::{Deserialize, Serialize};

use crate::validation::ValidationResult;

/// Check type recorded for a three-level validation.
pub const FULL_VALIDATION: &str = "full";

/// One `validation_logs` row: what was checked and what came back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Repository record id
    pub repo_id: i64,
    /// Check type; always [`FULL_VALIDATION`] for batch runs
    pub validation_type: String,
    /// HEAD status, if the existence check got a response
    pub status_code: Option<u16>,
    /// Overall verdict (`true` = valid)
    pub result: bool,
    /// The full [`ValidationResult`] as JSON
    pub details: String,
}

impl AuditRecord {
    /// Builds the audit row for a full validation of `repo_id`.
    pub fn full(repo_id: i64, result: &ValidationResult) -> Self {
        let details = serde_json::to_string(result).unwrap_or_else(|e| {
            log::warn!("Failed to serialize validation result for repo {repo_id}: {e}");
            String::from("{}")
        });
        Self {
            repo_id,
            validation_type: FULL_VALIDATION.to_string(),
            status_code: result.http_status,
            result: result.is_valid(),
            details,
        }
    }
}
