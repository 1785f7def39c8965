//! One-off checks that do not touch the database.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::activity::{ActivityChecker, ActivityStatus};
use crate::config::Config;
use crate::error_handling::ProcessingStats;
use crate::initialization::{init_api_client, init_fetcher};
use crate::validation::{ValidationEngine, ValidationResult, Verdict};

/// Result of validating a single URL.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Normalized URL that was validated
    pub url: String,
    /// `valid` when all three checks passed
    pub verdict: Verdict,
    /// Number of passing checks (0-3)
    pub validation_level: u8,
    /// Full engine result
    pub result: ValidationResult,
}

/// Runs the three-level validation for one URL.
///
/// # Errors
///
/// Returns an error only if the HTTP clients cannot be built.
pub async fn check_url(config: &Config, url: &str) -> Result<CheckReport> {
    let stats = Arc::new(ProcessingStats::new());
    let fetcher =
        init_fetcher(config, Arc::clone(&stats)).context("Failed to initialize HTTP clients")?;
    let engine = ValidationEngine::new(Arc::new(fetcher))
        .with_target_timeout(config.target_timeout())
        .with_stats(stats);

    let result = engine.validate(url).await;
    Ok(CheckReport {
        url: url.to_string(),
        verdict: result.verdict(),
        validation_level: result.validation_level(),
        result,
    })
}

/// Checks activity of `owner/repo` through the metadata API.
///
/// # Errors
///
/// Returns an error only if the API client cannot be built.
pub async fn check_repository_activity(
    config: &Config,
    owner: &str,
    repo: &str,
) -> Result<ActivityStatus> {
    let client = init_api_client(config).context("Failed to initialize API client")?;
    let checker = ActivityChecker::new(client, config.api_base_url.clone());
    Ok(checker.check_activity(owner, repo).await)
}
