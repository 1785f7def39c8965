//! Orchestration of a validation run against the database.
//!
//! [`run_validation`] is the library entry point behind `repo_validator validate`:
//! 1. Open the database and apply migrations
//! 2. Select pending repositories
//! 3. Build the run-scoped HTTP clients and the engine
//! 4. Wire Ctrl-C to the batch cancellation token
//! 5. Validate the batch, persisting each outcome and its audit row
//! 6. Optionally check activity of the valid repositories
//! 7. Record run statistics

mod check;
mod import;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};
use serde::Serialize;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;

use crate::activity::ActivityChecker;
use crate::app::{log_progress, print_error_statistics, print_run_summary, shutdown_gracefully};
use crate::batch::{validate_batch, BatchOptions, BatchProgress, ValidationOutcome};
use crate::config::{Config, LOGGING_INTERVAL_SECS};
use crate::error_handling::ProcessingStats;
use crate::initialization::{init_api_client, init_fetcher};
use crate::repo_ref::RepoRef;
use crate::storage::{
    init_db_pool_with_path, insert_run_metadata, record_outcome, run_migrations,
    select_pending_targets, update_activity, update_run_stats, RunStats,
};
use crate::validation::{ValidationEngine, Verdict};

pub use check::{check_repository_activity, check_url, CheckReport};
pub use import::{import_urls, import_urls_from_reader, ImportReport};

/// Summary of a finished validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Run identifier (format: `run_<timestamp_millis>`)
    pub run_id: String,
    /// Pending repositories selected for this run
    pub total_targets: usize,
    /// Outcomes with a `valid` verdict
    pub valid: usize,
    /// Outcomes with an `invalid` verdict
    pub invalid: usize,
    /// Outcomes whose validation stopped on a transport failure or deadline
    pub errored: usize,
    /// Targets not started because the run was interrupted
    pub skipped: usize,
    /// Repositories whose activity was checked
    pub activity_checked: usize,
    /// Checked repositories found active
    pub active: usize,
    /// Path to the SQLite database
    pub db_path: PathBuf,
    /// Wall-clock duration of the run
    pub elapsed_seconds: f64,
    /// Per-target outcomes, in selection order
    pub outcomes: Vec<ValidationOutcome>,
}

/// Validates pending repositories stored in `config.db_path`.
///
/// Ctrl-C stops new validations from starting; validations already running
/// finish and are persisted, the rest stay `pending`.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or written, or if the
/// HTTP clients cannot be built. Individual validation failures are not
/// errors; they are stored as `invalid` outcomes.
///
/// # Example
///
/// ```no_run
/// use repo_validator::{run_validation, Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let report = run_validation(Config { limit: 25, ..Default::default() }).await?;
/// println!("{} valid, {} invalid", report.valid, report.invalid);
/// # Ok(())
/// # }
/// ```
pub async fn run_validation(config: Config) -> Result<ValidationReport> {
    let pool = init_db_pool_with_path(&config.db_path)
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let cancel = CancellationToken::new();
    let signal_task = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received; waiting for running validations to finish");
                cancel.cancel();
            }
        })
    };

    let report = run_validation_with_pool(&config, &pool, &cancel).await;
    signal_task.abort();

    if let Err(e) = sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
        .execute(pool.as_ref())
        .await
    {
        warn!("Failed to checkpoint WAL file (this is non-critical): {e}");
    }

    report
}

/// Runs steps 2-7 of a validation run on an already migrated pool.
pub async fn run_validation_with_pool(
    config: &Config,
    pool: &SqlitePool,
    cancel: &CancellationToken,
) -> Result<ValidationReport> {
    let targets = select_pending_targets(pool, config.limit)
        .await
        .context("Failed to select pending repositories")?;
    let total_targets = targets.len();
    info!("Selected {total_targets} pending repositories (limit {})", config.limit);

    let start_time_ms = Utc::now().timestamp_millis();
    let run_id = format!("run_{start_time_ms}");
    insert_run_metadata(pool, &run_id, start_time_ms, env!("CARGO_PKG_VERSION"))
        .await
        .context("Failed to insert run metadata")?;
    info!("Starting run: {run_id}");

    let stats = Arc::new(ProcessingStats::new());
    let fetcher =
        init_fetcher(config, Arc::clone(&stats)).context("Failed to initialize HTTP clients")?;
    let engine = ValidationEngine::new(Arc::new(fetcher))
        .with_target_timeout(config.target_timeout())
        .with_stats(Arc::clone(&stats));

    let start_time = Instant::now();
    let progress = Arc::new(BatchProgress::new());
    let log_cancel = CancellationToken::new();
    let logging_task = {
        let progress = Arc::clone(&progress);
        let log_cancel = log_cancel.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL_SECS));
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = interval.tick() => log_progress(start_time, total_targets, &progress),
                    _ = log_cancel.cancelled() => break,
                }
            }
        })
    };

    let options = BatchOptions {
        limit: config.limit,
        max_concurrency: config.max_concurrency,
        progress: Some(Arc::clone(&progress)),
    };
    let batch = validate_batch(&engine, targets, &options, cancel).await;
    shutdown_gracefully(log_cancel, Some(logging_task)).await;
    log_progress(start_time, total_targets, &progress);

    for outcome in &batch.outcomes {
        record_outcome(pool, outcome, Some(&run_id))
            .await
            .with_context(|| format!("Failed to store outcome for {}", outcome.target.url))?;
    }

    let (activity_checked, active) = if config.check_activity && !cancel.is_cancelled() {
        check_batch_activity(config, pool, &batch.outcomes, &run_id, cancel).await?
    } else {
        (0, 0)
    };

    let elapsed_seconds = start_time.elapsed().as_secs_f64();
    let report = ValidationReport {
        run_id,
        total_targets,
        valid: batch.valid_count(),
        invalid: batch.invalid_count(),
        errored: batch.errored_count(),
        skipped: batch.skipped.len(),
        activity_checked,
        active,
        db_path: config.db_path.clone(),
        elapsed_seconds,
        outcomes: batch.outcomes,
    };

    update_run_stats(
        pool,
        &RunStats {
            run_id: &report.run_id,
            total_targets: report.total_targets,
            valid_count: report.valid,
            invalid_count: report.invalid,
            errored_count: report.errored,
            skipped_count: report.skipped,
            elapsed_seconds,
        },
    )
    .await
    .context("Failed to update run statistics")?;

    print_error_statistics(&stats);
    print_run_summary(
        report.total_targets,
        report.valid,
        report.invalid,
        report.skipped,
        elapsed_seconds,
    );

    Ok(report)
}

/// Checks activity of every valid outcome hosted on `config.repo_host`.
///
/// Stops before the next request once `cancel` fires. Returns
/// `(checked, active)`.
async fn check_batch_activity(
    config: &Config,
    pool: &SqlitePool,
    outcomes: &[ValidationOutcome],
    run_id: &str,
    cancel: &CancellationToken,
) -> Result<(usize, usize)> {
    let client = init_api_client(config).context("Failed to initialize API client")?;
    let checker = ActivityChecker::new(client, config.api_base_url.clone());

    let mut checked = 0;
    let mut active = 0;
    for outcome in outcomes.iter().filter(|o| o.verdict == Verdict::Valid) {
        if cancel.is_cancelled() {
            warn!("Activity checks interrupted after {checked} repositories");
            break;
        }
        let repo = match RepoRef::from_url(&outcome.target.url) {
            Ok(repo) => repo,
            Err(e) => {
                log::debug!("Skipping activity check: {e}");
                continue;
            }
        };
        if !repo.is_on_host(&config.repo_host) {
            log::debug!(
                "Skipping activity check for {}: host {} is not {}",
                outcome.target.url,
                repo.host,
                config.repo_host
            );
            continue;
        }
        let status = checker.check_activity(&repo.owner, &repo.name).await;
        info!("{repo}: {}", status.reason);
        update_activity(pool, outcome.target.id, &status, Some(run_id))
            .await
            .with_context(|| format!("Failed to store activity for {repo}"))?;
        checked += 1;
        if status.is_active {
            active += 1;
        }
    }
    Ok((checked, active))
}
