//! Batch validation of pending repository records.
//!
//! [`validate_batch`] runs the engine over up to `limit` targets with bounded
//! concurrency and returns one outcome per started target, in input order.
//! A failing target never affects its neighbours and nothing is retried at
//! this level.

mod audit;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::config::{DEFAULT_BATCH_LIMIT, DEFAULT_MAX_CONCURRENCY};
use crate::error_handling::ErrorType;
use crate::initialization::init_semaphore;
use crate::validation::{ValidationEngine, ValidationResult, Verdict};

pub use audit::{AuditRecord, FULL_VALIDATION};

/// A pending repository record to validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationTarget {
    /// Repository record id
    pub id: i64,
    /// Repository URL
    pub url: String,
}

impl ValidationTarget {
    /// Creates a target for repository `id`.
    pub fn new(id: i64, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
        }
    }
}

/// Live counters for a running batch, read by the progress logger.
#[derive(Debug, Default)]
pub struct BatchProgress {
    /// Targets whose validation has started
    pub started: AtomicUsize,
    /// Targets validated as valid
    pub valid: AtomicUsize,
    /// Targets validated as invalid (including failed ones)
    pub invalid: AtomicUsize,
}

impl BatchProgress {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets that have finished.
    pub fn completed(&self) -> usize {
        self.valid.load(Ordering::SeqCst) + self.invalid.load(Ordering::SeqCst)
    }

    fn record(&self, verdict: Verdict) {
        match verdict {
            Verdict::Valid => self.valid.fetch_add(1, Ordering::SeqCst),
            Verdict::Invalid => self.invalid.fetch_add(1, Ordering::SeqCst),
        };
    }
}

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum number of targets taken from the input
    pub limit: usize,
    /// Maximum number of targets validated at the same time (minimum 1)
    pub max_concurrency: usize,
    /// Optional shared progress counters
    pub progress: Option<Arc<BatchProgress>>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_BATCH_LIMIT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            progress: None,
        }
    }
}

/// Validation outcome for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Target that was validated
    pub target: ValidationTarget,
    /// Engine result, partial when validation stopped early
    pub result: ValidationResult,
    /// Verdict derived from `result`
    pub verdict: Verdict,
    /// Number of passing levels (0-3)
    pub validation_level: u8,
    /// Row for the validation log
    pub audit: AuditRecord,
}

impl ValidationOutcome {
    /// Derives the verdict, level and audit record from an engine result.
    pub fn new(target: ValidationTarget, result: ValidationResult) -> Self {
        let audit = AuditRecord::full(target.id, &result);
        Self {
            verdict: result.verdict(),
            validation_level: result.validation_level(),
            audit,
            target,
            result,
        }
    }
}

/// Result of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Outcomes of all started targets, in input order
    pub outcomes: Vec<ValidationOutcome>,
    /// Targets not started because the batch was cancelled
    pub skipped: Vec<ValidationTarget>,
}

impl BatchReport {
    /// Outcomes with a `valid` verdict.
    pub fn valid_count(&self) -> usize {
        self.count_verdict(Verdict::Valid)
    }

    /// Outcomes with an `invalid` verdict.
    pub fn invalid_count(&self) -> usize {
        self.count_verdict(Verdict::Invalid)
    }

    /// Outcomes whose validation stopped on a transport failure or deadline.
    pub fn errored_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.error.is_some())
            .count()
    }

    fn count_verdict(&self, verdict: Verdict) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.verdict == verdict)
            .count()
    }
}

/// Validates up to `options.limit` targets.
///
/// Targets run on spawned tasks, at most `options.max_concurrency` at a time.
/// `cancel` is checked before each target starts: once it fires, targets
/// already running finish and the rest are returned in
/// [`BatchReport::skipped`]. A panicked validation task yields an invalid
/// outcome carrying the panic as its error.
pub async fn validate_batch(
    engine: &ValidationEngine,
    targets: Vec<ValidationTarget>,
    options: &BatchOptions,
    cancel: &CancellationToken,
) -> BatchReport {
    let semaphore = init_semaphore(options.max_concurrency);
    let mut tasks = FuturesUnordered::new();
    let mut skipped = Vec::new();
    let mut pending = targets.into_iter().take(options.limit).enumerate();

    for (index, target) in pending.by_ref() {
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            permit = Arc::clone(&semaphore).acquire_owned() => permit.ok(),
        };
        let Some(permit) = permit else {
            skipped.push(target);
            break;
        };

        if let Some(progress) = &options.progress {
            progress.started.fetch_add(1, Ordering::SeqCst);
        }

        let engine = engine.clone();
        let task_target = target.clone();
        let handle = tokio::spawn(async move {
            let _permit = permit;
            engine.validate(&task_target.url).await
        });
        tasks.push(async move { (index, target, handle.await) });
    }
    skipped.extend(pending.map(|(_, target)| target));

    if !skipped.is_empty() {
        log::warn!(
            "Batch cancelled: {} target(s) not started",
            skipped.len()
        );
    }

    let mut finished = Vec::new();
    while let Some((index, target, joined)) = tasks.next().await {
        let result = match joined {
            Ok(result) => result,
            Err(join_error) => {
                log::warn!("Validation task for {} failed: {join_error}", target.url);
                engine.stats().increment_error(ErrorType::ValidationTaskFailed);
                ValidationResult {
                    error: Some(format!("validation task failed: {join_error}")),
                    ..Default::default()
                }
            }
        };
        let outcome = ValidationOutcome::new(target, result);
        if let Some(progress) = &options.progress {
            progress.record(outcome.verdict);
        }
        finished.push((index, outcome));
    }

    finished.sort_by_key(|(index, _)| *index);
    BatchReport {
        outcomes: finished.into_iter().map(|(_, outcome)| outcome).collect(),
        skipped,
    }
}
