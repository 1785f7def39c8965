//! Three-level repository validation engine.
//!
//! For one URL the engine runs, strictly in order:
//! 1. **Existence**: HEAD without following redirects; passes on 200
//! 2. **Redirect sanity**: GET following redirects; fails if any hop contains "404"
//! 3. **Content**: a fresh GET of the original URL; fails if the body contains
//!    any not-found marker
//!
//! A failed level does not stop the pipeline. A failed *request* does: the
//! remaining levels stay `false`, `error` is set and the partial result is
//! returned. [`ValidationEngine::validate`] never returns an error.

mod markers;
mod result;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::config::{HTTP_STATUS_OK, TARGET_VALIDATION_TIMEOUT};
use crate::error_handling::{categorize_fetch_error, ErrorType, InfoType, ProcessingStats};
use crate::fetch::{FetchError, Fetcher};
use crate::utils::sanitize::sanitize_and_truncate_error_message;

pub use markers::{chain_has_not_found_hop, count_not_found_markers, NOT_FOUND_MARKERS};
pub use result::{ValidationResult, Verdict};

/// Reason a validation pipeline stopped early.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// An HTTP call failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The per-target wall-clock budget ran out.
    #[error("validation deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

impl ValidationError {
    /// Statistics category for this failure.
    pub fn error_type(&self) -> ErrorType {
        match self {
            ValidationError::Fetch(err) => categorize_fetch_error(err),
            ValidationError::DeadlineExceeded(_) => ErrorType::TargetDeadlineExceeded,
        }
    }
}

/// Runs the three-level check against an injected [`Fetcher`].
///
/// Cloning is cheap; clones share the fetcher and the statistics.
#[derive(Clone)]
pub struct ValidationEngine {
    fetcher: Arc<dyn Fetcher>,
    target_timeout: Duration,
    stats: Arc<ProcessingStats>,
}

impl ValidationEngine {
    /// Creates an engine with the default per-target deadline and fresh statistics.
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            target_timeout: TARGET_VALIDATION_TIMEOUT,
            stats: Arc::new(ProcessingStats::new()),
        }
    }

    /// Sets the wall-clock budget for all three checks of one URL.
    pub fn with_target_timeout(mut self, timeout: Duration) -> Self {
        self.target_timeout = timeout;
        self
    }

    /// Records errors and info metrics in shared statistics.
    pub fn with_stats(mut self, stats: Arc<ProcessingStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Statistics recorded by this engine.
    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Validates one repository URL.
    ///
    /// Transport failures and the per-target deadline are folded into the
    /// returned result's `error` field.
    pub async fn validate(&self, url: &str) -> ValidationResult {
        let deadline = Instant::now() + self.target_timeout;
        let mut result = ValidationResult::default();

        if let Err(err) = self.run_levels(url, deadline, &mut result).await {
            self.stats.increment_error(err.error_type());
            log::warn!("Validation of {url} stopped early: {err}");
            result.error = Some(sanitize_and_truncate_error_message(&err.to_string()));
            return result;
        }

        if result.is_valid() {
            self.stats.increment_info(InfoType::ValidRepository);
        }
        log::debug!(
            "Validated {url}: level {} (status {:?}, {} hops, {} markers)",
            result.validation_level(),
            result.http_status,
            result.redirect_chain.len(),
            result.content_check
        );
        result
    }

    async fn run_levels(
        &self,
        url: &str,
        deadline: Instant,
        result: &mut ValidationResult,
    ) -> Result<(), ValidationError> {
        let status = self.within(deadline, self.fetcher.head_status(url)).await?;
        result.http_status = Some(status);
        result.level1 = status == HTTP_STATUS_OK;
        if !result.level1 {
            self.stats.increment_info(InfoType::NonOkStatus);
        }

        let trace = self
            .within(deadline, self.fetcher.redirect_chain(url))
            .await?;
        result.level2 = !chain_has_not_found_hop(&trace.hops);
        result.redirect_chain = trace.hops;
        if !result.level2 {
            self.stats.increment_info(InfoType::NotFoundRedirectHop);
        }

        let body = self.within(deadline, self.fetcher.fetch_body(url)).await?;
        result.content_check = count_not_found_markers(&body);
        result.level3 = result.content_check == 0;
        if !result.level3 {
            self.stats.increment_info(InfoType::SoftNotFoundContent);
        }

        Ok(())
    }

    async fn within<T, F>(&self, deadline: Instant, call: F) -> Result<T, ValidationError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        match tokio::time::timeout_at(deadline, call).await {
            Ok(outcome) => Ok(outcome?),
            Err(_) => Err(ValidationError::DeadlineExceeded(self.target_timeout)),
        }
    }
}
