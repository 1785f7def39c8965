//! Progress logging utilities.

use log::info;
use std::sync::atomic::Ordering;
use std::time::Instant;

use crate::batch::BatchProgress;

/// Logs how many targets of a running batch have finished.
pub fn log_progress(start_time: Instant, total: usize, progress: &BatchProgress) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = progress.completed();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Validated {}/{} repositories ({} valid, {} invalid) in {:.2} seconds (~{:.2}/sec)",
        completed,
        total,
        progress.valid.load(Ordering::SeqCst),
        progress.invalid.load(Ordering::SeqCst),
        elapsed_secs,
        rate
    );
}
