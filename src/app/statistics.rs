//! End-of-run statistics output.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};

/// Prints a one-line summary of a finished batch run.
pub fn print_run_summary(total: usize, valid: usize, invalid: usize, skipped: usize, elapsed_seconds: f64) {
    info!(
        "✅ Validated {} repositor{} ({} valid, {} invalid, {} skipped) in {:.1}s",
        total,
        if total == 1 { "y" } else { "ies" },
        valid,
        invalid,
        skipped,
        elapsed_seconds
    );
}

/// Prints error and info counters to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    for line in statistics_lines(error_stats) {
        info!("{line}");
    }
}

/// Formats the non-zero counters, grouped under an error and an info header.
fn statistics_lines(error_stats: &ProcessingStats) -> Vec<String> {
    let mut lines = Vec::new();

    let total_errors = error_stats.total_errors();
    if total_errors > 0 {
        lines.push(format!("Error Counts ({total_errors} total):"));
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                lines.push(format!("   {}: {}", error_type.as_str(), count));
            }
        }
    }

    let total_info = error_stats.total_info();
    if total_info > 0 {
        lines.push(format!("Info Counts ({total_info} total):"));
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                lines.push(format!("   {}: {}", info_type.as_str(), count));
            }
        }
    }

    lines
}
