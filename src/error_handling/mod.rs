//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions and categorization
//! - Processing statistics tracking (engine errors and info metrics)
//! - Retry strategy configuration
//!
//! Counters are split into:
//! - **Errors**: Failures that stopped a check from completing
//! - **Info**: Per-run metrics (non-200 HEADs, soft-404 pages, 429 retries)

mod categorization;
mod stats;
mod types;

pub use categorization::{categorize_fetch_error, get_retry_strategy};
pub use stats::ProcessingStats;
pub use types::{DatabaseError, ErrorType, InfoType, InitializationError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::TargetDeadlineExceeded);
        assert_eq!(stats.get_error_count(ErrorType::TargetDeadlineExceeded), 1);

        stats.increment_info(InfoType::SoftNotFoundContent);
        assert_eq!(stats.get_info_count(InfoType::SoftNotFoundContent), 1);
    }

    #[test]
    fn test_processing_stats_multiple_increments() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::HttpRequestConnectError);
        stats.increment_error(ErrorType::HttpRequestConnectError);
        stats.increment_error(ErrorType::HttpRequestConnectError);
        assert_eq!(stats.get_error_count(ErrorType::HttpRequestConnectError), 3);
    }

    #[test]
    fn test_processing_stats_totals() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::TooManyRedirects);
        stats.increment_error(ErrorType::HttpRequestTimeoutError);
        stats.increment_info(InfoType::NonOkStatus);

        assert_eq!(stats.total_errors(), 2);
        assert_eq!(stats.total_info(), 1);
    }

    #[test]
    fn test_processing_stats_shared_across_tasks() {
        let stats = std::sync::Arc::new(ProcessingStats::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let stats = std::sync::Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        stats.increment_info(InfoType::ValidRepository);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread should finish");
        }
        assert_eq!(stats.get_info_count(InfoType::ValidRepository), 100);
    }
}
