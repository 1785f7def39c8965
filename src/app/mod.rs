//! Run-level helpers.
//!
//! This module provides URL normalization, progress logging, shutdown
//! handling and statistics printing used by the orchestration layer.

pub mod logging;
pub mod shutdown;
pub mod statistics;
pub mod url;

pub use logging::log_progress;
pub use shutdown::shutdown_gracefully;
pub use statistics::{print_error_statistics, print_run_summary};
pub use self::url::validate_and_normalize_url;
