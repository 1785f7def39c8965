//! SQLite persistence for repository records, audit rows and runs.
//!
//! The validation engine knows nothing about storage; the orchestration layer
//! reads targets from here and writes outcomes back.

pub mod migrations;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod runs;
#[cfg(test)]
pub(crate) mod test_helpers;

pub use migrations::run_migrations;
pub use models::{RepositoryRecord, ValidationLogRecord};
pub use pool::init_db_pool_with_path;
pub use repositories::{
    get_repository, get_validation_logs, insert_pending_repository, record_outcome,
    select_pending_targets, update_activity, ACTIVITY_VALIDATION,
};
pub use runs::{insert_run_metadata, update_run_stats, RunStats};
