//! repo_validator library: three-level repository URL validation.
//!
//! The crate judges whether stored repository URLs still point at live,
//! non-deleted repositories, and whether those repositories are still
//! maintained.
//!
//! - [`ValidationEngine`] runs three checks per URL: an existence HEAD, a
//!   redirect-chain check and a soft-404 content scan
//! - [`ActivityChecker`] reads the last push date from the metadata API
//! - [`validate_batch`] runs the engine over a bounded batch with bounded
//!   concurrency and produces one audit record per target
//! - [`run_validation`] ties everything to a SQLite database
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use repo_validator::{initialization, Config, ProcessingStats, ValidationEngine};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::default();
//! let fetcher = initialization::init_fetcher(&config, Arc::new(ProcessingStats::new()))?;
//! let engine = ValidationEngine::new(Arc::new(fetcher));
//! let result = engine.validate("https://github.com/tokio-rs/tokio").await;
//! println!("level {} ({})", result.validation_level(), result.verdict());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod activity;
mod app;
pub mod batch;
pub mod config;
mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod repo_ref;
mod run;
pub mod storage;
mod utils;
pub mod validation;

pub use activity::{ActivityChecker, ActivityStatus};
pub use batch::{
    validate_batch, AuditRecord, BatchOptions, BatchReport, ValidationOutcome, ValidationTarget,
};
pub use config::{Cli, Command, Config, LogFormat, LogLevel};
pub use error_handling::{
    DatabaseError, ErrorType, InfoType, InitializationError, ProcessingStats,
};
pub use fetch::{FetchError, Fetcher, RedirectTrace, ReqwestFetcher};
pub use repo_ref::RepoRef;
pub use run::{
    check_repository_activity, check_url, import_urls, import_urls_from_reader, run_validation,
    run_validation_with_pool, CheckReport, ImportReport, ValidationReport,
};
pub use validation::{ValidationEngine, ValidationError, ValidationResult, Verdict};
