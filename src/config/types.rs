//! Configuration types.
//!
//! This module defines the enums and the library-level [`Config`] struct. The
//! CLI in [`super::cli`] produces a `Config`, but it can also be built
//! programmatically.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DB_PATH, DEFAULT_API_BASE_URL, DEFAULT_BATCH_LIMIT, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_REPO_HOST, DEFAULT_USER_AGENT, HTTP_REQUEST_TIMEOUT_SECS, RETRY_MAX_ATTEMPTS,
    TARGET_VALIDATION_TIMEOUT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use repo_validator::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("repos.db"),
///     limit: 25,
///     max_concurrency: 4,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Maximum number of pending repositories validated in one run
    pub limit: usize,

    /// Maximum number of targets validated concurrently
    pub max_concurrency: usize,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Wall-clock budget in seconds for all checks of one target
    pub target_timeout_seconds: u64,

    /// Attempts per request for transient failures and 429 responses
    pub retry_attempts: usize,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Token for the repository metadata API
    pub github_token: Option<String>,

    /// Base URL of the repository metadata API
    pub api_base_url: String,

    /// Repository host the metadata API answers for; activity is only
    /// checked for repositories on this host
    pub repo_host: String,

    /// Run the activity check for every validated repository
    pub check_activity: bool,
}

impl Config {
    /// Per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Per-target deadline as a `Duration`.
    pub fn target_timeout(&self) -> Duration {
        Duration::from_secs(self.target_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            db_path: PathBuf::from(DB_PATH),
            limit: DEFAULT_BATCH_LIMIT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: HTTP_REQUEST_TIMEOUT_SECS,
            target_timeout_seconds: TARGET_VALIDATION_TIMEOUT.as_secs(),
            retry_attempts: RETRY_MAX_ATTEMPTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            github_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            repo_host: DEFAULT_REPO_HOST.to_string(),
            check_activity: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_log_level_ordering() {
        let error = log::LevelFilter::from(LogLevel::Error);
        let warn = log::LevelFilter::from(LogLevel::Warn);
        let info = log::LevelFilter::from(LogLevel::Info);
        let debug = log::LevelFilter::from(LogLevel::Debug);
        let trace = log::LevelFilter::from(LogLevel::Trace);

        assert!(error < warn);
        assert!(warn < info);
        assert!(info < debug);
        assert!(debug < trace);
    }

    #[test]
    fn test_log_format_debug() {
        assert_eq!(format!("{:?}", LogFormat::Plain), "Plain");
        assert_eq!(format!("{:?}", LogFormat::Json), "Json");
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.limit, 10);
        assert_eq!(config.max_concurrency, 1);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.target_timeout_seconds, 35);
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.api_base_url, "https://api.github.com");
        assert_eq!(config.repo_host, "github.com");
        assert!(config.github_token.is_none());
        assert!(!config.check_activity);
        assert_eq!(config.db_path, PathBuf::from("./repo_validator.db"));
        assert!(config.user_agent.starts_with("repo_validator/"));
    }

    #[test]
    fn test_config_durations() {
        let config = Config {
            timeout_seconds: 3,
            target_timeout_seconds: 12,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.target_timeout(), Duration::from_secs(12));
    }
}
