//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, size limits, retry parameters and thresholds.

use std::time::Duration;

/// Default SQLite database path.
pub const DB_PATH: &str = "./repo_validator.db";

/// Default number of pending repositories validated per run.
pub const DEFAULT_BATCH_LIMIT: usize = 10;

/// Default number of targets validated concurrently.
///
/// 1 means the batch runs sequentially. Targets share no mutable state, so
/// raising it is safe; the cap protects the upstream host from bursts.
pub const DEFAULT_MAX_CONCURRENCY: usize = 1;

/// Progress logging interval in seconds during a batch run.
pub const LOGGING_INTERVAL_SECS: u64 = 5;

// Network operation timeouts
/// Per-request timeout in seconds (covers connect, send and body read)
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// Wall-clock budget for all three checks of a single target.
///
/// Formula: 3 requests x 10s + 5s buffer for retry backoff = 35s
pub const TARGET_VALIDATION_TIMEOUT: Duration = Duration::from_secs(35);

/// Default base URL of the repository metadata API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Host whose repositories the metadata API describes.
pub const DEFAULT_REPO_HOST: &str = "github.com";

/// `Accept` header sent to the metadata API.
pub const API_ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Environment variable holding the metadata API token.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Default User-Agent string for HTTP requests.
pub const DEFAULT_USER_AGENT: &str = concat!("repo_validator/", env!("CARGO_PKG_VERSION"));

// Response and body size limits
/// Maximum response body size in bytes scanned by the content check (2MB)
/// Bodies larger than this are truncated before marker scanning
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Maximum error message length in characters stored with a result
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;

// Redirect handling
/// Maximum number of redirect hops to follow
/// Prevents infinite redirect loops and excessive request chains
pub const MAX_REDIRECT_HOPS: usize = 10;

// Retry strategy
/// Initial delay in milliseconds before first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 5;
/// Maximum number of attempts per request (including the initial attempt)
pub const RETRY_MAX_ATTEMPTS: usize = 3;

// Activity
/// A repository whose last push is older than this many days is stale.
/// Exactly 730 days still counts as active.
pub const ACTIVITY_STALE_AFTER_DAYS: i64 = 730;
/// Timestamp format of `pushed_at` in repository metadata (UTC, no offset).
pub const PUSHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// HTTP 200 OK
pub const HTTP_STATUS_OK: u16 = 200;
/// HTTP 429 Too Many Requests
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;
