//! Error type definitions.
//!
//! This module defines the initialization and database errors plus the
//! error and info categories counted during a validation run.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// A configured header value cannot be sent (e.g. a token with newlines).
    #[error("Invalid header value for {0}")]
    InvalidHeaderError(&'static str),
}

/// Error types for database operations.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Schema migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// Types of errors that can abort a validation pipeline.
///
/// Each variant is a transport-level failure; soft-404 pages and bad
/// redirect hops are not errors and are counted as [`InfoType`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Request could not be built
    HttpRequestBuilderError,
    /// Redirect policy violation inside reqwest
    HttpRequestRedirectError,
    /// Request exceeded the per-request timeout
    HttpRequestTimeoutError,
    /// TCP or TLS connection failed
    HttpRequestConnectError,
    /// Request could not be sent
    HttpRequestRequestError,
    /// Response body could not be read
    HttpRequestBodyError,
    /// Response body could not be decoded
    HttpRequestDecodeError,
    /// Any other transport failure, including a 429 that exhausted retries
    HttpRequestOtherError,
    /// Redirect chain longer than the hop limit
    TooManyRedirects,
    /// Redirect `Location` header that cannot be resolved
    InvalidRedirectLocation,
    /// Target URL that cannot be parsed
    InvalidUrl,
    /// Whole-target deadline exhausted
    TargetDeadlineExceeded,
    /// Validation task panicked or was aborted
    ValidationTaskFailed,
}

/// Types of informational metrics recorded during validation.
///
/// These track the conditions the engine exists to detect. They are not
/// failures of the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// HEAD returned something other than 200
    NonOkStatus,
    /// A redirect hop contained "404"
    NotFoundRedirectHop,
    /// The body contained at least one not-found marker
    SoftNotFoundContent,
    /// A request was retried after HTTP 429
    RateLimitRetry,
    /// All three levels passed
    ValidRepository,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Human-readable label used in the end-of-run statistics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::TooManyRedirects => "Too many redirects",
            ErrorType::InvalidRedirectLocation => "Invalid redirect location",
            ErrorType::InvalidUrl => "Invalid URL",
            ErrorType::TargetDeadlineExceeded => "Target validation deadline exceeded",
            ErrorType::ValidationTaskFailed => "Validation task failed",
        }
    }
}

impl std::fmt::Display for InfoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InfoType {
    /// Human-readable label used in the end-of-run statistics.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::NonOkStatus => "Non-200 status on HEAD",
            InfoType::NotFoundRedirectHop => "Redirect chain through a 404 hop",
            InfoType::SoftNotFoundContent => "Not-found markers in page content",
            InfoType::RateLimitRetry => "Retried after HTTP 429",
            InfoType::ValidRepository => "Valid repository",
        }
    }
}
