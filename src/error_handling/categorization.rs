//! Error categorization and retry strategy.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::ErrorType;
use crate::fetch::FetchError;

/// Creates an exponential backoff retry strategy for `max_attempts` total attempts.
///
/// The iterator yields one delay per retry (so `max_attempts - 1` items):
/// `RETRY_INITIAL_DELAY_MS`, then doubling, capped at `RETRY_MAX_DELAY_SECS`.
/// `ExponentialBackoff` raises its base to the attempt number and multiplies by
/// `factor`, so base 2 with factor `initial / 2` gives 500ms, 1s, 2s, ...
pub fn get_retry_strategy(max_attempts: usize) -> impl Iterator<Item = Duration> {
    let base = crate::config::RETRY_FACTOR;
    ExponentialBackoff::from_millis(base)
        .factor(crate::config::RETRY_INITIAL_DELAY_MS / base)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(max_attempts.saturating_sub(1))
}

/// Categorizes a `reqwest::Error` into an `ErrorType`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Categorizes a [`FetchError`] into an `ErrorType`.
///
/// A `RateLimited` error only escapes the fetcher when retries were cut short,
/// so it is counted with the other transport failures.
pub fn categorize_fetch_error(error: &FetchError) -> ErrorType {
    match error {
        FetchError::Request(err) => categorize_reqwest_error(err),
        FetchError::InvalidUrl { .. } => ErrorType::InvalidUrl,
        FetchError::InvalidRedirect { .. } => ErrorType::InvalidRedirectLocation,
        FetchError::TooManyRedirects { .. } => ErrorType::TooManyRedirects,
        FetchError::RateLimited { .. } => ErrorType::HttpRequestOtherError,
    }
}
