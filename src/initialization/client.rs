//! HTTP client initialization.
//!
//! A batch run builds its clients once, shares them across all targets through
//! `Arc`, and drops them when the run ends.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::ClientBuilder;

use crate::config::{Config, API_ACCEPT_HEADER, MAX_REDIRECT_HOPS, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::{InitializationError, ProcessingStats};
use crate::fetch::ReqwestFetcher;

fn base_builder(config: &Config) -> ClientBuilder {
    ClientBuilder::new()
        .timeout(config.request_timeout())
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .user_agent(config.user_agent.clone())
}

/// Initializes the redirect-following client used for content checks.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = base_builder(config)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes a client with redirects disabled.
///
/// Used for the HEAD existence check and for manual redirect-chain tracking,
/// so every intermediate URL can be captured.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_redirect_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = base_builder(config)
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the metadata API client.
///
/// Every request carries `Accept: application/vnd.github.v3+json` and, when a
/// token is configured, `Authorization: token <token>` (marked sensitive so
/// it never shows up in debug output).
///
/// # Errors
///
/// Returns `InitializationError::InvalidHeaderError` if the token is not a
/// valid header value, or `HttpClientError` if client creation fails.
pub fn init_api_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(API_ACCEPT_HEADER));
    if let Some(token) = &config.github_token {
        let mut value = HeaderValue::from_str(&format!("token {}", token.trim()))
            .map_err(|_| InitializationError::InvalidHeaderError("Authorization"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    } else {
        log::debug!("No API token configured; metadata requests are unauthenticated");
    }

    let client = base_builder(config)
        .default_headers(headers)
        .build()?;
    Ok(Arc::new(client))
}

/// Builds the batch-scoped [`ReqwestFetcher`] from both validation clients.
///
/// # Errors
///
/// Returns an error if either client cannot be created.
pub fn init_fetcher(
    config: &Config,
    stats: Arc<ProcessingStats>,
) -> Result<ReqwestFetcher, InitializationError> {
    Ok(
        ReqwestFetcher::new(init_client(config)?, init_redirect_client(config)?)
            .with_retry_attempts(config.retry_attempts)
            .with_stats(stats),
    )
}
