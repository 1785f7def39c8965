//! `reqwest`-backed [`Fetcher`] implementation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio_retry::RetryIf;

use crate::config::{
    HTTP_STATUS_TOO_MANY_REQUESTS, MAX_REDIRECT_HOPS, MAX_RESPONSE_BODY_SIZE, RETRY_MAX_ATTEMPTS,
};
use crate::error_handling::{get_retry_strategy, InfoType, ProcessingStats};

use super::body::read_body_capped;
use super::redirects::resolve_redirect_chain;
use super::{FetchError, Fetcher, RedirectTrace};

/// Fetcher backed by two shared `reqwest` clients.
///
/// - `client` follows redirects (used for the content check)
/// - `redirect_client` must have redirects disabled (used for the HEAD check
///   and for manual redirect-chain tracking)
///
/// Both clients are expected to carry request and connect timeouts; see
/// [`crate::initialization::init_fetcher`]. Cloning is cheap and clones share
/// the underlying connection pools.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Arc<reqwest::Client>,
    redirect_client: Arc<reqwest::Client>,
    max_redirect_hops: usize,
    max_body_bytes: usize,
    retry_attempts: usize,
    stats: Option<Arc<ProcessingStats>>,
}

impl ReqwestFetcher {
    /// Creates a fetcher from a redirect-following client and a
    /// redirect-disabled client.
    pub fn new(client: Arc<reqwest::Client>, redirect_client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            redirect_client,
            max_redirect_hops: MAX_REDIRECT_HOPS,
            max_body_bytes: MAX_RESPONSE_BODY_SIZE,
            retry_attempts: RETRY_MAX_ATTEMPTS,
            stats: None,
        }
    }

    /// Sets the number of attempts per request (minimum 1, i.e. no retry).
    pub fn with_retry_attempts(mut self, attempts: usize) -> Self {
        self.retry_attempts = attempts.max(1);
        self
    }

    /// Sets the maximum number of redirects followed when tracing a chain.
    pub fn with_max_redirect_hops(mut self, max_hops: usize) -> Self {
        self.max_redirect_hops = max_hops;
        self
    }

    /// Sets the maximum number of body bytes read for the content check.
    pub fn with_max_body_bytes(mut self, max_bytes: usize) -> Self {
        self.max_body_bytes = max_bytes;
        self
    }

    /// Records rate-limit retries in the given statistics.
    pub fn with_stats(mut self, stats: Arc<ProcessingStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    pub(crate) fn redirect_client(&self) -> &reqwest::Client {
        &self.redirect_client
    }

    /// Sends a request, retrying transient failures with exponential backoff.
    ///
    /// `build` is called once per attempt. A 429 response is retried while
    /// attempts remain; the last attempt returns it as a normal response so
    /// the caller still sees the status.
    pub(crate) async fn send_with_retry<F>(
        &self,
        url: &str,
        build: F,
    ) -> Result<reqwest::Response, FetchError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let max_attempts = self.retry_attempts.max(1);
        let attempt_count = AtomicUsize::new(0);

        RetryIf::start(
            get_retry_strategy(max_attempts),
            || {
                let attempt = attempt_count.fetch_add(1, Ordering::SeqCst) + 1;
                let request = build();
                async move {
                    let response = request.send().await?;
                    if response.status().as_u16() == HTTP_STATUS_TOO_MANY_REQUESTS
                        && attempt < max_attempts
                    {
                        return Err(FetchError::RateLimited {
                            url: url.to_string(),
                        });
                    }
                    Ok(response)
                }
            },
            |error: &FetchError| {
                let retriable = error.is_retriable();
                if retriable {
                    log::debug!("Retrying request to {url} after: {error}");
                    if let (FetchError::RateLimited { .. }, Some(stats)) = (error, &self.stats) {
                        stats.increment_info(InfoType::RateLimitRetry);
                    }
                }
                retriable
            },
        )
        .await
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn head_status(&self, url: &str) -> Result<u16, FetchError> {
        let response = self
            .send_with_retry(url, || self.redirect_client.head(url))
            .await?;
        Ok(response.status().as_u16())
    }

    async fn redirect_chain(&self, url: &str) -> Result<RedirectTrace, FetchError> {
        resolve_redirect_chain(self, url, self.max_redirect_hops).await
    }

    async fn fetch_body(&self, url: &str) -> Result<String, FetchError> {
        let response = self.send_with_retry(url, || self.client.get(url)).await?;
        read_body_capped(response, self.max_body_bytes).await
    }
}
