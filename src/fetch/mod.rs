//! HTTP fetching for the validation engine.
//!
//! The engine talks to the network only through the [`Fetcher`] trait, so a
//! batch run can inject its own client (and tests can inject a double). The
//! production implementation is [`ReqwestFetcher`].

mod body;
mod client;
mod error;
mod redirects;
#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

pub use client::ReqwestFetcher;
pub use error::FetchError;

/// Redirects observed while following a URL to its final response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectTrace {
    /// URLs that answered with a redirect, in visiting order. Starts with the
    /// original URL when at least one redirect happened; empty otherwise.
    /// The final destination is not included.
    pub hops: Vec<String>,
    /// URL of the final (non-redirect) response
    pub final_url: String,
    /// Status of the final response
    pub final_status: u16,
}

/// The three HTTP operations the validation engine needs.
///
/// Implementations must carry their own timeouts. The engine adds a
/// per-target deadline on top but never waits on a call without one.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Sends a HEAD request without following redirects and returns the raw
    /// status code.
    async fn head_status(&self, url: &str) -> Result<u16, FetchError>;

    /// Sends GET requests, following redirects, and returns the hops visited
    /// before the final response.
    async fn redirect_chain(&self, url: &str) -> Result<RedirectTrace, FetchError>;

    /// Sends a GET request (following redirects) and returns the body text.
    async fn fetch_body(&self, url: &str) -> Result<String, FetchError>;
}
