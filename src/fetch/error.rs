//! Fetch error type.

use thiserror::Error;

/// Failure of a single HTTP operation issued by a [`super::Fetcher`].
///
/// Every variant describes a transport-level problem. A 404 or a soft-404
/// page is not a `FetchError`; those come back as ordinary responses.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or its response could not be read
    /// (connection refused, timeout, TLS failure, body read error).
    #[error("{}", describe_reqwest_error(.0))]
    Request(#[from] reqwest::Error),

    /// The URL to fetch is not a valid absolute URL.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Parse failure
        #[source]
        source: url::ParseError,
    },

    /// A redirect response carried a `Location` header that cannot be resolved.
    #[error("redirect from {from} has an unusable Location header {location:?}")]
    InvalidRedirect {
        /// URL that answered with the redirect
        from: String,
        /// Raw `Location` value
        location: String,
    },

    /// The redirect chain is longer than the configured hop limit.
    #[error("too many redirects (more than {max_hops}) starting at {url}")]
    TooManyRedirects {
        /// URL the chain started from
        url: String,
        /// Hop limit that was exceeded
        max_hops: usize,
    },

    /// The host answered HTTP 429 and another attempt is still allowed.
    #[error("rate limited (HTTP 429) by {url}")]
    RateLimited {
        /// URL that was rate limited
        url: String,
    },
}

impl FetchError {
    /// Whether another attempt of the same request might succeed.
    ///
    /// Timeouts, connection failures and 429s are transient. Malformed URLs,
    /// redirect problems and body decode errors are permanent.
    pub fn is_retriable(&self) -> bool {
        match self {
            FetchError::Request(err) => {
                if err.is_redirect() || err.is_decode() || err.is_builder() {
                    return false;
                }
                err.is_timeout() || err.is_connect() || err.is_request()
            }
            FetchError::RateLimited { .. } => true,
            FetchError::InvalidUrl { .. }
            | FetchError::InvalidRedirect { .. }
            | FetchError::TooManyRedirects { .. } => false,
        }
    }
}

/// Renders a `reqwest::Error` with its whole cause chain.
///
/// reqwest's own `Display` stops at "error sending request for url (...)",
/// which hides the actual cause ("Connection refused", "operation timed out").
fn describe_reqwest_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
