//! HTTP redirect chain resolution.
//!
//! Redirects are followed by hand with a redirect-disabled client so every
//! intermediate URL can be recorded.

use reqwest::Url;

use super::client::ReqwestFetcher;
use super::{FetchError, RedirectTrace};

/// Whether the status code is a redirect that carries a `Location`.
pub(crate) fn is_redirect_status(status_code: u16) -> bool {
    matches!(status_code, 301 | 302 | 303 | 307 | 308)
}

/// Resolves the redirect chain for a URL, following up to `max_hops` redirects.
///
/// # Returns
///
/// A [`RedirectTrace`] whose `hops` lists every URL that answered with a
/// redirect (the original URL first), and the final URL and status.
///
/// # Errors
///
/// Returns an error if a request fails, a `Location` header cannot be
/// resolved, or the chain exceeds `max_hops` redirects.
pub(crate) async fn resolve_redirect_chain(
    fetcher: &ReqwestFetcher,
    start_url: &str,
    max_hops: usize,
) -> Result<RedirectTrace, FetchError> {
    let mut current = Url::parse(start_url).map_err(|source| FetchError::InvalidUrl {
        url: start_url.to_string(),
        source,
    })?;
    let mut hops: Vec<String> = Vec::new();

    loop {
        let resp = fetcher
            .send_with_retry(current.as_str(), || {
                fetcher.redirect_client().get(current.clone())
            })
            .await?;

        let status_code = resp.status().as_u16();
        if !is_redirect_status(status_code) {
            return Ok(RedirectTrace {
                hops,
                final_url: current.to_string(),
                final_status: status_code,
            });
        }

        let Some(loc) = resp.headers().get(reqwest::header::LOCATION) else {
            // Redirect status without a Location: nothing to follow, treat as final
            log::warn!(
                "Redirect status {} for {} but no Location header",
                status_code,
                current
            );
            return Ok(RedirectTrace {
                hops,
                final_url: current.to_string(),
                final_status: status_code,
            });
        };

        let invalid_location = || FetchError::InvalidRedirect {
            from: current.to_string(),
            location: String::from_utf8_lossy(loc.as_bytes()).into_owned(),
        };
        let location = loc.to_str().map_err(|_| invalid_location())?;
        let next = current.join(location).map_err(|_| invalid_location())?;

        if hops.len() >= max_hops {
            return Err(FetchError::TooManyRedirects {
                url: start_url.to_string(),
                max_hops,
            });
        }

        log::debug!("Redirect {} -> {} ({})", current, next, status_code);
        hops.push(current.to_string());
        current = next;
    }
}
