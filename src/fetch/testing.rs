//! Scripted [`Fetcher`] for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{FetchError, Fetcher, RedirectTrace};

/// Scripted response for one URL.
#[derive(Clone, Default)]
pub(crate) struct Script {
    pub head: Option<u16>,
    pub hops: Vec<String>,
    pub body: Option<String>,
    pub fail_head: bool,
    pub fail_chain: bool,
    pub fail_body: bool,
    pub delay: Option<Duration>,
}

impl Script {
    /// A healthy repository page: 200, no redirects, plain body.
    pub fn healthy() -> Self {
        Self {
            head: Some(200),
            body: Some("<html><body>Repository</body></html>".to_string()),
            ..Default::default()
        }
    }
}

/// Fetcher that answers from per-URL scripts and counts calls.
///
/// Unknown URLs fail every operation. Failures are reported as
/// [`FetchError::InvalidRedirect`] since it needs no live `reqwest::Error`.
#[derive(Default)]
pub(crate) struct ScriptedFetcher {
    scripts: HashMap<String, Script>,
    pub head_calls: AtomicUsize,
    pub chain_calls: AtomicUsize,
    pub body_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    order: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, script: Script) -> Self {
        self.scripts.insert(url.to_string(), script);
        self
    }

    /// Highest number of concurrent HEAD calls observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// URLs in the order their HEAD call started.
    pub fn started_order(&self) -> Vec<String> {
        self.order.lock().map(|order| order.clone()).unwrap_or_default()
    }

    fn script(&self, url: &str) -> Result<&Script, FetchError> {
        self.scripts.get(url).ok_or_else(|| failure(url))
    }
}

fn failure(url: &str) -> FetchError {
    FetchError::InvalidRedirect {
        from: url.to_string(),
        location: "scripted failure".to_string(),
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn head_status(&self, url: &str) -> Result<u16, FetchError> {
        self.head_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut order) = self.order.lock() {
            order.push(url.to_string());
        }
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let result = match self.script(url) {
            Ok(script) => {
                if let Some(delay) = script.delay {
                    tokio::time::sleep(delay).await;
                }
                match (script.fail_head, script.head) {
                    (false, Some(status)) => Ok(status),
                    _ => Err(failure(url)),
                }
            }
            Err(err) => Err(err),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn redirect_chain(&self, url: &str) -> Result<RedirectTrace, FetchError> {
        self.chain_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.script(url)?;
        if script.fail_chain {
            return Err(failure(url));
        }
        Ok(RedirectTrace {
            hops: script.hops.clone(),
            final_url: url.to_string(),
            final_status: script.head.unwrap_or(200),
        })
    }

    async fn fetch_body(&self, url: &str) -> Result<String, FetchError> {
        self.body_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.script(url)?;
        match (&script.body, script.fail_body) {
            (Some(body), false) => Ok(body.clone()),
            _ => Err(failure(url)),
        }
    }
}
