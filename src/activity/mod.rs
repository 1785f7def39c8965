//! Repository activity (staleness) check against the metadata API.
//!
//! The checker fetches `GET {api_base}/repos/{owner}/{repo}` and compares
//! `pushed_at` with the current time. It never fails: any problem yields an
//! inactive status whose `reason` says what went wrong.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ACTIVITY_STALE_AFTER_DAYS, HTTP_STATUS_OK, PUSHED_AT_FORMAT};

/// Reason given when the metadata API has no usable push date.
pub const NO_ACTIVITY_DATA: &str = "Could not fetch activity data";

/// Whether a repository has been pushed to recently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityStatus {
    /// Last push was at most 730 days ago
    pub is_active: bool,
    /// Human-readable explanation
    pub reason: String,
}

impl ActivityStatus {
    /// An inactive status with the given reason.
    pub fn inactive(reason: impl Into<String>) -> Self {
        Self {
            is_active: false,
            reason: reason.into(),
        }
    }
}

/// Failure while fetching or reading repository metadata.
#[derive(Error, Debug)]
pub enum ActivityError {
    /// The API request failed.
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// The response body is not valid JSON.
    #[error("invalid metadata response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// `pushed_at` does not match the expected timestamp format.
    #[error("invalid pushed_at timestamp {value:?}: {source}")]
    InvalidTimestamp {
        /// Raw value
        value: String,
        /// Parse failure
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Deserialize)]
struct RepositoryMetadata {
    pushed_at: Option<String>,
}

/// Classifies a repository from the number of days since its last push.
///
/// More than `ACTIVITY_STALE_AFTER_DAYS` days is stale; exactly that many is
/// still active.
pub fn status_for_days(days: i64) -> ActivityStatus {
    if days > ACTIVITY_STALE_AFTER_DAYS {
        ActivityStatus {
            is_active: false,
            reason: format!("Last commit {days} days ago"),
        }
    } else {
        ActivityStatus {
            is_active: true,
            reason: format!("Active ({days} days since last commit)"),
        }
    }
}

/// Computes the activity status for a `pushed_at` value relative to `now`.
///
/// Days are whole days, rounded down.
pub fn activity_from_pushed_at(
    pushed_at: &str,
    now: DateTime<Utc>,
) -> Result<ActivityStatus, ActivityError> {
    let last_push = NaiveDateTime::parse_from_str(pushed_at, PUSHED_AT_FORMAT)
        .map_err(|source| ActivityError::InvalidTimestamp {
            value: pushed_at.to_string(),
            source,
        })?
        .and_utc();
    let days = (now - last_push).num_seconds().div_euclid(86_400);
    Ok(status_for_days(days))
}

/// Checks repository activity through the metadata API.
///
/// The client must already carry the API headers (`Authorization`,
/// `Accept`, `User-Agent`); see [`crate::initialization::init_api_client`].
#[derive(Clone)]
pub struct ActivityChecker {
    client: Arc<reqwest::Client>,
    api_base_url: String,
}

impl ActivityChecker {
    /// Creates a checker using `client` (see [`crate::initialization::init_api_client`]).
    pub fn new(client: Arc<reqwest::Client>, api_base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the activity status of `owner/repo_name`. Never fails.
    pub async fn check_activity(&self, owner: &str, repo_name: &str) -> ActivityStatus {
        match self.fetch_activity(owner, repo_name).await {
            Ok(status) => status,
            Err(err) => {
                log::warn!("Activity check for {owner}/{repo_name} failed: {err}");
                ActivityStatus::inactive(format!("Error: {err}"))
            }
        }
    }

    async fn fetch_activity(
        &self,
        owner: &str,
        repo_name: &str,
    ) -> Result<ActivityStatus, ActivityError> {
        let url = format!("{}/repos/{}/{}", self.api_base_url, owner, repo_name);
        let response = self.client.get(&url).send().await?;

        if response.status().as_u16() != HTTP_STATUS_OK {
            log::debug!(
                "Metadata request for {owner}/{repo_name} returned {}",
                response.status()
            );
            return Ok(ActivityStatus::inactive(NO_ACTIVITY_DATA));
        }

        let body = response.text().await?;
        let metadata: RepositoryMetadata = serde_json::from_str(&body)?;
        match metadata.pushed_at {
            Some(pushed_at) => activity_from_pushed_at(&pushed_at, Utc::now()),
            None => Ok(ActivityStatus::inactive(NO_ACTIVITY_DATA)),
        }
    }
}
