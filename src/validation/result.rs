//! Validation result types.

use serde::{Deserialize, Serialize};

/// Outcome of the three-level check for one URL.
///
/// Serialized as a flat JSON object; this is the `details` column of the
/// audit log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// HEAD (redirects disabled) returned 200
    pub level1: bool,
    /// No redirect hop contained "404"
    pub level2: bool,
    /// The page body contained no not-found marker
    pub level3: bool,
    /// Raw HEAD status, whether or not level 1 passed
    pub http_status: Option<u16>,
    /// URLs visited before the final response (original URL first)
    pub redirect_chain: Vec<String>,
    /// Number of distinct not-found markers in the body
    pub content_check: u32,
    /// Set when a check could not complete; later levels were not attempted
    pub error: Option<String>,
}

impl ValidationResult {
    /// All three levels passed.
    pub fn is_valid(&self) -> bool {
        self.level1 && self.level2 && self.level3
    }

    /// Number of passing levels (0-3).
    pub fn validation_level(&self) -> u8 {
        [self.level1, self.level2, self.level3]
            .iter()
            .filter(|passed| **passed)
            .count() as u8
    }

    /// `Valid` only when all three levels passed.
    pub fn verdict(&self) -> Verdict {
        if self.is_valid() {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}

/// Final classification of a repository record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// All three checks passed
    Valid,
    /// At least one check failed or did not run
    Invalid,
}

impl Verdict {
    /// Value stored in `repositories.validation_status`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Valid => "valid",
            Verdict::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
