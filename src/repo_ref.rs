//! Repository identity (`host` plus `owner/name`) parsed from a repository URL.

use std::fmt;

use thiserror::Error;

/// A hosted repository: the host serving it plus its owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    /// Lower-cased host, with the port appended when it is not the scheme default
    pub host: String,
    /// Account or organization owning the repository
    pub owner: String,
    /// Repository name without a `.git` suffix
    pub name: String,
}

/// Why a URL could not be turned into a [`RepoRef`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RepoRefError {
    /// The input is not an absolute URL with a host.
    #[error("invalid URL {0:?}")]
    InvalidUrl(String),
    /// The URL path does not start with `owner/name`.
    #[error("URL {0:?} has no owner/name path")]
    MissingPath(String),
}

/// Normalizes a host for comparison: lower-cased, without a leading `www.`.
fn canonical_host(host: &str) -> String {
    let host = host.trim().to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(bare) => bare.to_string(),
        None => host,
    }
}

impl RepoRef {
    /// Builds a reference from its parts. The host is normalized.
    pub fn new(host: &str, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            host: canonical_host(host),
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parses `https://host/owner/name[.git][/...]`.
    ///
    /// Any host is accepted; the first two path segments are the owner and
    /// the name, and a trailing `.git` is dropped from the name.
    pub fn from_url(raw: &str) -> Result<Self, RepoRefError> {
        let parsed =
            url::Url::parse(raw.trim()).map_err(|_| RepoRefError::InvalidUrl(raw.to_string()))?;
        let host = match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(RepoRefError::InvalidUrl(raw.to_string())),
        };
        let mut segments = parsed
            .path_segments()
            .ok_or_else(|| RepoRefError::MissingPath(raw.to_string()))?
            .filter(|segment| !segment.is_empty());

        let owner = segments.next();
        let name = segments
            .next()
            .map(|name| name.strip_suffix(".git").unwrap_or(name));
        match (owner, name) {
            (Some(owner), Some(name)) if !name.is_empty() => Ok(Self::new(&host, owner, name)),
            _ => Err(RepoRefError::MissingPath(raw.to_string())),
        }
    }

    /// Whether the repository is served by `host` (case-insensitive, `www.` ignored).
    pub fn is_on_host(&self, host: &str) -> bool {
        self.host == canonical_host(host)
    }

    /// `owner/name`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_repository_url() {
        let repo = RepoRef::from_url("https://github.com/tokio-rs/tokio").expect("parses");
        assert_eq!(repo, RepoRef::new("github.com", "tokio-rs", "tokio"));
        assert_eq!(repo.full_name(), "tokio-rs/tokio");
    }

    #[test]
    fn test_git_suffix_and_trailing_segments() {
        let repo = RepoRef::from_url("https://github.com/rust-lang/rust.git").expect("parses");
        assert_eq!(repo.name, "rust");

        let repo =
            RepoRef::from_url("https://github.com/serde-rs/serde/tree/master/").expect("parses");
        assert_eq!(repo.to_string(), "serde-rs/serde");
    }

    #[test]
    fn test_other_hosts() {
        let repo = RepoRef::from_url("https://gitlab.com/group/project").expect("parses");
        assert_eq!(repo.full_name(), "group/project");
        assert_eq!(repo.host, "gitlab.com");
        assert!(!repo.is_on_host("github.com"));
    }

    #[test]
    fn test_host_matching() {
        let repo = RepoRef::from_url("https://WWW.GitHub.com/tokio-rs/tokio").expect("parses");
        assert_eq!(repo.host, "github.com");
        assert!(repo.is_on_host("github.com"));
        assert!(repo.is_on_host("www.github.com"));
        assert!(!repo.is_on_host("github.com.evil.example"));
    }

    #[test]
    fn test_non_default_port_is_part_of_host() {
        let repo = RepoRef::from_url("http://127.0.0.1:8080/owner/repo").expect("parses");
        assert_eq!(repo.host, "127.0.0.1:8080");
        assert!(repo.is_on_host("127.0.0.1:8080"));
        assert!(!repo.is_on_host("127.0.0.1:9090"));

        let repo = RepoRef::from_url("https://github.com:443/owner/repo").expect("parses");
        assert_eq!(repo.host, "github.com");
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(
            RepoRef::from_url("https://github.com/tokio-rs"),
            Err(RepoRefError::MissingPath(
                "https://github.com/tokio-rs".to_string()
            ))
        );
        assert!(RepoRef::from_url("https://github.com/owner/.git").is_err());
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            RepoRef::from_url("github.com/a/b"),
            Err(RepoRefError::InvalidUrl(_))
        ));
    }
}
