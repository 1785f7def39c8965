//! Command-line interface definition.
//!
//! The binary parses [`Cli`] and converts it into a [`Config`] with
//! [`Cli::to_config`]. Options shared by every subcommand are global, so they
//! can appear before or after the subcommand name.

use std::path::PathBuf;

use clap::builder::TypedValueParser;
use clap::{Args, Parser, Subcommand};

use crate::config::constants::{
    DB_PATH, DEFAULT_API_BASE_URL, DEFAULT_BATCH_LIMIT, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_REPO_HOST, DEFAULT_USER_AGENT, GITHUB_TOKEN_ENV, HTTP_REQUEST_TIMEOUT_SECS,
    RETRY_MAX_ATTEMPTS, TARGET_VALIDATION_TIMEOUT,
};
use crate::config::types::{Config, LogFormat, LogLevel};

/// Validate discovered repository URLs and track repository activity.
#[derive(Debug, Parser)]
#[command(name = "repo_validator", version, about, long_about = None)]
pub struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain", global = true)]
    pub log_format: LogFormat,

    /// SQLite database file
    #[arg(long, env = "REPO_VALIDATOR_DB_PATH", default_value = DB_PATH, global = true)]
    pub db_path: PathBuf,

    /// Network and API options
    #[command(flatten)]
    pub network: NetworkArgs,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// HTTP client options shared by all subcommands.
#[derive(Debug, Args)]
pub struct NetworkArgs {
    /// Per-request timeout in seconds
    #[arg(long, default_value_t = HTTP_REQUEST_TIMEOUT_SECS, global = true)]
    pub timeout_seconds: u64,

    /// Wall-clock budget in seconds for all three checks of one repository
    #[arg(long, default_value_t = TARGET_VALIDATION_TIMEOUT.as_secs(), global = true)]
    pub target_timeout_seconds: u64,

    /// Attempts per request for transient failures and HTTP 429
    #[arg(long, default_value_t = RETRY_MAX_ATTEMPTS, value_parser = clap::value_parser!(u64).range(1..=10).map(|v| v as usize), global = true)]
    pub retry_attempts: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// Token for the repository metadata API
    #[arg(long, env = GITHUB_TOKEN_ENV, hide_env_values = true, global = true)]
    pub github_token: Option<String>,

    /// Base URL of the repository metadata API
    #[arg(long, default_value = DEFAULT_API_BASE_URL, global = true)]
    pub api_base_url: String,

    /// Repository host the metadata API describes (activity is skipped for other hosts)
    #[arg(long, default_value = DEFAULT_REPO_HOST, global = true)]
    pub repo_host: String,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a batch of pending repositories stored in the database
    Validate {
        /// Maximum number of pending repositories to validate
        #[arg(long, default_value_t = DEFAULT_BATCH_LIMIT)]
        limit: usize,

        /// Number of repositories validated concurrently (1 = sequential)
        #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY, value_parser = clap::value_parser!(u64).range(1..=256).map(|v| v as usize))]
        max_concurrency: usize,

        /// Also check the last push date of each repository
        #[arg(long)]
        check_activity: bool,
    },
    /// Validate a single URL and print the result as JSON
    Check {
        /// Repository URL
        url: String,
    },
    /// Check whether a repository has been pushed to within the last two years
    Activity {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
    },
    /// Import repository URLs (one per line) as pending records
    Import {
        /// File to read URLs from, or `-` for stdin
        file: PathBuf,
    },
}

impl Cli {
    /// Builds the library configuration from parsed arguments.
    pub fn to_config(&self) -> Config {
        let mut config = Config {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            db_path: self.db_path.clone(),
            timeout_seconds: self.network.timeout_seconds,
            target_timeout_seconds: self.network.target_timeout_seconds,
            retry_attempts: self.network.retry_attempts,
            user_agent: self.network.user_agent.clone(),
            github_token: self
                .network
                .github_token
                .clone()
                .filter(|token| !token.trim().is_empty()),
            api_base_url: self.network.api_base_url.clone(),
            repo_host: self.network.repo_host.clone(),
            ..Default::default()
        };

        if let Command::Validate {
            limit,
            max_concurrency,
            check_activity,
        } = &self.command
        {
            config.limit = *limit;
            config.max_concurrency = *max_concurrency;
            config.check_activity = *check_activity;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_defaults() {
        let cli = Cli::try_parse_from(["repo_validator", "validate"]).expect("should parse");
        let config = cli.to_config();
        assert_eq!(config.limit, DEFAULT_BATCH_LIMIT);
        assert_eq!(config.max_concurrency, DEFAULT_MAX_CONCURRENCY);
        assert!(!config.check_activity);
        assert_eq!(config.timeout_seconds, HTTP_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.repo_host, DEFAULT_REPO_HOST);
    }

    #[test]
    fn test_validate_with_options() {
        let cli = Cli::try_parse_from([
            "repo_validator",
            "validate",
            "--limit",
            "25",
            "--max-concurrency",
            "4",
            "--check-activity",
            "--timeout-seconds",
            "3",
        ])
        .expect("should parse");
        let config = cli.to_config();
        assert_eq!(config.limit, 25);
        assert_eq!(config.max_concurrency, 4);
        assert!(config.check_activity);
        assert_eq!(config.timeout_seconds, 3);
    }

    #[test]
    fn test_global_options_before_subcommand() {
        let cli = Cli::try_parse_from([
            "repo_validator",
            "--db-path",
            "/tmp/repos.db",
            "--log-level",
            "debug",
            "check",
            "https://github.com/rust-lang/rust",
        ])
        .expect("should parse");
        assert_eq!(cli.db_path, PathBuf::from("/tmp/repos.db"));
        assert!(matches!(cli.log_level, LogLevel::Debug));
        match cli.command {
            Command::Check { ref url } => assert_eq!(url, "https://github.com/rust-lang/rust"),
            other => panic!("expected check command, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result =
            Cli::try_parse_from(["repo_validator", "validate", "--max-concurrency", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_retry_attempts_rejected() {
        let result = Cli::try_parse_from(["repo_validator", "--retry-attempts", "0", "validate"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_activity_and_import_commands() {
        let cli = Cli::try_parse_from(["repo_validator", "activity", "tokio-rs", "tokio"])
            .expect("should parse");
        match cli.command {
            Command::Activity { owner, repo } => {
                assert_eq!(owner, "tokio-rs");
                assert_eq!(repo, "tokio");
            }
            other => panic!("expected activity command, got {:?}", other),
        }

        let cli = Cli::try_parse_from(["repo_validator", "import", "-"]).expect("should parse");
        assert!(matches!(cli.command, Command::Import { ref file } if file == &PathBuf::from("-")));
    }

    #[test]
    fn test_non_validate_commands_keep_batch_defaults() {
        let cli = Cli::try_parse_from(["repo_validator", "check", "https://example.com/a/b"])
            .expect("should parse");
        let config = cli.to_config();
        assert_eq!(config.limit, DEFAULT_BATCH_LIMIT);
        assert!(!config.check_activity);
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["repo_validator"]).is_err());
    }
}
