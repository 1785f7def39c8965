//! Import of repository URLs as pending records.

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use sqlx::SqlitePool;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::app::validate_and_normalize_url;
use crate::config::Config;
use crate::repo_ref::RepoRef;
use crate::storage::{init_db_pool_with_path, insert_pending_repository, run_migrations};

/// Counts from an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// New pending records
    pub inserted: usize,
    /// URLs already in the database
    pub duplicates: usize,
    /// Lines that are not usable URLs
    pub rejected: usize,
}

/// Imports URLs (one per line) from `file`, or from stdin when `file` is `-`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the database cannot be
/// opened or written.
pub async fn import_urls(config: &Config, file: &Path) -> Result<ImportReport> {
    let pool = init_db_pool_with_path(&config.db_path)
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let report = if file.as_os_str() == "-" {
        info!("Reading URLs from stdin");
        import_urls_from_reader(&pool, BufReader::new(tokio::io::stdin())).await?
    } else {
        let input = tokio::fs::File::open(file)
            .await
            .with_context(|| format!("Failed to open input file {}", file.display()))?;
        import_urls_from_reader(&pool, BufReader::new(input)).await?
    };

    info!(
        "Imported {} repositor{} ({} already known, {} rejected)",
        report.inserted,
        if report.inserted == 1 { "y" } else { "ies" },
        report.duplicates,
        report.rejected
    );
    Ok(report)
}

/// Imports URLs from any line-oriented reader.
///
/// Blank lines and lines starting with `#` are skipped.
pub async fn import_urls_from_reader<R>(pool: &SqlitePool, reader: R) -> Result<ImportReport>
where
    R: AsyncBufRead + Unpin,
{
    let mut report = ImportReport::default();
    let mut lines = reader.lines();

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read line from input")?
    {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(url) = validate_and_normalize_url(trimmed) else {
            report.rejected += 1;
            continue;
        };
        let repo = match RepoRef::from_url(&url) {
            Ok(repo) => Some(repo),
            Err(e) => {
                warn!("Importing without owner/name: {e}");
                None
            }
        };

        let inserted = insert_pending_repository(pool, &url, repo.as_ref())
            .await
            .with_context(|| format!("Failed to insert {url}"))?;
        match inserted {
            Some(_) => report.inserted += 1,
            None => report.duplicates += 1,
        }
    }

    Ok(report)
}
