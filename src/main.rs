//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `repo_validator` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::process;

use repo_validator::initialization::init_logger_with;
use repo_validator::{
    check_repository_activity, check_url, import_urls, run_validation, Cli, Command,
};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = cli.to_config();
    match cli.command {
        Command::Validate { .. } => {
            let report = run_validation(config).await?;
            println!(
                "✅ Validated {} repositor{} ({} valid, {} invalid, {} skipped) in {:.1}s",
                report.total_targets,
                if report.total_targets == 1 { "y" } else { "ies" },
                report.valid,
                report.invalid,
                report.skipped,
                report.elapsed_seconds
            );
            if report.activity_checked > 0 {
                println!(
                    "Activity: {} of {} checked repositories active",
                    report.active, report.activity_checked
                );
            }
            println!("Results saved in {}", report.db_path.display());
        }
        Command::Check { url } => {
            let report = check_url(&config, &url).await?;
            print_json(&report)?;
        }
        Command::Activity { owner, repo } => {
            let status = check_repository_activity(&config, &owner, &repo).await?;
            print_json(&status)?;
        }
        Command::Import { file } => {
            let report = import_urls(&config, &file).await?;
            print_json(&report)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env in the working directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = dispatch(cli).await {
        eprintln!("repo_validator error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
