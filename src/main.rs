//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `countries_browser` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - Ctrl-C handling
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tokio::io::{stdin, BufReader};

use countries_browser::initialization::init_logger_with;
use countries_browser::{run_browser, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env (e.g. COUNTRIES_API_URL) before clap reads them
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

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let input = BufReader::new(stdin());
    let session = run_browser(config, input, std::io::stdout());

    tokio::select! {
        result = session => match result {
            Ok(report) => {
                info!(
                    "Session ended after {} command{} in {:.1}s ({} cached queries)",
                    report.commands,
                    if report.commands == 1 { "" } else { "s" },
                    report.elapsed_seconds,
                    report.cached_queries
                );
                Ok(())
            }
            Err(e) => {
                eprintln!("countries_browser error: {:#}", e);
                process::exit(1);
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
            Ok(())
        }
    }
}
