//! graphshell CLI
//!
//! Runs an isolated GraphRAG workspace: optional indexing, table loading and
//! an interactive query loop against the retrieval service.

mod cli;
mod commands;
mod errors;
mod interactive;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // Read before the subscriber so RUST_LOG may come from .env
    let dotenv = dotenvy::dotenv();

    // Logs go to stderr so prompts and answers own stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "Failed to load .env file");
        }
    }

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    runtime.block_on(async { commands::execute(cli).await })?;

    Ok(())
}
