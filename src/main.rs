//! fieldsurvey - lead intake and Factory UX field surveys
//!
//! Records leads, resolves the cascading survey form options and stores
//! submissions in a local JSON record store.

mod app;
mod auth;
mod cli;
mod config;
mod export;
mod leads;
mod state;
mod store;
mod survey;

use anyhow::Result;
use clap::Parser;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fieldsurvey=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = cli::Cli::parse();
    if let Err(err) = cli::run(cli).await {
        tracing::debug!("command failed: {err:?}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }

    Ok(())
}
