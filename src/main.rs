//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use aquasentry::{
    cli::{AquaSentry, Commands},
    commands::{
        fish::handle_fish, level::handle_level, supply::handle_supply, tank::handle_tank,
        AppContext,
    },
    config::AppConfig,
    logging,
};
use clap::Parser;
use std::time::Duration;

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = AquaSentry::parse();
    logging::init(app.verbose);

    let mut config = AppConfig::from_env().context("reading configuration")?;
    if let Some(db) = app.db {
        config.database_path = db;
    }
    if let Some(url) = app.url {
        config.level_url = url;
    }
    if let Some(ms) = app.interval_ms {
        anyhow::ensure!(ms > 0, "--interval-ms must be greater than zero");
        config.poll_interval = Duration::from_millis(ms);
    }
    config.reset_schema |= app.reset_schema;

    let ctx = AppContext::new(config, app.json);

    match app.command {
        Commands::Tank { cmd } => handle_tank(&ctx, cmd).await?,
        Commands::Fish { cmd } => handle_fish(&ctx, cmd).await?,
        Commands::Supply { cmd } => handle_supply(&ctx, cmd).await?,
        Commands::Level { cmd } => handle_level(&ctx, cmd).await?,
    }

    Ok(())
}
