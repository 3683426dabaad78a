use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use wellness_companion::app;
use wellness_companion::cli::Cli;
use wellness_companion::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_init()?;
    config.apply_env_overrides();
    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = dir.display().to_string();
    }

    // stdout carries the protocol, so logs go to stderr.
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.tracing_level()?
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    app::dispatch(cli, config).await
}
