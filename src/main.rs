//! Homework Status Bot CLI
//!
//! Polls the homework review API and forwards status changes to Telegram.

use anyhow::{Context, Result};
use clap::Parser;
use homework_status_bot::{ApiClient, Config, PollLoop, TelegramChannel, TelegramConfig};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "hwbot")]
#[command(about = "Homework Status Bot - relays homework review status changes to Telegram")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/homework-status-bot/config.json)
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Poll interval in seconds, overrides the config
    #[arg(long, short, value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,
    /// Also append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Run a single poll, print its report as JSON and exit
    #[arg(long)]
    once: bool,
}

/// Log to stderr, and optionally to a file
///
/// Level is controlled by RUST_LOG, e.g. `RUST_LOG=debug hwbot`
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("homework_status_bot=info,hwbot=info"));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    if let Some(interval) = cli.interval {
        config.retry_period_secs = interval;
    }

    let source = ApiClient::new(&config)?;
    let channel = TelegramChannel::new(TelegramConfig::from(&config))?;
    let mut poller = PollLoop::new(source, channel, config.retry_period());

    if cli.once {
        let report = poller.run_once().await;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    tokio::select! {
        _ = poller.run() => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Cannot listen for Ctrl-C")?;
            info!("Interrupted, shutting down");
        }
    }

    Ok(())
}
