//! Homework bot CLI
//!
//! Command-line entry point for the review status notifier.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use homework_bot::config::load_dotenv;
use homework_bot::{load_config, Config};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Polls homework review statuses and relays changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "debug")]
    log_level: Level,

    /// Dotenv file with credentials (defaults to searching for `.env`)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// File the log is appended to, in addition to stdout
    #[arg(long, default_value = "program_log.txt")]
    log_file: PathBuf,
}

fn init_logging(level: Level, log_file: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    init_logging(args.log_level, &args.log_file)?;

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}, log_file={:?}",
        args.config,
        args.log_level,
        args.log_file
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    load_dotenv(args.env_file.as_deref());

    if let Err(e) = config.resolve_secrets() {
        tracing::error!("Bot unavailable, refusing to start: {}", e);
        return Err(e.into());
    }

    tracing::info!("Starting homework bot");
    homework_bot::run(config).await?;

    Ok(())
}
