use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vitrine_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "Landing page effects with a terminal preview")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of ~/.config/vitrine/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the terminal preview
    Run,
    /// Read or change the persisted theme preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Run the page headless on virtual time and print what changed
    Simulate {
        /// Stop at this page time
        #[arg(long, default_value_t = 10_000)]
        until_ms: u64,
        /// Scroll to this offset right after page-ready
        #[arg(long)]
        scroll_to: Option<f64>,
        /// Print the final page state as JSON instead of a timeline
        #[arg(long)]
        json: bool,
    },
    /// Show the config file path
    Config {
        /// Write the default config if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the stored theme
    Get,
    /// Store a theme (dark or light)
    Set { theme: String },
    /// Flip the stored theme
    Toggle,
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    // The preview owns the terminal, so its logs go to a file
    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let config = Arc::new(config);

    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, interactive)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Theme { action }) => {
            commands::theme::run(&config, action.unwrap_or(ThemeAction::Get))
        }
        Some(Commands::Simulate {
            until_ms,
            scroll_to,
            json,
        }) => commands::simulate::run(&config, until_ms, scroll_to, json),
        Some(Commands::Config { init }) => commands::config::run(&config, init),
    }
}
