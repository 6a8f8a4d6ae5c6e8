use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tickline_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "tickline")]
#[command(author, version, about = "Scroll or bounce lines that overflow the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show lines in the interactive ticker
    Run {
        /// Lines to show; read from --file or a demo set when empty
        text: Vec<String>,
        /// Read one line per entry from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Print the measurement, mode and animation plan for given widths
    Probe {
        /// Container width in pixels
        #[arg(long)]
        container: f64,
        /// Content width in pixels
        #[arg(long)]
        content: f64,
        /// Content segments for the per-segment duration policy
        #[arg(long, default_value_t = 1)]
        segments: usize,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write the default configuration if no file exists
    Init,
}

/// Install the subscriber; the interactive ticker logs to a file
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let dir = AppConfig::data_dir();
        std::fs::create_dir_all(&dir)?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("tickline.log"))?;
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let interactive = matches!(cli.command, None | Some(Commands::Run { .. }));
    init_logging(&config, interactive)?;

    match cli.command {
        None => commands::run::run(config, Vec::new()).await,
        Some(Commands::Run { text, file }) => {
            let lines = commands::run::collect_lines(text, file.as_deref())?;
            commands::run::run(config, lines).await
        }
        Some(Commands::Probe {
            container,
            content,
            segments,
        }) => commands::probe::run(&config, container, content, segments).await,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init => commands::config::init(),
        },
    }
}
