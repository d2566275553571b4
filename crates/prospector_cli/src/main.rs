//! Prospector CLI - command-line interface for the harvesting engine.

mod commands;
mod config;
mod progress;
mod shutdown;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prospector")]
#[command(version)]
#[command(about = "Harvest repository stargazers and their contact emails")]
#[command(
    long_about = "Prospector walks the stargazer listings of a configured set of GitHub \
repositories and mines each stargazer's public event feed for a contactable \
email address. All progress is checkpointed after every step, so rate limits \
and interruptions only pause the harvest - nothing is ever fetched twice."
)]
#[command(after_long_help = r#"EXAMPLES
    Track two repositories and start harvesting:
        $ prospector init rust-lang/rust tokio-rs/tokio
        $ prospector run

    Run a single pass without the retry-forever loop:
        $ prospector run --once

    Inspect checkpointed state:
        $ prospector status

CONFIGURATION
    Prospector reads configuration from:
      1. ~/.config/prospector/config.toml (or $XDG_CONFIG_HOME/prospector/config.toml)
      2. ./prospector.toml
      3. Environment variables (PROSPECTOR_* prefix)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    PROSPECTOR_GITHUB_TOKEN          GitHub personal access token
    PROSPECTOR_STATE_REPOSITORIES    Path of repositories.json (default: XDG state dir)
    PROSPECTOR_STATE_USERS           Path of users.json (default: XDG state dir)
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register repositories for harvesting
    Init {
        /// Repository identifier(s) in owner/name form
        #[arg(required = true)]
        repositories: Vec<String>,
    },
    /// Harvest stargazers and prospect their contact emails
    Run {
        /// Run a single pass instead of retrying forever
        #[arg(long)]
        once: bool,

        /// Stop after this many restart passes
        #[arg(long, conflicts_with = "once")]
        max_passes: Option<u32>,

        /// Override the rate-limit retry delay, in seconds
        #[arg(long)]
        retry_delay: Option<u64>,
    },
    /// Show checkpointed harvest state
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Set up graceful shutdown handler (Ctrl+C)
    shutdown::setup_shutdown_handler();

    // Initialize tracing for non-TTY mode (structured logging)
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("prospector=info,prospector_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    // Load configuration (config file -> env vars -> defaults)
    let config = config::Config::load();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { repositories } => {
            commands::init::handle_init(&repositories, &config)?;
        }
        Commands::Run {
            once,
            max_passes,
            retry_delay,
        } => {
            commands::run::handle_run(
                commands::run::RunOptions {
                    once,
                    max_passes,
                    retry_delay_secs: retry_delay,
                },
                &config,
            )
            .await?;
        }
        Commands::Status => {
            commands::status::handle_status(&config)?;
        }
    }

    Ok(())
}
