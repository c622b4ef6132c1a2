//! promptsync CLI
//!
//! Main entry point for the promptsync command-line tool.
//! Pulls prompts from the LangSmith Prompt Hub into a local YAML store and
//! publishes validated local prompts back.

mod commands;

use clap::{Parser, Subcommand};
use commands::{CheckCommand, ListCommand, PullCommand, PushCommand};
use promptsync_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// promptsync - keep local YAML prompts in sync with a prompt registry
#[derive(Parser, Debug)]
#[command(name = "promptsync")]
#[command(about = "Sync YAML prompt stores with the LangSmith Prompt Hub", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "PROMPTSYNC_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "PROMPTSYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download prompts from the registry into a local store
    Pull(PullCommand),

    /// Validate a local store and publish it to the registry
    Push(PushCommand),

    /// Run validation and content conventions on a local store
    Check(CheckCommand),

    /// List local prompt stores
    List(ListCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Workspace and config file decide which files are merged
    let config = AppConfig::load_with(cli.workspace, cli.config)?;
    let config = config.with_overrides(cli.log_level, cli.verbose, cli.no_color);

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("promptsync starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Hub provider: {}", config.hub.provider);

    config.validate()?;

    let command_name = match &cli.command {
        Commands::Pull(_) => "pull",
        Commands::Push(_) => "push",
        Commands::Check(_) => "check",
        Commands::List(_) => "list",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Pull(cmd) => cmd.execute(&config).await,
        Commands::Push(cmd) => cmd.execute(&config).await,
        Commands::Check(cmd) => cmd.execute(&config).await,
        Commands::List(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
