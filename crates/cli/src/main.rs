//! Tributary CLI
//!
//! Entry point for the tributary command-line tool: ask a question through
//! the retrieval pipeline, inspect routing, or seed the sample data sources.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, RouteCommand, SeedCommand};
use tributary_core::{config::PipelineConfig, logging, AppResult};

/// Tributary - multi-source retrieval-augmented answering
#[derive(Parser, Debug)]
#[command(name = "tributary")]
#[command(about = "Answer questions from SQL, document, and REST sources via an LLM", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (ollama, openai, mock)
    #[arg(short, long, global = true, env = "TRIBUTARY_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "TRIBUTARY_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a question through the retrieval pipeline
    Ask(AskCommand),

    /// Show which sources a query would be routed to
    Route(RouteCommand),

    /// Create and populate the sample data sources
    Seed(SeedCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // A .env file is optional; the environment always wins.
    dotenvy::dotenv().ok();

    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment, then apply CLI overrides
    let config = PipelineConfig::load()?;
    let config = config.with_overrides(
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Tributary CLI starting");
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Route(_) => "route",
        Commands::Seed(_) => "seed",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Route(cmd) => cmd.execute(),
        Commands::Seed(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
