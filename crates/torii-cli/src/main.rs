//! torii CLI - RPC dispatch service.

use clap::{Parser, Subcommand};

mod commands;
pub(crate) mod shared;

/// torii - generic RPC dispatch service with token authentication.
#[derive(Debug, Parser)]
#[command(name = "torii", version, about)]
struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: plain or json (overrides the configured format).
    #[arg(long, global = true, value_parser = ["plain", "json"])]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the RPC server over HTTP.
    Serve(commands::serve::ServeArgs),
    /// Manage authentication tokens.
    #[command(subcommand)]
    Token(commands::token::TokenCommand),
    /// Manage principals.
    #[command(subcommand)]
    Principal(commands::principal::PrincipalCommand),
    /// List the exposed RPC methods.
    Methods(commands::methods::MethodsArgs),
}

fn init_tracing(verbose: u8, log_format: &str, config_level: &str) {
    let level = match verbose {
        0 => config_level.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = torii_config::load_config(cli.config.as_deref())?;
    let log_format = cli.log_format.as_deref().unwrap_or(&config.logging.format);
    init_tracing(cli.verbose, log_format, &config.logging.level);

    match &cli.command {
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
        Commands::Token(command) => commands::token::execute(command, &config).await,
        Commands::Principal(command) => commands::principal::execute(command, &config).await,
        Commands::Methods(args) => commands::methods::execute(args),
    }
}
