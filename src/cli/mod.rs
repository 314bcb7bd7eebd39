use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Token operation codec and carrier fee estimator
#[derive(Parser)]
#[command(name = "token-carry")]
#[command(about = "Encode, decode and price token operations embedded in Bitcoin transactions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Encode a token operation (Deploy, Mint, Transfer, Split, Burn) to hex
    Encode(commands::encode::EncodeCommand),
    /// Decode a hex-encoded token envelope or bare operation
    Decode(commands::decode::DecodeCommand),
    /// Compare carrier fees for a payload
    Fees(commands::fees::FeesCommand),
    /// Print the effective configuration as TOML
    Config(commands::config::ConfigCommand),
}

pub fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(command) => command.run(),
        Commands::Decode(command) => command.run(),
        Commands::Fees(command) => command.run(),
        Commands::Config(command) => command.run(),
    }
}
