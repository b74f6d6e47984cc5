//! Passage CLI
//!
//! Operator tooling for the wallet-session route gate.

use anyhow::Result;
use clap::{Parser, Subcommand};
use passage_cli::commands::{self, EvaluateArgs, SessionCommand};
use passage_core::PassageConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "passage")]
#[command(about = "Passage - wallet-session route gate tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = ".passage/config.toml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the route gate against a snapshot
    Evaluate(EvaluateArgs),

    /// Inspect or modify the persisted session
    #[command(subcommand)]
    Session(SessionCommand),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = PassageConfig::load(Some(cli.config.as_path()))?;

    let output = match &cli.command {
        Commands::Evaluate(args) => {
            serde_json::to_string_pretty(&commands::evaluate::run(&config, args).await?)?
        }
        Commands::Session(cmd) => {
            serde_json::to_string_pretty(&commands::session::run(&config, cmd).await?)?
        }
    };
    println!("{output}");

    Ok(())
}
