mod commands;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use signup_engine::FormConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "signup")]
#[command(version, about = "Signup form CLI - check field values and replay form sessions", long_about = None)]
struct Cli {
    /// Configuration file (default: ./signup.toml, defaults when missing)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log engine decisions (touch, transform, error set changes)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format and validate one value
    Check {
        /// Field id as in the markup (nom, prenom, dateNaissance, email, codeConfidentiel, ...)
        field: String,

        /// Raw value, as typed
        value: String,
    },

    /// Replay a scripted session of focus/input/submit/reset steps
    Replay {
        /// Session file (TOML)
        session: PathBuf,

        /// Print presenter events as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays clean
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => FormConfig::load(path)?,
        None => FormConfig::load_default()?,
    };

    // Execute command
    match cli.command {
        Commands::Check { field, value } => {
            commands::check::execute(&config, &field, &value)?;
        }
        Commands::Replay { session, json } => {
            commands::replay::execute(&config, &session, json)?;
        }
        Commands::Config => {
            commands::config::execute(&config)?;
        }
    }

    Ok(())
}
