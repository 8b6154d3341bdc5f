//! Profile Registry CLI - Database migrations and identifier tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! pr-cli migrate
//!
//! # Check a CPF or CNPJ offline
//! pr-cli document check 529.982.247-25
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pr-cli")]
#[command(author, version, about = "Profile Registry CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Work with taxpayer identifiers
    Document {
        #[command(subcommand)]
        action: DocumentAction,
    },
}

#[derive(Subcommand)]
enum DocumentAction {
    /// Check whether a value is a valid CPF or CNPJ
    Check {
        /// The identifier, with or without punctuation
        value: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Document { action } => match action {
            DocumentAction::Check { value } => commands::document::run(&value)?,
        },
    }
    Ok(())
}
