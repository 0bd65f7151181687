//! # lst CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Listing stack CLI — marketplace listing workflow toolchain.
///
/// Checks the catalog, discovers product types, validates listing
/// payloads against vendor product-type schemas, and submits listings
/// in validation-preview mode.
#[derive(Parser, Debug)]
#[command(name = "lst", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the end-to-end listing workflow.
    Run(lst_cli::run::RunArgs),
    /// Validate a payload offline against local schema documents.
    Validate(lst_cli::validate::ValidateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => lst_cli::run::run(args).await,
        Commands::Validate(args) => lst_cli::validate::run(args),
    }
}
