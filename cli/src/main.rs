#![deny(missing_docs)]

//! # oasgen CLI
//!
//! Command Line Interface for generating OpenAPI 3.0 documents from a service
//! manifest.
//!
//! Supported Commands:
//! - `generate`: Manifest -> OpenAPI document (YAML or JSON), with a validation report.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod error;
mod generate;
mod logging;
mod manifest;
mod report;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI v3 documentation generator")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an OpenAPI document from the manifest's documentation settings.
    Generate(generate::GenerateArgs),
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init()?;

    match &cli.command {
        Commands::Generate(args) => {
            generate::execute(args).await?;
        }
    }

    Ok(())
}
