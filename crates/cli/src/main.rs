//! Pixel Store CLI - Catalog file tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate a catalog file (defaults to STORE_CATALOG_PATH)
//! pixel-store-cli catalog check catalog.yaml
//!
//! # Write the built-in catalog as a starting point
//! pixel-store-cli catalog export catalog.yaml
//! ```
//!
//! # Commands
//!
//! - `catalog check` - Parse and validate a JSON or YAML catalog
//! - `catalog export` - Write the built-in catalog to a file

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pixel-store-cli")]
#[command(author, version, about = "Pixel Store CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with catalog files
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Validate a catalog file
    Check {
        /// Catalog file (.json, .yaml or .yml); defaults to `STORE_CATALOG_PATH`
        path: Option<PathBuf>,
    },
    /// Write the built-in catalog to a file
    Export {
        /// Destination file (.json, .yaml or .yml)
        path: PathBuf,

        /// Overwrite the destination if it exists
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Check { path } => {
                commands::catalog::check(path)?;
            }
            CatalogAction::Export { path, force } => {
                commands::catalog::export(&path, force)?;
            }
        },
    }
    Ok(())
}
