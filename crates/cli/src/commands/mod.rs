//! CLI subcommand implementations.

pub mod catalog;

use std::path::PathBuf;

use pixel_store_storefront::inventory::CatalogError;
use thiserror::Error;

/// Errors from CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("no catalog path given and STORE_CATALOG_PATH is not set")]
    MissingPath,
    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
