// Error model for the catalog library
//
// Lookups that miss are not errors (they return Option/bool); the only
// failures the core reports come from writing or reading export files.

use std::path::PathBuf;
use thiserror::Error;

/// Result type used across the library.
pub type Result<T> = std::result::Result<T, InventoryError>;

#[derive(Debug, Error)]
pub enum InventoryError {
    /// The export destination could not be written (permissions, bad path, disk full).
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be encoded or decoded as CSV.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl InventoryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the failure came from the filesystem rather than the data.
    pub fn is_io(&self) -> bool {
        match self {
            InventoryError::Io { .. } => true,
            InventoryError::Csv(err) => err.is_io_error(),
        }
    }
}
