//! Error type for catalog operations.

use thiserror::Error;

/// Result type alias for catalog operations
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Error type for the metadata catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to create or reach the catalog file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying SQLite failure. Constraint violations surface here too;
    /// a frames PRIMARY KEY hit means the id allocation protocol was
    /// broken upstream.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
