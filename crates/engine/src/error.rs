use std::path::PathBuf;

use framedex_catalog::CatalogError;
use framedex_index::IndexError;
use thiserror::Error;

use crate::embed::EmbedError;

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Filesystem failure outside the index and catalog layers.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The metadata catalog failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The vector index failed.
    #[error("index error: {0}")]
    Index(#[from] IndexError),

    /// The embedding backend failed.
    #[error("embedding error: {0}")]
    Embed(#[from] EmbedError),

    /// A persisted index disagrees with the configured backend dimension.
    #[error("embedder produces {embedder}-dimensional vectors but the index holds {index}-dimensional vectors")]
    DimensionDrift {
        /// Dimension reported by the embedding backend.
        embedder: usize,
        /// Dimension of the loaded index.
        index: usize,
    },

    /// A search was requested with a result budget of zero.
    #[error("top_k must be at least 1, got {got}")]
    InvalidTopK {
        /// The rejected value.
        got: usize,
    },

    /// The backend returned a different number of embeddings than inputs.
    #[error("expected {expected} embeddings, backend returned {got}")]
    EmbeddingCountMismatch {
        /// Number of images submitted.
        expected: usize,
        /// Number of vectors returned.
        got: usize,
    },

    /// A configuration file failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Ingestion was pointed at something that is not a directory.
    #[error("not a folder: {}", .0.display())]
    NotAFolder(PathBuf),
}
