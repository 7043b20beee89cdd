//! Error type for index operations.

use thiserror::Error;

/// Result type alias for index operations
pub type IndexResult<T> = std::result::Result<T, IndexError>;

/// Error type for the vector index
#[derive(Debug, Error)]
pub enum IndexError {
    /// I/O failure while persisting a snapshot
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Vector width differs from the index dimension
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Dimension the index was created with
        expected: usize,
        /// Dimension of the offending vector
        got: usize,
    },

    /// An id in the batch is already present. Ids are assigned upstream
    /// and never reused, so this means the allocation protocol broke.
    #[error("vector id {id} already present")]
    IdCollision {
        /// The colliding id
        id: i64,
    },

    /// Vector and id slices have different lengths
    #[error("got {vectors} vectors for {ids} ids")]
    LengthMismatch {
        /// Number of vectors in the batch
        vectors: usize,
        /// Number of ids in the batch
        ids: usize,
    },

    /// Snapshot header failed to serialize
    #[error("snapshot encode error: {0}")]
    Encode(String),
}
