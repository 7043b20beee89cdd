//! Identifier newtypes shared by the catalog and the index.
//!
//! Both wrap `i64` because the catalog stores them as SQLite INTEGER
//! columns, and SQLite INTEGER is a signed 64-bit value.

use serde::{Deserialize, Serialize};

/// Row identifier for a source video in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VideoId(pub i64);

impl VideoId {
    /// Create a new VideoId
    pub fn new(id: i64) -> Self {
        VideoId(id)
    }

    /// Get the underlying i64 value
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VideoId({})", self.0)
    }
}

/// Identifier correlating one frame's catalog row with its index vector.
///
/// IMPORTANT: VectorIds are never reused. Allocation always continues from
/// the highest id recorded in the catalog, so ids stay unique across
/// deletions and restarts while any row remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VectorId(pub i64);

impl VectorId {
    /// Create a new VectorId
    pub fn new(id: i64) -> Self {
        VectorId(id)
    }

    /// Get the underlying i64 value
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// The id immediately after this one.
    pub fn next(&self) -> VectorId {
        VectorId(self.0 + 1)
    }
}

impl std::fmt::Display for VectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VectorId({})", self.0)
    }
}
