//! Exact inner-product index over frame embeddings
//!
//! The index holds every live embedding in memory and persists to a single
//! snapshot file. It does not allocate ids: callers assign them (the engine
//! reads the catalog's maximum), and the index only enforces that an id is
//! not already present. Search is exhaustive and deterministic.

pub mod error;
pub mod index;
pub mod snapshot;

pub use error::{IndexError, IndexResult};
pub use index::FrameIndex;
pub use snapshot::LoadOutcome;
