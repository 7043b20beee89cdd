//! Framedex - incremental semantic search over extracted video frames
//!
//! Framedex keeps a flat inner-product vector index and a SQLite metadata
//! catalog in lockstep: every indexed frame embedding has exactly one
//! catalog row and vice versa, across crashes, restarts, and re-runs.
//! Retrieval over-fetches by score and then greedily drops frames that
//! sit too close in time to an already accepted frame of the same video.
//!
//! # Quick Start
//!
//! ```ignore
//! use framedex::{Engine, EngineConfig, MockEmbedder};
//!
//! // Open (or create) an engine directory
//! let config = EngineConfig::load_or_init(".framedex")?;
//! let mut engine = Engine::open(config, MockEmbedder::new(512))?;
//!
//! // Index a folder of extracted frames
//! engine.ingest_frames("frames/trip".as_ref())?;
//!
//! // Temporally deduplicated retrieval
//! let hits = engine.search("sunset over the harbour", 5, 5.0)?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Engine`], which coordinates the
//! vector index, the metadata catalog, and an [`Embedder`] backend.
//!
//! Internal implementation details (index layout, catalog schema,
//! snapshot format) are not exposed - only the engine API is public.

// Re-export the public API from framedex-engine
pub use framedex_engine::*;
