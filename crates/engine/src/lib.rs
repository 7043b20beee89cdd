//! Incremental ingestion, persistence, and temporally deduplicated
//! retrieval of video frame embeddings.
//!
//! The [`Engine`] ties three layers together behind one handle: a flat
//! inner-product vector index, a SQLite metadata catalog, and an
//! [`Embedder`] backend. Its invariant is a bijection between the two
//! stores: every indexed vector has exactly one catalog row and vice
//! versa, across crashes, restarts, and re-runs.
//!
//! ```no_run
//! use framedex_engine::{Engine, EngineConfig, MockEmbedder};
//!
//! # fn main() -> framedex_engine::EngineResult<()> {
//! let config = EngineConfig::load_or_init("/var/lib/framedex")?;
//! let mut engine = Engine::open(config, MockEmbedder::new(512))?;
//! engine.ingest_frames("frames/trip".as_ref())?;
//! for hit in engine.search("sunset over the harbour", 5, 5.0)? {
//!     println!("{:.3}  {:>8.1}s  {}", hit.score, hit.timestamp, hit.filename);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod embed;
mod engine;
mod error;
mod ingest;
mod remove;
mod search;

pub use config::{EngineConfig, CONFIG_FILE_NAME};
pub use embed::{EmbedError, EmbedResult, Embedder, MockEmbedder};
pub use engine::{Engine, EngineInfo};
pub use error::{EngineError, EngineResult};
pub use ingest::IngestReport;
pub use remove::RemoveReport;
pub use search::SearchHit;
