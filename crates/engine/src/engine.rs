//! Engine construction and open-time reconciliation.

use std::collections::BTreeSet;
use std::fs;

use framedex_catalog::Catalog;
use framedex_core::VectorId;
use framedex_index::{FrameIndex, LoadOutcome};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::embed::Embedder;
use crate::error::{EngineError, EngineResult};

/// Coordinates the vector index, the metadata catalog, and the embedding
/// backend behind one handle.
///
/// Ingestion and removal take `&mut self`, search takes `&self`, so the
/// type system enforces a single writer without any locking.
pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) catalog: Catalog,
    pub(crate) index: FrameIndex,
    pub(crate) embedder: Box<dyn Embedder>,
}

/// Point-in-time counters describing engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineInfo {
    /// Distinct videos known to the catalog.
    pub videos: u64,
    /// Frame rows in the catalog.
    pub frames: u64,
    /// Vectors resident in the index.
    pub vectors: usize,
    /// Embedding dimension.
    pub dimension: usize,
}

impl Engine {
    /// Opens the engine state under `config.data_dir()`, creating it on
    /// first use.
    ///
    /// A missing index snapshot starts empty; an unreadable one is
    /// discarded with a warning and rebuilt empty, after which
    /// reconciliation clears the catalog so the source frames are
    /// rediscovered on the next ingest. Either way the catalog and the
    /// index agree on their vector id set before this returns.
    pub fn open(config: EngineConfig, embedder: impl Embedder + 'static) -> EngineResult<Self> {
        config.validate()?;
        fs::create_dir_all(config.data_dir())?;

        let catalog = Catalog::open(&config.catalog_path())?;

        let index_path = config.index_path();
        let mut index = match FrameIndex::load(&index_path) {
            LoadOutcome::Loaded(index) => {
                debug!(
                    target: "framedex::engine",
                    path = %index_path.display(),
                    vectors = index.len(),
                    "loaded index snapshot"
                );
                index
            }
            LoadOutcome::NotFound => {
                debug!(
                    target: "framedex::engine",
                    path = %index_path.display(),
                    "no index snapshot, starting empty"
                );
                FrameIndex::new(embedder.dimension())
            }
            LoadOutcome::Corrupt { reason } => {
                warn!(
                    target: "framedex::engine",
                    path = %index_path.display(),
                    reason = %reason,
                    "index snapshot unreadable, starting empty"
                );
                FrameIndex::new(embedder.dimension())
            }
        };

        if index.dimension() != embedder.dimension() {
            if index.is_empty() {
                index = FrameIndex::new(embedder.dimension());
            } else {
                return Err(EngineError::DimensionDrift {
                    embedder: embedder.dimension(),
                    index: index.dimension(),
                });
            }
        }

        let mut engine = Self {
            config,
            catalog,
            index,
            embedder: Box::new(embedder),
        };
        engine.reconcile()?;

        let info = engine.info()?;
        info!(
            target: "framedex::engine",
            videos = info.videos,
            frames = info.frames,
            vectors = info.vectors,
            dimension = info.dimension,
            "engine open"
        );
        Ok(engine)
    }

    /// Brings the index and the catalog back to the same vector id set.
    ///
    /// Index entries without a catalog row are dropped and the snapshot
    /// rewritten. Catalog rows without an index entry are deleted so the
    /// frames they described count as never ingested.
    fn reconcile(&mut self) -> EngineResult<()> {
        let catalog_ids: BTreeSet<VectorId> = self.catalog.frame_ids()?.into_iter().collect();
        let index_ids: BTreeSet<VectorId> = self.index.ids().collect();

        let stale: Vec<VectorId> = index_ids.difference(&catalog_ids).copied().collect();
        if !stale.is_empty() {
            warn!(
                target: "framedex::engine",
                count = stale.len(),
                "dropping index vectors with no catalog row"
            );
            self.index.remove_ids(&stale);
            self.index.persist(&self.config.index_path())?;
        }

        let orphaned: Vec<VectorId> = catalog_ids.difference(&index_ids).copied().collect();
        if !orphaned.is_empty() {
            warn!(
                target: "framedex::engine",
                count = orphaned.len(),
                "deleting catalog rows with no index vector"
            );
            self.catalog.delete_frames(&orphaned)?;
        }

        Ok(())
    }

    /// Reports catalog and index counters.
    pub fn info(&self) -> EngineResult<EngineInfo> {
        Ok(EngineInfo {
            videos: self.catalog.video_count()?,
            frames: self.catalog.frame_count()?,
            vectors: self.index.len(),
            dimension: self.index.dimension(),
        })
    }

    /// The configuration this engine was opened with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
