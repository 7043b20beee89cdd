//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's
//! main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::fs;
use std::path::{Path, PathBuf};

pub use framedex_catalog::{Catalog, NewFrame};
pub use framedex_core::{FrameName, VectorId, VideoId};
pub use framedex_engine::{
    Engine, EngineConfig, EngineError, EngineInfo, IngestReport, MockEmbedder, RemoveReport,
    SearchHit,
};
pub use framedex_index::{FrameIndex, LoadOutcome};
use tempfile::TempDir;

/// Embedding dimension used across the suites. Small keeps planted
/// vectors readable.
pub const DIMENSION: usize = 8;

// ============================================================================
// TestEngine - engine over a throwaway data directory
// ============================================================================

/// Engine wrapper that owns its data directory for the test's lifetime.
pub struct TestEngine {
    pub engine: Engine,
    pub dir: TempDir,
}

impl TestEngine {
    /// Opens an engine over a fresh temporary data directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let engine = open_engine(dir.path());
        TestEngine { engine, dir }
    }

    /// Closes the engine and opens a new one over the same directory.
    pub fn reopen(self) -> Self {
        Self::from_dir(self.close())
    }

    /// Closes the engine, handing back the data directory so a test can
    /// tamper with the on-disk state before reopening.
    pub fn close(self) -> TempDir {
        let TestEngine { engine, dir } = self;
        drop(engine);
        dir
    }

    /// Opens an engine over a directory returned by [`TestEngine::close`].
    pub fn from_dir(dir: TempDir) -> Self {
        TestEngine {
            engine: open_engine(dir.path()),
            dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.path().join("frames.index")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.dir.path().join("catalog.db")
    }

    /// Opens a second catalog handle over the same database, for
    /// fabricating inconsistent states.
    pub fn raw_catalog(&self) -> Catalog {
        Catalog::open(&self.catalog_path()).expect("Failed to open catalog")
    }

    /// Catalog vector ids in ascending order, as bare integers.
    pub fn catalog_ids(&self) -> Vec<i64> {
        self.raw_catalog()
            .frame_ids()
            .expect("Failed to list frame ids")
            .into_iter()
            .map(|id| id.as_i64())
            .collect()
    }

    /// Vector ids in the persisted index snapshot, ascending. Empty when
    /// no snapshot has been written yet.
    pub fn snapshot_ids(&self) -> Vec<i64> {
        match FrameIndex::load(&self.index_path()) {
            LoadOutcome::Loaded(index) => index.ids().map(|id| id.as_i64()).collect(),
            LoadOutcome::NotFound => Vec::new(),
            LoadOutcome::Corrupt { reason } => panic!("corrupt snapshot: {reason}"),
        }
    }
}

/// Opens an engine with the mock backend over `data_dir`.
pub fn open_engine(data_dir: &Path) -> Engine {
    let config = EngineConfig::load_or_init(data_dir).expect("Failed to load config");
    Engine::open(config, MockEmbedder::new(DIMENSION)).expect("Failed to open engine")
}

// ============================================================================
// Frame fixtures
// ============================================================================

/// Renders components as a planted-embedding file body or query.
pub fn vec_spec(components: &[f32]) -> String {
    let parts: Vec<String> = components.iter().map(|c| c.to_string()).collect();
    format!("vec:{}", parts.join(","))
}

/// Writes a frame file whose mock embedding is exactly `components`
/// (normalized). Returns the filename.
pub fn plant_frame(dir: &Path, video: &str, fps: u64, pts: u64, components: &[f32]) -> String {
    let name = FrameName {
        video_name: video.to_string(),
        fps: fps as f64,
        pts,
    }
    .file_name();
    fs::write(dir.join(&name), vec_spec(components)).expect("Failed to write frame file");
    name
}

/// Fresh directory for frame fixtures.
pub fn frames_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create frames dir")
}

// ============================================================================
// Hit inspection
// ============================================================================

pub fn filenames(hits: &[SearchHit]) -> Vec<&str> {
    hits.iter().map(|h| h.filename.as_str()).collect()
}

pub fn timestamps(hits: &[SearchHit]) -> Vec<f64> {
    hits.iter().map(|h| h.timestamp).collect()
}
