//! Frame ingestion.
//!
//! Ingestion walks a folder of extracted frame images, embeds the ones
//! the catalog has not seen yet, and commits them batch by batch. Within
//! a batch the index is updated first and rolled back if the catalog
//! transaction fails, so a frame is never searchable without metadata.

use std::fs;
use std::path::{Path, PathBuf};

use framedex_catalog::NewFrame;
use framedex_core::{has_frame_extension, l2_normalize, FrameName, VectorId};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};

/// Counters describing one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Frame files found in the folder.
    pub discovered: usize,
    /// Files skipped because the catalog already holds their filename.
    pub skipped_existing: usize,
    /// Files that could not be read from disk.
    pub unreadable: usize,
    /// Frames embedded, indexed, and catalogued.
    pub indexed: usize,
    /// Batches committed.
    pub batches: usize,
}

impl Engine {
    /// Ingests every new frame image under `folder`.
    ///
    /// Files are processed in filename order, so vector ids are
    /// deterministic for a given folder state. Already-catalogued
    /// filenames are skipped, which makes re-running ingestion over the
    /// same folder a no-op. Each batch is committed atomically; if a
    /// batch fails partway through the run, earlier batches stay
    /// committed and the index snapshot is rewritten before the error is
    /// returned.
    pub fn ingest_frames(&mut self, folder: &Path) -> EngineResult<IngestReport> {
        let discovered = discover_frames(folder)?;
        let total = discovered.len();

        let existing = self.catalog.existing_filenames()?;
        let pending: Vec<(PathBuf, String)> = discovered
            .into_iter()
            .filter(|(_, name)| !existing.contains(name))
            .collect();

        let mut report = IngestReport {
            discovered: total,
            skipped_existing: total - pending.len(),
            ..IngestReport::default()
        };

        if pending.is_empty() {
            info!(
                target: "framedex::ingest",
                folder = %folder.display(),
                discovered = report.discovered,
                "no new frames to ingest"
            );
            return Ok(report);
        }

        let mut next_id = self.catalog.next_vector_id()?;
        for batch in pending.chunks(self.config.batch_size) {
            match self.ingest_batch(batch, next_id, &mut report) {
                Ok(advanced) => next_id = advanced,
                Err(err) => {
                    self.persist_committed(report.indexed);
                    return Err(err);
                }
            }
            report.batches += 1;
        }

        if report.indexed > 0 {
            self.index.persist(&self.config.index_path())?;
        }

        info!(
            target: "framedex::ingest",
            folder = %folder.display(),
            discovered = report.discovered,
            skipped_existing = report.skipped_existing,
            unreadable = report.unreadable,
            indexed = report.indexed,
            batches = report.batches,
            "ingest complete"
        );
        Ok(report)
    }

    /// Embeds and commits one batch, returning the next free vector id.
    fn ingest_batch(
        &mut self,
        batch: &[(PathBuf, String)],
        mut next_id: VectorId,
        report: &mut IngestReport,
    ) -> EngineResult<VectorId> {
        let mut images = Vec::with_capacity(batch.len());
        let mut names = Vec::with_capacity(batch.len());
        for (path, name) in batch {
            match fs::read(path) {
                Ok(bytes) => {
                    images.push(bytes);
                    names.push(name.clone());
                }
                Err(err) => {
                    warn!(
                        target: "framedex::ingest",
                        file = %path.display(),
                        error = %err,
                        "skipping unreadable frame"
                    );
                    report.unreadable += 1;
                }
            }
        }
        if images.is_empty() {
            return Ok(next_id);
        }

        let mut embeddings = self.embedder.embed_images(&images)?;
        if embeddings.len() != images.len() {
            return Err(EngineError::EmbeddingCountMismatch {
                expected: images.len(),
                got: embeddings.len(),
            });
        }
        for embedding in &mut embeddings {
            l2_normalize(embedding);
        }

        let mut ids = Vec::with_capacity(names.len());
        for _ in 0..names.len() {
            ids.push(next_id);
            next_id = next_id.next();
        }

        let mut rows = Vec::with_capacity(names.len());
        for (id, name) in ids.iter().zip(&names) {
            let (video_name, timestamp) = match FrameName::parse(name) {
                Ok(parsed) => {
                    let timestamp = parsed.timestamp();
                    (parsed.video_name, timestamp)
                }
                Err(err) => {
                    warn!(
                        target: "framedex::ingest",
                        file = %name,
                        error = %err,
                        "unparseable frame name, cataloguing under file stem"
                    );
                    (file_stem(name), 0.0)
                }
            };
            rows.push(NewFrame {
                vector_id: *id,
                video_name,
                timestamp,
                filename: name.clone(),
            });
        }

        self.index.add_with_ids(&embeddings, &ids)?;
        if let Err(err) = self.catalog.insert_frames(&rows) {
            // Keep the bijection: a frame must never be searchable
            // without a catalog row.
            self.index.remove_ids(&ids);
            return Err(err.into());
        }

        report.indexed += ids.len();
        debug!(
            target: "framedex::ingest",
            batch = ids.len(),
            "embedded and catalogued batch"
        );
        Ok(next_id)
    }

    /// Rewrites the snapshot so batches committed before a failure stay
    /// searchable after a restart. Failures here are logged, not
    /// returned, to keep the original error.
    fn persist_committed(&self, indexed: usize) {
        if indexed == 0 {
            return;
        }
        if let Err(err) = self.index.persist(&self.config.index_path()) {
            error!(
                target: "framedex::ingest",
                error = %err,
                "failed to persist index after aborted ingest"
            );
        }
    }
}

/// Lists frame image files directly under `folder`, sorted by filename.
fn discover_frames(folder: &Path) -> EngineResult<Vec<(PathBuf, String)>> {
    if !folder.is_dir() {
        return Err(EngineError::NotAFolder(folder.to_path_buf()));
    }
    let mut frames = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !has_frame_extension(&path) {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) => frames.push((path.clone(), name.to_string())),
            None => {
                warn!(
                    target: "framedex::ingest",
                    file = %path.display(),
                    "skipping frame with non-UTF-8 name"
                );
            }
        }
    }
    frames.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(frames)
}

/// Portion of `name` before the final extension.
fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
        .to_string()
}
