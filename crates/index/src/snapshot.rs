//! Index snapshot persistence.
//!
//! Layout: 4 magic bytes, a u32 LE format version, a u32 LE header length,
//! a MessagePack header (dimension, row count), then one row per live
//! vector in ascending id order: i64 LE id followed by `dimension` f32 LE
//! values. Rows are written compacted, so free slots never reach disk.
//!
//! Writes go to a temp file, fsync, then rename over the target; a reader
//! sees either the old snapshot or the new one, never a torn write. The
//! catalog is the durable record of what should exist, so a snapshot that
//! fails to decode is reported as [`LoadOutcome::Corrupt`] and the caller
//! starts empty rather than guessing.

use std::io::{self, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use framedex_core::VectorId;

use crate::error::{IndexError, IndexResult};
use crate::index::FrameIndex;

/// Magic bytes for index snapshots
const SNAPSHOT_MAGIC: &[u8; 4] = b"FDIX";
/// Current snapshot format version
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct SnapshotHeader {
    dimension: u32,
    count: u64,
}

/// What loading a snapshot path produced.
///
/// Callers must branch: a fresh deployment (`NotFound`) and a damaged file
/// (`Corrupt`) both end in an empty index, but only the latter deserves a
/// warning and a catalog reconcile.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Snapshot decoded cleanly.
    Loaded(FrameIndex),
    /// No snapshot file at the given path.
    NotFound,
    /// The file exists but could not be read or decoded.
    Corrupt {
        /// Human-readable decode failure.
        reason: String,
    },
}

impl FrameIndex {
    /// Write a snapshot of the live vectors to `path` atomically.
    pub fn persist(&self, path: &Path) -> IndexResult<()> {
        let dir = path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(dir)?;

        let header = SnapshotHeader {
            dimension: self.dimension() as u32,
            count: self.len() as u64,
        };
        let header_bytes =
            rmp_serde::to_vec(&header).map_err(|e| IndexError::Encode(e.to_string()))?;

        let tmp_path = path.with_extension("index.tmp");
        {
            let file = std::fs::File::create(&tmp_path)?;
            let mut w = io::BufWriter::new(file);
            w.write_all(SNAPSHOT_MAGIC)?;
            w.write_u32::<LittleEndian>(SNAPSHOT_VERSION)?;
            w.write_u32::<LittleEndian>(header_bytes.len() as u32)?;
            w.write_all(&header_bytes)?;
            for (id, vector) in self.iter() {
                w.write_i64::<LittleEndian>(id.as_i64())?;
                for &x in vector {
                    w.write_f32::<LittleEndian>(x)?;
                }
            }
            let file = w.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp_path, path)?;
        tracing::debug!(
            target: "framedex::index",
            path = %path.display(),
            vectors = self.len(),
            "snapshot written"
        );
        Ok(())
    }

    /// Load a snapshot from `path`.
    pub fn load(path: &Path) -> LoadOutcome {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return LoadOutcome::NotFound,
            Err(e) => {
                return LoadOutcome::Corrupt {
                    reason: e.to_string(),
                }
            }
        };
        match decode(&bytes) {
            Ok(index) => LoadOutcome::Loaded(index),
            Err(reason) => LoadOutcome::Corrupt { reason },
        }
    }
}

fn decode(bytes: &[u8]) -> Result<FrameIndex, String> {
    let mut cursor = io::Cursor::new(bytes);

    let mut magic = [0u8; 4];
    cursor
        .read_exact(&mut magic)
        .map_err(|_| "snapshot too small".to_string())?;
    if &magic != SNAPSHOT_MAGIC {
        return Err("bad snapshot magic".to_string());
    }

    let version = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| "snapshot too small".to_string())?;
    if version != SNAPSHOT_VERSION {
        return Err(format!("unsupported snapshot version {}", version));
    }

    let header_len = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| "snapshot too small".to_string())? as usize;
    let mut header_bytes = vec![0u8; header_len];
    cursor
        .read_exact(&mut header_bytes)
        .map_err(|_| "snapshot header truncated".to_string())?;
    let header: SnapshotHeader =
        rmp_serde::from_slice(&header_bytes).map_err(|e| format!("header decode error: {}", e))?;

    let dimension = header.dimension as usize;
    let mut index = FrameIndex::new(dimension);
    let mut vector = vec![0.0f32; dimension];
    let mut prev_id: Option<i64> = None;
    for _ in 0..header.count {
        let id = cursor
            .read_i64::<LittleEndian>()
            .map_err(|_| "snapshot row truncated".to_string())?;
        cursor
            .read_f32_into::<LittleEndian>(&mut vector)
            .map_err(|_| "snapshot row truncated".to_string())?;
        // Rows are written in ascending id order; anything else means the
        // payload is damaged (and the check rejects duplicate ids too).
        if prev_id.is_some_and(|prev| prev >= id) {
            return Err("snapshot ids out of order".to_string());
        }
        prev_id = Some(id);
        index.push_row(VectorId::new(id), &vector);
    }
    if cursor.position() != bytes.len() as u64 {
        return Err("trailing bytes after snapshot rows".to_string());
    }
    Ok(index)
}
