//! Catalog over a single SQLite connection.
//!
//! ## Design
//!
//! One `Connection` per catalog, no pooling: the engine holds exactly one
//! catalog and serializes writers itself. Multi-row mutations run inside a
//! SQLite transaction, so a batch either commits whole or leaves nothing
//! behind. Reads are plain queries.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use framedex_core::{VectorId, VideoId};

use crate::error::CatalogResult;
use crate::schema::SCHEMA_SQL;

/// Metadata row resolved for one vector id.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMeta {
    /// Video the frame belongs to.
    pub video_id: VideoId,
    /// Seconds from the start of the video.
    pub timestamp: f64,
    /// Frame image filename, unique per indexed frame.
    pub filename: String,
}

/// One frame row to insert, paired with the video it belongs to.
///
/// The video is referenced by name rather than id so that the
/// insert-if-absent of the video row happens inside the same transaction
/// as the frame rows.
#[derive(Debug, Clone)]
pub struct NewFrame {
    /// Vector id allocated by the ingestion run.
    pub vector_id: VectorId,
    /// File stem of the source video.
    pub video_name: String,
    /// Seconds from the start of the video.
    pub timestamp: f64,
    /// Frame image filename.
    pub filename: String,
}

/// Frame metadata catalog.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Open (or create) the catalog at `path` and apply the schema.
    pub fn open(path: &Path) -> CatalogResult<Self> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", 1)?;
        conn.execute_batch(SCHEMA_SQL)?;
        tracing::debug!(target: "framedex::catalog", path = %path.display(), "catalog open");
        Ok(Catalog { conn })
    }

    /// Find or create the video row for `name`, returning its id.
    ///
    /// Repeat-safe: INSERT OR IGNORE followed by a lookup.
    pub fn get_or_insert_video(&self, name: &str) -> CatalogResult<VideoId> {
        self.conn.execute(
            "INSERT OR IGNORE INTO videos (path) VALUES (?1)",
            params![name],
        )?;
        let id: i64 = self.conn.query_row(
            "SELECT video_id FROM videos WHERE path = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(VideoId::new(id))
    }

    /// Highest vector id ever recorded, or `None` when no frames exist.
    ///
    /// This is what id allocation reads. Deleting rows can lower the
    /// maximum, which is fine: uniqueness only has to hold against rows
    /// that still exist.
    pub fn max_vector_id(&self) -> CatalogResult<Option<VectorId>> {
        let max: Option<i64> =
            self.conn
                .query_row("SELECT MAX(vector_id) FROM frames", [], |row| row.get(0))?;
        Ok(max.map(VectorId::new))
    }

    /// First id a new ingestion run may assign: `max + 1`, or 0 on an
    /// empty catalog.
    pub fn next_vector_id(&self) -> CatalogResult<VectorId> {
        Ok(self
            .max_vector_id()?
            .map_or(VectorId::new(0), |id| id.next()))
    }

    /// Every frame filename already indexed. Used to skip files on
    /// re-ingestion.
    pub fn existing_filenames(&self) -> CatalogResult<HashSet<String>> {
        let mut stmt = self.conn.prepare("SELECT filename FROM frames")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut names = HashSet::new();
        for name in rows {
            names.insert(name?);
        }
        Ok(names)
    }

    /// Insert a batch of frame rows in one transaction.
    ///
    /// Video rows are created on first reference. A `vector_id` collision
    /// aborts the whole batch; under the allocation protocol it means a
    /// bug upstream, not bad input.
    pub fn insert_frames(&mut self, frames: &[NewFrame]) -> CatalogResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut video_ids: HashMap<&str, i64> = HashMap::new();
            for frame in frames {
                let video_id = match video_ids.get(frame.video_name.as_str()) {
                    Some(&id) => id,
                    None => {
                        tx.execute(
                            "INSERT OR IGNORE INTO videos (path) VALUES (?1)",
                            params![frame.video_name],
                        )?;
                        let id: i64 = tx.query_row(
                            "SELECT video_id FROM videos WHERE path = ?1",
                            params![frame.video_name],
                            |row| row.get(0),
                        )?;
                        video_ids.insert(frame.video_name.as_str(), id);
                        id
                    }
                };
                tx.execute(
                    "INSERT INTO frames (vector_id, video_id, timestamp, filename)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        frame.vector_id.as_i64(),
                        video_id,
                        frame.timestamp,
                        frame.filename
                    ],
                )?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Resolve the metadata row for one vector id.
    ///
    /// `None` is a soft miss: the index knows an id the catalog does not.
    /// Callers skip those, they never fail on them.
    pub fn resolve_frame(&self, id: VectorId) -> CatalogResult<Option<FrameMeta>> {
        let meta = self
            .conn
            .query_row(
                "SELECT video_id, timestamp, filename FROM frames WHERE vector_id = ?1",
                params![id.as_i64()],
                |row| {
                    Ok(FrameMeta {
                        video_id: VideoId::new(row.get(0)?),
                        timestamp: row.get(1)?,
                        filename: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(meta)
    }

    /// All frame ids belonging to one video, ascending.
    pub fn frames_for_video(&self, video_id: VideoId) -> CatalogResult<Vec<VectorId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT vector_id FROM frames WHERE video_id = ?1 ORDER BY vector_id")?;
        let rows = stmt.query_map(params![video_id.as_i64()], |row| {
            Ok(VectorId::new(row.get(0)?))
        })?;
        let mut ids = Vec::new();
        for id in rows {
            ids.push(id?);
        }
        Ok(ids)
    }

    /// Frames whose filename starts with `prefix`, with the video each
    /// belongs to.
    ///
    /// The prefix is matched literally: `%`, `_` and `\` are escaped before
    /// the LIKE, since video stems routinely contain underscores.
    pub fn frames_with_filename_prefix(
        &self,
        prefix: &str,
    ) -> CatalogResult<Vec<(VectorId, VideoId)>> {
        let pattern = format!("{}%", escape_like(prefix));
        let mut stmt = self.conn.prepare(
            "SELECT vector_id, video_id FROM frames
             WHERE filename LIKE ?1 ESCAPE '\\'
             ORDER BY vector_id",
        )?;
        let rows = stmt.query_map(params![pattern], |row| {
            Ok((VectorId::new(row.get(0)?), VideoId::new(row.get(1)?)))
        })?;
        let mut out = Vec::new();
        for pair in rows {
            out.push(pair?);
        }
        Ok(out)
    }

    /// Delete the given frame rows, then any videos left without frames.
    /// One transaction; returns the number of frame rows deleted.
    ///
    /// Absent ids are skipped, so replaying a deletion is harmless.
    pub fn delete_frames(&mut self, ids: &[VectorId]) -> CatalogResult<usize> {
        let tx = self.conn.transaction()?;
        let mut deleted = 0;
        {
            let mut stmt = tx.prepare("DELETE FROM frames WHERE vector_id = ?1")?;
            for id in ids {
                deleted += stmt.execute(params![id.as_i64()])?;
            }
        }
        tx.execute(
            "DELETE FROM videos WHERE video_id NOT IN (SELECT DISTINCT video_id FROM frames)",
            [],
        )?;
        tx.commit()?;
        Ok(deleted)
    }

    /// Every frame id in the catalog, ascending. Reconciliation input.
    pub fn frame_ids(&self) -> CatalogResult<Vec<VectorId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT vector_id FROM frames ORDER BY vector_id")?;
        let rows = stmt.query_map([], |row| Ok(VectorId::new(row.get(0)?)))?;
        let mut ids = Vec::new();
        for id in rows {
            ids.push(id?);
        }
        Ok(ids)
    }

    /// Number of video rows.
    pub fn video_count(&self) -> CatalogResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM videos", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Number of frame rows.
    pub fn frame_count(&self) -> CatalogResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM frames", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Escape LIKE wildcards so a prefix matches literally.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
