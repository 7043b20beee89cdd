//! Video removal.

use std::path::Path;

use framedex_core::{video_prefix, VectorId};
use serde::Serialize;
use tracing::info;

use crate::engine::Engine;
use crate::error::EngineResult;

/// Counters describing one removal run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemoveReport {
    /// Frames deleted from the index and the catalog.
    pub frames_removed: usize,
    /// Catalog videos left without frames and swept away.
    pub videos_removed: u64,
}

impl Engine {
    /// Removes every indexed frame extracted from `video`.
    ///
    /// `video` may be a bare name or a path; only the file stem is used,
    /// so `remove_video("footage/trip.mp4")` and `remove_video("trip")`
    /// target the same frames. A video with no indexed frames is a
    /// logged no-op, not an error.
    ///
    /// The index is updated and its snapshot rewritten before the
    /// catalog rows go away. A crash in between leaves rows describing
    /// unsearchable frames, which the next open deletes.
    pub fn remove_video(&mut self, video: &str) -> EngineResult<RemoveReport> {
        let stem = video_stem(video);
        let prefix = video_prefix(stem);
        let matches = self.catalog.frames_with_filename_prefix(&prefix)?;
        if matches.is_empty() {
            info!(
                target: "framedex::remove",
                video = %stem,
                "no indexed frames for video, nothing to remove"
            );
            return Ok(RemoveReport::default());
        }

        let ids: Vec<VectorId> = matches.iter().map(|(id, _)| *id).collect();
        let videos_before = self.catalog.video_count()?;

        self.index.remove_ids(&ids);
        self.index.persist(&self.config.index_path())?;
        let frames_removed = self.catalog.delete_frames(&ids)?;
        let videos_removed = videos_before - self.catalog.video_count()?;

        info!(
            target: "framedex::remove",
            video = %stem,
            frames_removed,
            videos_removed,
            "removed video"
        );
        Ok(RemoveReport {
            frames_removed,
            videos_removed,
        })
    }
}

/// File stem of a video argument, tolerating bare names.
fn video_stem(video: &str) -> &str {
    Path::new(video)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(video)
}
