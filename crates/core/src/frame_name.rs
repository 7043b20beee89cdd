//! Frame filename codec
//!
//! Frame extractors emit image files named
//! `<video_name>_fps=<fps>_pts=<counter>.<ext>` (format v1), where
//! `video_name` is the source video's file stem, `fps` is the extraction
//! rate and `pts` is a zero-padded frame counter. The video name itself may
//! contain underscores (and even literal `_fps=` / `_pts=` sequences), so
//! decoding scans from the right: the last `_pts=` tag wins, then the last
//! `_fps=` tag in what remains.
//!
//! A frame's position in its video is `pts / fps` seconds.

use std::path::Path;

use thiserror::Error;

/// Image extensions the ingestion pipeline accepts.
pub const FRAME_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Decode failure for a frame filename.
///
/// Callers that ingest files treat these as recoverable: the frame is kept
/// with a zero timestamp and the file stem as its video name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameNameError {
    /// A required `_fps=` / `_pts=` tag is absent.
    #[error("missing '_{0}=' tag")]
    MissingTag(&'static str),

    /// The fps value is not a positive finite decimal.
    #[error("invalid fps value '{0}'")]
    InvalidFps(String),

    /// The pts value is not an unsigned integer.
    #[error("invalid pts value '{0}'")]
    InvalidPts(String),

    /// Nothing remains before the first tag.
    #[error("empty video name")]
    EmptyVideoName,
}

/// Decoded form of a frame filename.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameName {
    /// File stem of the source video. May contain underscores.
    pub video_name: String,
    /// Extraction rate in frames per second. Always finite and positive.
    pub fps: f64,
    /// Frame counter assigned by the extractor.
    pub pts: u64,
}

impl FrameName {
    /// Decode a frame filename.
    ///
    /// The extension (anything after the last `.`) is ignored; a name
    /// without one is accepted, since callers have already filtered on
    /// [`FRAME_EXTENSIONS`] where it matters.
    pub fn parse(file_name: &str) -> Result<FrameName, FrameNameError> {
        let stem = match file_name.rsplit_once('.') {
            Some((stem, _ext)) => stem,
            None => file_name,
        };
        let (rest, pts_str) = stem
            .rsplit_once("_pts=")
            .ok_or(FrameNameError::MissingTag("pts"))?;
        let (video_name, fps_str) = rest
            .rsplit_once("_fps=")
            .ok_or(FrameNameError::MissingTag("fps"))?;
        if video_name.is_empty() {
            return Err(FrameNameError::EmptyVideoName);
        }
        let pts: u64 = pts_str
            .parse()
            .map_err(|_| FrameNameError::InvalidPts(pts_str.to_string()))?;
        let fps: f64 = fps_str
            .parse()
            .map_err(|_| FrameNameError::InvalidFps(fps_str.to_string()))?;
        if !fps.is_finite() || fps <= 0.0 {
            return Err(FrameNameError::InvalidFps(fps_str.to_string()));
        }
        Ok(FrameName {
            video_name: video_name.to_string(),
            fps,
            pts,
        })
    }

    /// Encode back to a filename (always `.jpg`, the extractor's output
    /// format). The pts counter is zero-padded to eight digits.
    pub fn file_name(&self) -> String {
        format!(
            "{}_fps={}_pts={:08}.jpg",
            self.video_name, self.fps, self.pts
        )
    }

    /// Seconds from the start of the video: `pts / fps`.
    pub fn timestamp(&self) -> f64 {
        self.pts as f64 / self.fps
    }
}

/// LIKE-style prefix shared by every frame of a video: `<stem>_fps=`.
///
/// Matching on the prefix up to and including the tag keeps `holiday` from
/// matching frames of `holiday_2`.
pub fn video_prefix(video_stem: &str) -> String {
    format!("{}_fps=", video_stem)
}

/// Whether a path carries one of the accepted image extensions
/// (case-insensitive).
pub fn has_frame_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_ascii_lowercase();
            FRAME_EXTENSIONS.iter().any(|e| *e == lower)
        })
        .unwrap_or(false)
}
