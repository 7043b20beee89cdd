//! SQLite schema for the frame catalog.

/// Applied on every open; `IF NOT EXISTS` keeps repeated opens idempotent.
///
/// `videos.path` holds the source video's file stem and is unique, so
/// re-ingesting frames of a known video resolves to the same row.
/// `frames.vector_id` is the same id the vector index uses; it is the
/// bridge between the two stores and is never reused.
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS videos (
    video_id INTEGER PRIMARY KEY,
    path     TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS frames (
    vector_id INTEGER PRIMARY KEY,
    video_id  INTEGER NOT NULL,
    timestamp REAL NOT NULL,
    filename  TEXT NOT NULL,
    FOREIGN KEY (video_id) REFERENCES videos (video_id)
);

CREATE INDEX IF NOT EXISTS idx_frames_video ON frames (video_id);
CREATE INDEX IF NOT EXISTS idx_frames_filename ON frames (filename);
";
