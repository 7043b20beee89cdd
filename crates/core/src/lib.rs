//! Core types for framedex
//!
//! This crate defines the foundational types shared by the catalog, the
//! vector index and the engine:
//! - VideoId / VectorId: identifier newtypes (SQLite INTEGER width)
//! - FrameName: codec for the frame filename convention
//! - vecmath: inner product and normalization helpers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod frame_name;
pub mod ids;
pub mod vecmath;

pub use frame_name::{
    has_frame_extension, video_prefix, FrameName, FrameNameError, FRAME_EXTENSIONS,
};
pub use ids::{VectorId, VideoId};
pub use vecmath::{dot, l2_norm, l2_normalize};
