//! Frame metadata catalog backed by SQLite
//!
//! The catalog is the durable record of what the index is supposed to
//! contain: one row per source video and one row per indexed frame, keyed
//! by the same vector id the index uses. Vector id allocation reads the
//! catalog's maximum, never the index size, so ids stay monotonic across
//! restarts and deletions.

pub mod error;
pub mod schema;
pub mod store;

pub use error::{CatalogError, CatalogResult};
pub use store::{Catalog, FrameMeta, NewFrame};
