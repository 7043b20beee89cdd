//! Retrieval Test Suite
//!
//! Score ordering, temporal deduplication, and candidate budgeting of
//! the search path. Frame fixtures carry planted embeddings so score
//! order is exact by construction.

#[path = "../common/mod.rs"]
mod common;
