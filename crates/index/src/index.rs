//! In-memory index structure.
//!
//! Embeddings live in one contiguous `Vec<f32>` for cache-friendly scoring.
//! A `BTreeMap` from id to storage slot is the sole source of truth for
//! which vectors are live, and its ordered iteration keeps search results
//! deterministic. Deleted slots are reused; ids never are (callers allocate
//! them from the catalog).

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use framedex_core::{dot, VectorId};

use crate::error::{IndexError, IndexResult};

/// Exact inner-product index over frame embeddings.
#[derive(Debug, Clone)]
pub struct FrameIndex {
    /// Embedding width, fixed at creation.
    dimension: usize,

    /// Contiguous embedding storage.
    /// Each vector occupies `dimension` consecutive f32 values.
    data: Vec<f32>,

    /// VectorId -> offset in `data` (in floats).
    ///
    /// BTreeMap keeps iteration in id order; HashMap would make search
    /// results nondeterministic under score ties.
    id_to_slot: BTreeMap<VectorId, usize>,

    /// Free list of deleted storage slots.
    ///
    /// Slots are reused so repeated remove/ingest cycles do not grow the
    /// heap without bound. Ids are never reused.
    free_slots: Vec<usize>,
}

impl FrameIndex {
    /// Create an empty index for `dimension`-wide embeddings.
    pub fn new(dimension: usize) -> Self {
        FrameIndex {
            dimension,
            data: Vec::new(),
            id_to_slot: BTreeMap::new(),
            free_slots: Vec::new(),
        }
    }

    /// Embedding width this index accepts.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of live vectors.
    pub fn len(&self) -> usize {
        self.id_to_slot.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.id_to_slot.is_empty()
    }

    /// Whether `id` is live.
    pub fn contains(&self, id: VectorId) -> bool {
        self.id_to_slot.contains_key(&id)
    }

    /// Embedding for `id`, if live.
    pub fn get(&self, id: VectorId) -> Option<&[f32]> {
        let slot = *self.id_to_slot.get(&id)?;
        Some(&self.data[slot..slot + self.dimension])
    }

    /// All live ids, ascending.
    pub fn ids(&self) -> impl Iterator<Item = VectorId> + '_ {
        self.id_to_slot.keys().copied()
    }

    /// Iterate live vectors in id order.
    pub fn iter(&self) -> impl Iterator<Item = (VectorId, &[f32])> {
        self.id_to_slot.iter().map(|(&id, &slot)| {
            let vector = &self.data[slot..slot + self.dimension];
            (id, vector)
        })
    }

    /// Add a batch of vectors under caller-assigned ids.
    ///
    /// All-or-nothing: lengths, dimensions and id collisions are checked
    /// before anything is written, so a failed batch leaves the index
    /// untouched.
    pub fn add_with_ids(&mut self, vectors: &[Vec<f32>], ids: &[VectorId]) -> IndexResult<()> {
        if vectors.len() != ids.len() {
            return Err(IndexError::LengthMismatch {
                vectors: vectors.len(),
                ids: ids.len(),
            });
        }
        for vector in vectors {
            if vector.len() != self.dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: self.dimension,
                    got: vector.len(),
                });
            }
        }
        let mut pending = BTreeSet::new();
        for id in ids {
            if self.id_to_slot.contains_key(id) || !pending.insert(*id) {
                return Err(IndexError::IdCollision { id: id.as_i64() });
            }
        }

        for (id, vector) in ids.iter().zip(vectors) {
            let slot = match self.free_slots.pop() {
                Some(slot) => {
                    self.data[slot..slot + self.dimension].copy_from_slice(vector);
                    slot
                }
                None => {
                    let slot = self.data.len();
                    self.data.extend_from_slice(vector);
                    slot
                }
            };
            self.id_to_slot.insert(*id, slot);
        }
        Ok(())
    }

    /// Remove ids, returning how many were actually live.
    ///
    /// Absent ids are skipped, so replaying a removal is harmless.
    pub fn remove_ids(&mut self, ids: &[VectorId]) -> usize {
        let mut removed = 0;
        for id in ids {
            if let Some(slot) = self.id_to_slot.remove(id) {
                self.free_slots.push(slot);
                self.data[slot..slot + self.dimension].fill(0.0);
                removed += 1;
            }
        }
        removed
    }

    /// Exact search: inner product of `query` against every live vector,
    /// best `k` returned as `(id, score)` sorted by score descending, ties
    /// by ascending id.
    pub fn search(&self, query: &[f32], k: usize) -> IndexResult<Vec<(VectorId, f32)>> {
        if query.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                got: query.len(),
            });
        }
        if k == 0 || self.id_to_slot.is_empty() {
            return Ok(Vec::new());
        }

        let mut results: Vec<(VectorId, f32)> = self
            .iter()
            .map(|(id, vector)| (id, dot(query, vector)))
            .collect();

        // Id tie-break keeps equal-score results in insertion order.
        results.sort_by(|(id_a, score_a), (id_b, score_b)| {
            score_b
                .partial_cmp(score_a)
                .unwrap_or(Ordering::Equal)
                .then_with(|| id_a.cmp(id_b))
        });
        results.truncate(k);
        Ok(results)
    }

    /// Append a row without collision checks. Snapshot decode only, which
    /// validates ids itself.
    pub(crate) fn push_row(&mut self, id: VectorId, vector: &[f32]) {
        debug_assert_eq!(vector.len(), self.dimension);
        let slot = self.data.len();
        self.data.extend_from_slice(vector);
        self.id_to_slot.insert(id, slot);
    }
}
