//! Embedding service seam.
//!
//! The engine never talks to a model runtime directly. It embeds frames
//! and queries through the [`Embedder`] trait, so production code can
//! supply a real vision-language backend while tests and the bundled CLI
//! run against [`MockEmbedder`].

use framedex_core::l2_normalize;
use thiserror::Error;

/// Result alias for embedding operations.
pub type EmbedResult<T> = Result<T, EmbedError>;

/// Errors surfaced by an embedding backend.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// The backend failed to produce embeddings.
    #[error("embedding backend error: {0}")]
    Backend(String),
}

/// Produces fixed-dimension embeddings for frame images and text queries.
///
/// Images and text must land in the same vector space: a query embedding
/// is compared against frame embeddings by inner product. Implementations
/// return vectors of exactly [`Embedder::dimension`] components.
pub trait Embedder: Send + Sync {
    /// Dimension of every vector this backend produces.
    fn dimension(&self) -> usize;

    /// Embeds a batch of encoded images, one vector per input.
    fn embed_images(&self, images: &[Vec<u8>]) -> EmbedResult<Vec<Vec<f32>>>;

    /// Embeds a text query.
    fn embed_text(&self, text: &str) -> EmbedResult<Vec<f32>>;
}

/// Deterministic embedder with no model runtime behind it.
///
/// Every input hashes to a repeatable pseudo-random unit vector, so the
/// same bytes always embed identically within a build. Text inputs of the
/// form `vec:1.0,0.0,...` bypass hashing and embed as the listed
/// components (padded with zeros, then normalized), which lets fixtures
/// plant exact geometry. Scores are meaningless as relevance; the point
/// is exercising the full pipeline without a model.
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    dimension: usize,
}

impl MockEmbedder {
    /// Creates a mock backend producing vectors of `dimension` components.
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn embed_bytes(&self, bytes: &[u8]) -> Vec<f32> {
        let mut state = splitmix64(fnv1a(bytes));
        let mut vector = Vec::with_capacity(self.dimension);
        for _ in 0..self.dimension {
            state = splitmix64(state);
            // Map the top 24 bits onto [-1, 1).
            let unit = (state >> 40) as f32 / (1u32 << 23) as f32;
            vector.push(unit - 1.0);
        }
        l2_normalize(&mut vector);
        vector
    }

    fn embed_planted(&self, spec: &str) -> Vec<f32> {
        let mut vector: Vec<f32> = spec
            .split(',')
            .filter_map(|part| part.trim().parse::<f32>().ok())
            .collect();
        vector.resize(self.dimension, 0.0);
        l2_normalize(&mut vector);
        vector
    }
}

impl Embedder for MockEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_images(&self, images: &[Vec<u8>]) -> EmbedResult<Vec<Vec<f32>>> {
        Ok(images
            .iter()
            .map(|bytes| match planted_spec(bytes) {
                Some(spec) => self.embed_planted(spec),
                None => self.embed_bytes(bytes),
            })
            .collect())
    }

    fn embed_text(&self, text: &str) -> EmbedResult<Vec<f32>> {
        Ok(match text.strip_prefix("vec:") {
            Some(spec) => self.embed_planted(spec),
            None => self.embed_bytes(text.as_bytes()),
        })
    }
}

fn planted_spec(bytes: &[u8]) -> Option<&str> {
    std::str::from_utf8(bytes).ok()?.strip_prefix("vec:")
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
