//! Inner product and normalization helpers.
//!
//! Retrieval scores are plain inner products, so both stored embeddings
//! and query embeddings must be unit length for scores to behave like
//! cosine similarity.

/// Dot product (inner product)
///
/// Assumes both vectors are unit length; scores are unbounded otherwise.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "dimension mismatch in dot product");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// L2 norm (Euclidean length)
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale a vector to unit length in place.
///
/// Zero vectors are left untouched; they have no direction to preserve.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = l2_norm(v);
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
