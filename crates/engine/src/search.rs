//! Temporally deduplicated retrieval.
//!
//! A raw index query over-fetches `top_k * overfetch_factor` candidates,
//! then a greedy pass walks them in score order and drops any frame
//! whose timestamp lands too close to an already accepted frame of the
//! same video. Near-duplicate neighboring frames collapse to the single
//! best-scoring one while distinct moments survive.

use std::collections::HashMap;

use framedex_core::{l2_normalize, VideoId};
use serde::Serialize;
use tracing::{debug, info};

use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};

/// One retrieval result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// Inner-product similarity between the query and the frame.
    pub score: f32,
    /// Seconds from the start of the source video.
    pub timestamp: f64,
    /// Frame image filename as ingested.
    pub filename: String,
}

impl Engine {
    /// Returns the best-scoring frames for `query`, at most `top_k`.
    ///
    /// With a positive `time_threshold`, frames of the same video whose
    /// timestamps differ by less than the threshold collapse to the
    /// best-scoring one. A zero or negative threshold disables
    /// deduplication. Fewer than `top_k` hits come back when the
    /// candidate pool runs dry.
    pub fn search(
        &self,
        query: &str,
        top_k: usize,
        time_threshold: f64,
    ) -> EngineResult<Vec<SearchHit>> {
        if top_k < 1 {
            return Err(EngineError::InvalidTopK { got: top_k });
        }
        if self.index.is_empty() {
            debug!(target: "framedex::search", "index is empty");
            return Ok(Vec::new());
        }

        let mut query_vector = self.embedder.embed_text(query)?;
        l2_normalize(&mut query_vector);

        let fetch = top_k.saturating_mul(self.config.overfetch_factor);
        let candidates = self.index.search(&query_vector, fetch)?;

        let mut accepted: HashMap<VideoId, Vec<f64>> = HashMap::new();
        let mut hits = Vec::with_capacity(top_k);
        for (vector_id, score) in candidates {
            let Some(meta) = self.catalog.resolve_frame(vector_id)? else {
                // Index hit without metadata. Harmless leftover from an
                // interrupted removal; reconciliation cleans it up on
                // the next open.
                debug!(
                    target: "framedex::search",
                    id = %vector_id,
                    "skipping vector with no catalog row"
                );
                continue;
            };

            let timestamps = accepted.entry(meta.video_id).or_default();
            if within_threshold(timestamps, meta.timestamp, time_threshold) {
                continue;
            }
            timestamps.push(meta.timestamp);

            hits.push(SearchHit {
                score,
                timestamp: meta.timestamp,
                filename: meta.filename,
            });
            if hits.len() == top_k {
                break;
            }
        }

        info!(
            target: "framedex::search",
            requested = top_k,
            results = hits.len(),
            top_score = hits.first().map(|h| f64::from(h.score)),
            "search complete"
        );
        Ok(hits)
    }
}

/// Whether `timestamp` falls strictly within `threshold` seconds of any
/// accepted timestamp. A zero or negative threshold never matches.
fn within_threshold(accepted: &[f64], timestamp: f64, threshold: f64) -> bool {
    accepted
        .iter()
        .any(|&t| (t - timestamp).abs() < threshold)
}
