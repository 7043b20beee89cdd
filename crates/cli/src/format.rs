//! Report and hit formatting for human and JSON output.

use framedex_engine::{EngineInfo, IngestReport, RemoveReport, SearchHit};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Format an engine error.
pub fn format_error(err: &impl std::fmt::Display, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": format!("{}", err)
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Human => format!("(error) {}", err),
    }
}

pub fn format_ingest(report: &IngestReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_pretty_json(report),
        OutputMode::Human => format!(
            "Indexed {} frames in {} batches ({} discovered, {} already indexed, {} unreadable)",
            report.indexed,
            report.batches,
            report.discovered,
            report.skipped_existing,
            report.unreadable
        ),
    }
}

pub fn format_remove(report: &RemoveReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_pretty_json(report),
        OutputMode::Human => format!(
            "Removed {} frames ({} videos)",
            report.frames_removed, report.videos_removed
        ),
    }
}

pub fn format_search(hits: &[SearchHit], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_pretty_json(&hits),
        OutputMode::Human => {
            if hits.is_empty() {
                return "(no hits)".to_string();
            }
            hits.iter()
                .enumerate()
                .map(|(i, hit)| {
                    format!(
                        "{}) {:.4}  {:>9.2}s  {}",
                        i + 1,
                        hit.score,
                        hit.timestamp,
                        hit.filename
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

pub fn format_info(info: &EngineInfo, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_pretty_json(info),
        OutputMode::Human => format!(
            "videos:    {}\nframes:    {}\nvectors:   {}\ndimension: {}",
            info.videos, info.frames, info.vectors, info.dimension
        ),
    }
}

fn to_pretty_json(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}
