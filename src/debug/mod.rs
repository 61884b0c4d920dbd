//! Debug bundle writer for inspecting queries and raw aggregate payloads.

use std::fs::create_dir_all;
use std::path::PathBuf;

use chrono::Local;

use crate::domain::{AggregateResult, FilterSet, MONTH_AXIS};
use crate::error::AppError;

/// Dump the last filter set, built query string, and aggregate payload to a
/// timestamped markdown file under `debug/`.
pub fn write_debug_bundle(
    filters: &FilterSet,
    query: &str,
    agg: &AggregateResult,
) -> Result<PathBuf, AppError> {
    let dir = PathBuf::from("debug");
    create_dir_all(&dir)
        .map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("cdash_debug_{ts}.md"));

    let mut out = String::new();
    out.push_str("# cdash debug bundle\n");
    out.push_str(&format!("- generated: {}\n", Local::now().to_rfc3339()));
    out.push_str(&format!("- types: {}\n", filters.types.join(", ")));
    out.push_str(&format!("- areas: {}\n", filters.areas.join(", ")));
    out.push_str(&format!(
        "- months: {} .. {}\n",
        filters.start_month, filters.end_month
    ));
    out.push_str(&format!("- query: `{query}`\n"));

    out.push_str("\n## month_counts (axis order)\n");
    for month in MONTH_AXIS {
        let count = agg.month_counts.get(month).copied().unwrap_or(0);
        out.push_str(&format!("- {month}: {count}\n"));
    }
    let dropped: Vec<&str> = agg
        .month_counts
        .keys()
        .filter(|month| !MONTH_AXIS.contains(&month.as_str()))
        .map(|month| month.as_str())
        .collect();
    if !dropped.is_empty() {
        out.push_str(&format!("- dropped (out of axis): {}\n", dropped.join(", ")));
    }

    out.push_str("\n## age_buckets\n");
    for (label, count) in agg.age_buckets.iter() {
        out.push_str(&format!("- {label}: {count}\n"));
    }

    out.push_str("\n## sex_counts\n");
    for (label, count) in agg.sex_counts.iter() {
        out.push_str(&format!("- {label}: {count}\n"));
    }

    std::fs::write(&path, out)
        .map_err(|e| AppError::new(4, format!("Failed to write debug bundle: {e}")))?;

    Ok(path)
}
