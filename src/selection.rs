//! Trace-driven feature selection

use crate::trace::{FeatureLevelEntry, FeatureLevelTrace};
use serde::{Deserialize, Serialize};

/// How a downstream consumer picks a level out of a trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SelectionRule {
    /// The level whose feature set has exactly this size
    BySize(usize),
    /// The smallest level whose error does not exceed this threshold
    ByThreshold(f64),
}

/// Smallest feature set whose error is within `threshold`.
///
/// Qualifying levels are stably ordered by error ascending, then the first
/// strictly smaller set wins. `None` when nothing qualifies.
pub fn select_minimal(trace: &FeatureLevelTrace, threshold: f64) -> Option<&FeatureLevelEntry> {
    let mut qualifying: Vec<&FeatureLevelEntry> = trace
        .levels()
        .iter()
        .filter(|entry| entry.error <= threshold)
        .collect();
    qualifying.sort_by(|a, b| {
        a.error
            .partial_cmp(&b.error)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut best: Option<&FeatureLevelEntry> = None;
    for entry in qualifying {
        if best.map_or(true, |b| entry.size() < b.size()) {
            best = Some(entry);
        }
    }
    best
}

/// Columns a downstream consumer should keep for the selected level.
///
/// Returns the selected level's feature set, plus the target column iff
/// requested; empty when no level matches the rule.
pub fn included_columns(
    trace: &FeatureLevelTrace,
    rule: SelectionRule,
    include_target: bool,
) -> Vec<String> {
    let entry = match rule {
        SelectionRule::BySize(size) => trace.level_of_size(size),
        SelectionRule::ByThreshold(threshold) => select_minimal(trace, threshold),
    };

    match entry {
        Some(entry) => {
            let mut columns = entry.features.clone();
            if include_target {
                columns.push(trace.target().to_string());
            }
            columns
        }
        None => Vec::new(),
    }
}
