use std::collections::BTreeSet;

use crate::status::{is_active, is_done_equivalent, is_ready, StatusGroup};
use crate::PipelineSnapshot;

/// Cap applied to the up-next preview unless the caller overrides it.
pub const DEFAULT_UP_NEXT_LIMIT: usize = 15;

/// Status shown for a priority item the pipeline does not know about yet.
pub const PRIORITY_SENTINEL: &str = "priority";

/// One row of the up-next preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpNextEntry {
    pub path: String,
    pub status: String,
    /// True when the item came from the operator's priority list.
    pub priority: bool,
    pub added: Option<String>,
}

/// Bounded, ordered preview of what the pipeline will process next.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpNextView {
    pub entries: Vec<UpNextEntry>,
    /// Queued-group items that exist beyond the shown entries.
    pub more_queued: usize,
}

/// Builds the up-next preview: operator priority overrides always surface
/// first, then items ordered by how close their pipeline stage is to running.
pub fn up_next(snapshot: &PipelineSnapshot, priority_paths: &[String], limit: usize) -> UpNextView {
    let mut entries = Vec::new();
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for path in priority_paths {
        if seen.contains(path.as_str()) {
            continue;
        }
        match snapshot.files.get(path) {
            Some(record) if is_done_equivalent(&record.status) || is_active(&record.status) => {}
            record => {
                entries.push(UpNextEntry {
                    path: path.clone(),
                    status: record
                        .map(|r| r.status.clone())
                        .unwrap_or_else(|| PRIORITY_SENTINEL.to_string()),
                    priority: true,
                    added: record.and_then(|r| r.added.clone()),
                });
                seen.insert(path.as_str());
            }
        }
    }

    for (path, record) in &snapshot.files {
        if seen.contains(path.as_str()) || !is_ready(&record.status) {
            continue;
        }
        entries.push(UpNextEntry {
            path: path.clone(),
            status: record.status.clone(),
            priority: false,
            added: record.added.clone().or_else(|| record.last_updated.clone()),
        });
    }

    // Priority items first; within each half, closest-to-running stage first,
    // then oldest added (missing timestamps sort first).
    entries.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| readiness_rank(&a.status).cmp(&readiness_rank(&b.status)))
            .then_with(|| a.added.cmp(&b.added))
    });
    entries.truncate(limit);

    let shown: BTreeSet<&str> = entries.iter().map(|e| e.path.as_str()).collect();
    let more_queued = snapshot
        .files
        .iter()
        .filter(|(path, record)| {
            StatusGroup::classify(&record.status) == StatusGroup::Queued
                && !shown.contains(path.as_str())
        })
        .count();

    UpNextView { entries, more_queued }
}

/// Pipeline-stage proxy for "closest to running". Lower runs sooner.
fn readiness_rank(status: &str) -> u8 {
    if status.eq_ignore_ascii_case("fetched") {
        0
    } else if status.eq_ignore_ascii_case("encoded") {
        1
    } else if status.eq_ignore_ascii_case("uploaded") {
        2
    } else if status.eq_ignore_ascii_case("pending") {
        3
    } else {
        4
    }
}
