use std::collections::BTreeMap;

use crate::ItemRecord;

/// Canonical five-way partition of raw item statuses.
///
/// Every raw status string classifies into exactly one group; unrecognized
/// strings classify as `Queued` so no item is ever dropped from the partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusGroup {
    Queued,
    InProgress,
    Done,
    Skipped,
    Error,
}

const QUEUED: &[&str] = &["queued", "pending", "waiting", "fetched", "encoded", "uploaded"];
const IN_PROGRESS: &[&str] = &["fetching", "encoding", "uploading", "verifying", "replacing"];
const DONE: &[&str] = &["completed", "replaced", "done", "verified"];
const SKIPPED: &[&str] = &["skipped"];
const ERROR: &[&str] = &["error", "failed"];

/// Statuses of items no longer outstanding for estimation purposes.
/// Broader than the Done/Skipped/Error groups: it also counts `verified`
/// items out without special-casing in-flight ones.
const DONE_EQUIVALENT: &[&str] = &[
    "completed", "replaced", "done", "skipped", "error", "failed", "verified",
];

/// Statuses of items the pipeline is actively working on.
const ACTIVE: &[&str] = &["fetching", "encoding", "uploading", "verifying", "replacing"];

/// Statuses of items staged and waiting for their next pipeline step.
const READY: &[&str] = &["fetched", "pending", "encoded", "uploaded"];

fn in_set(set: &[&str], raw: &str) -> bool {
    set.iter().any(|s| raw.eq_ignore_ascii_case(s))
}

impl StatusGroup {
    /// Classifies a raw status string, case-insensitively, first match wins.
    pub fn classify(raw: &str) -> StatusGroup {
        if in_set(QUEUED, raw) {
            StatusGroup::Queued
        } else if in_set(IN_PROGRESS, raw) {
            StatusGroup::InProgress
        } else if in_set(DONE, raw) {
            StatusGroup::Done
        } else if in_set(SKIPPED, raw) {
            StatusGroup::Skipped
        } else if in_set(ERROR, raw) {
            StatusGroup::Error
        } else {
            StatusGroup::Queued
        }
    }

    /// Display label for the group.
    pub fn label(self) -> &'static str {
        match self {
            StatusGroup::Queued => "Queued",
            StatusGroup::InProgress => "In Progress",
            StatusGroup::Done => "Done",
            StatusGroup::Skipped => "Skipped",
            StatusGroup::Error => "Error",
        }
    }
}

/// True when the item will not be processed further (estimator's terminal set).
pub(crate) fn is_done_equivalent(raw: &str) -> bool {
    in_set(DONE_EQUIVALENT, raw)
}

/// True when the pipeline is actively working on the item.
pub(crate) fn is_active(raw: &str) -> bool {
    in_set(ACTIVE, raw)
}

/// True when the item is staged, ready for its next pipeline step.
pub(crate) fn is_ready(raw: &str) -> bool {
    in_set(READY, raw)
}

/// Per-group item counts over a snapshot's files map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupCounts {
    pub queued: usize,
    pub in_progress: usize,
    pub done: usize,
    pub skipped: usize,
    pub error: usize,
}

impl GroupCounts {
    /// Tallies every item into its group; the five counts sum to `files.len()`.
    pub fn tally(files: &BTreeMap<String, ItemRecord>) -> GroupCounts {
        let mut counts = GroupCounts::default();
        for record in files.values() {
            match StatusGroup::classify(&record.status) {
                StatusGroup::Queued => counts.queued += 1,
                StatusGroup::InProgress => counts.in_progress += 1,
                StatusGroup::Done => counts.done += 1,
                StatusGroup::Skipped => counts.skipped += 1,
                StatusGroup::Error => counts.error += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.queued + self.in_progress + self.done + self.skipped + self.error
    }
}
