use chrono::{DateTime, NaiveDateTime};

use crate::status::{is_active, is_done_equivalent};
use crate::PipelineSnapshot;

/// Remaining-time estimate derived from a pipeline snapshot.
///
/// All figures are optional: with no completed items there is no average to
/// extrapolate from ("calculating", never zero), and with no outstanding
/// items there is nothing left to sum.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EtaReport {
    /// Mean encode time per completed item, when at least one completed.
    pub overall_avg_secs: Option<f64>,
    /// Items not yet in a done-equivalent status.
    pub outstanding: usize,
    /// Tier-aware sum of per-item cost estimates across outstanding items.
    pub total_remaining_secs: Option<f64>,
    /// The most recently updated in-flight item, if any.
    pub active: Option<ActiveItem>,
}

/// An item the pipeline is currently working on.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveItem {
    pub path: String,
    pub status: String,
    /// Seconds since the item's record was last touched, clamped to >= 0.
    /// `None` when the record has no parsable `last_updated`.
    pub elapsed_secs: Option<i64>,
    /// `max(0, overall_avg - elapsed)`, only for items mid-encode.
    pub remaining_secs: Option<f64>,
}

/// Estimates total remaining processing time, tier-aware.
///
/// A tier's own average is trusted only with two or more completed samples
/// and positive accumulated time; thinner tiers fall back to the overall
/// average so one outlier cannot swing the estimate.
pub fn estimate(snapshot: &PipelineSnapshot, now: NaiveDateTime) -> EtaReport {
    let stats = &snapshot.stats;
    let overall_avg_secs = if stats.completed > 0 && stats.total_encode_time_secs > 0.0 {
        Some(stats.total_encode_time_secs / stats.completed as f64)
    } else {
        None
    };

    let mut outstanding = 0usize;
    let mut total = 0.0f64;
    for record in snapshot.files.values() {
        if is_done_equivalent(&record.status) {
            continue;
        }
        outstanding += 1;
        if let Some(overall) = overall_avg_secs {
            let tier = record
                .res_key
                .as_deref()
                .and_then(|key| stats.tier_stats.get(key));
            total += match tier {
                Some(t) if t.completed >= 2 && t.total_encode_time_secs > 0.0 => {
                    t.total_encode_time_secs / t.completed as f64
                }
                _ => overall,
            };
        }
    }

    let total_remaining_secs = match (overall_avg_secs, outstanding) {
        (Some(_), n) if n > 0 => Some(total),
        _ => None,
    };

    EtaReport {
        overall_avg_secs,
        outstanding,
        total_remaining_secs,
        active: find_active(snapshot, now, overall_avg_secs),
    }
}

fn find_active(
    snapshot: &PipelineSnapshot,
    now: NaiveDateTime,
    overall_avg_secs: Option<f64>,
) -> Option<ActiveItem> {
    // Keep the item with the strictly greatest last_updated; the first item
    // found wins ties. Lexicographic order on the ISO string is chronological.
    let mut best: Option<(&String, &crate::ItemRecord)> = None;
    for (path, record) in &snapshot.files {
        if !is_active(&record.status) {
            continue;
        }
        match &best {
            None => best = Some((path, record)),
            Some((_, current)) => {
                if record.last_updated > current.last_updated {
                    best = Some((path, record));
                }
            }
        }
    }

    let (path, record) = best?;
    let elapsed_secs = record
        .last_updated
        .as_deref()
        .and_then(parse_timestamp)
        .map(|ts| (now - ts).num_seconds().max(0));

    let remaining_secs = match (overall_avg_secs, elapsed_secs) {
        (Some(avg), Some(elapsed)) if record.status.eq_ignore_ascii_case("encoding") => {
            Some((avg - elapsed as f64).max(0.0))
        }
        _ => None,
    };

    Some(ActiveItem {
        path: path.clone(),
        status: record.status.clone(),
        elapsed_secs,
        remaining_secs,
    })
}

/// Parses the upstream's ISO-8601 timestamps, with or without a UTC offset.
/// Unparsable input degrades to `None`, never an error.
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    raw.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
}
