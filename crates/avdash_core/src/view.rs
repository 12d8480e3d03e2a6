use chrono::NaiveDateTime;

use crate::{estimate, EtaReport, GroupCounts, PipelineSnapshot};

/// Everything the dashboard's summary pane needs, derived in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub counts: GroupCounts,
    /// Done-group share of known items, in percent; 100 when no items exist.
    pub completion_pct: f64,
    pub bytes_saved: i64,
    pub eta: EtaReport,
}

/// Derives the summary view from a snapshot. Total over any well-typed
/// snapshot, including an empty one.
pub fn overview(snapshot: &PipelineSnapshot, now: NaiveDateTime) -> Overview {
    let counts = GroupCounts::tally(&snapshot.files);
    let total = counts.total();
    let completion_pct = if total == 0 {
        100.0
    } else {
        counts.done as f64 * 100.0 / total as f64
    };

    Overview {
        counts,
        completion_pct,
        bytes_saved: snapshot.stats.bytes_saved,
        eta: estimate(snapshot, now),
    }
}

/// Humanizes a duration in seconds: "45s", "12m 30s", "2h 05m", "1d 3h".
pub fn format_duration(secs: f64) -> String {
    let secs = secs.max(0.0).round() as u64;
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else if secs < 86_400 {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86_400, (secs % 86_400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::format_duration;

    #[test]
    fn duration_formatting_boundaries() {
        assert_eq!(format_duration(0.0), "0s");
        assert_eq!(format_duration(59.4), "59s");
        assert_eq!(format_duration(60.0), "1m 00s");
        assert_eq!(format_duration(750.0), "12m 30s");
        assert_eq!(format_duration(7500.0), "2h 05m");
        assert_eq!(format_duration(97_200.0), "1d 3h");
        assert_eq!(format_duration(-5.0), "0s");
    }
}
