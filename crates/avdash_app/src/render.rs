use avdash_core::{format_duration, HealthReport, KeywordCount, Overview, UpNextView};

/// Renders the summary pane: group counts, completion, savings, ETA.
pub fn render_overview(overview: &Overview) -> String {
    let counts = &overview.counts;
    let mut out = String::new();
    out.push_str(&format!(
        "pipeline: {} items | queued {} | in progress {} | done {} | skipped {} | error {}\n",
        counts.total(),
        counts.queued,
        counts.in_progress,
        counts.done,
        counts.skipped,
        counts.error,
    ));
    out.push_str(&format!(
        "complete: {:.1}% | saved: {:.2} GiB\n",
        overview.completion_pct,
        overview.bytes_saved as f64 / (1024.0 * 1024.0 * 1024.0),
    ));

    let eta = &overview.eta;
    match eta.total_remaining_secs {
        Some(secs) => out.push_str(&format!(
            "remaining: {} across {} items\n",
            format_duration(secs),
            eta.outstanding
        )),
        None if eta.outstanding > 0 => out.push_str("remaining: calculating...\n"),
        None => out.push_str("remaining: nothing outstanding\n"),
    }

    if let Some(active) = &eta.active {
        let elapsed = active
            .elapsed_secs
            .map(|s| format_duration(s as f64))
            .unwrap_or_else(|| "?".to_string());
        match active.remaining_secs {
            Some(secs) => out.push_str(&format!(
                "now {}: {} ({} elapsed, ~{} left)\n",
                active.status,
                active.path,
                elapsed,
                format_duration(secs)
            )),
            None => out.push_str(&format!(
                "now {}: {} ({} elapsed)\n",
                active.status, active.path, elapsed
            )),
        }
    }
    out
}

/// Renders the up-next list below the summary.
pub fn render_up_next(view: &UpNextView) -> String {
    let mut out = String::new();
    if view.entries.is_empty() {
        out.push_str("up next: (nothing ready)\n");
    } else {
        out.push_str("up next:\n");
        for entry in &view.entries {
            let marker = if entry.priority { "*" } else { " " };
            out.push_str(&format!("  {marker} [{}] {}\n", entry.status, entry.path));
        }
    }
    if view.more_queued > 0 {
        out.push_str(&format!("  ... and {} more queued\n", view.more_queued));
    }
    out
}

/// Renders the filename health report with per-keyword counts.
pub fn render_health(report: &HealthReport, keyword_counts: &[KeywordCount]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} files flagged\n", report.flagged.len()));
    for group in &report.folders {
        out.push_str(&format!("  {:>4}  {}\n", group.count, group.folder));
    }
    if !keyword_counts.is_empty() {
        out.push_str("custom keywords:\n");
        for count in keyword_counts {
            out.push_str(&format!("  {:>4}  {}\n", count.matches, count.keyword));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use avdash_core::{overview, PipelineSnapshot, UpNextView};

    use super::{render_overview, render_up_next};

    #[test]
    fn empty_snapshot_renders_without_estimate() {
        let snapshot = PipelineSnapshot {
            files: BTreeMap::new(),
            ..PipelineSnapshot::default()
        };
        let now = "2026-08-26T12:00:00".parse().unwrap();
        let text = render_overview(&overview(&snapshot, now));
        assert!(text.contains("pipeline: 0 items"));
        assert!(text.contains("nothing outstanding"));
    }

    #[test]
    fn empty_up_next_renders_placeholder() {
        let text = render_up_next(&UpNextView::default());
        assert!(text.contains("nothing ready"));
    }
}
