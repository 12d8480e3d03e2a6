use crate::status::is_done_equivalent;
use crate::PipelineSnapshot;

/// Drops priority-list entries whose pipeline item already reached a terminal
/// status. Returns `None` when nothing changed, so callers can skip the
/// write-back entirely; filtering an already-filtered list is a no-op.
///
/// Paths the pipeline does not know about are kept: an identifier may be
/// queued as priority before the pipeline first sees it.
pub fn retain_unfinished(paths: &[String], snapshot: &PipelineSnapshot) -> Option<Vec<String>> {
    let filtered: Vec<String> = paths
        .iter()
        .filter(|path| {
            snapshot
                .files
                .get(*path)
                .is_none_or(|record| !is_done_equivalent(&record.status))
        })
        .cloned()
        .collect();

    if filtered.len() == paths.len() {
        None
    } else {
        Some(filtered)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{ItemRecord, PipelineSnapshot};

    use super::retain_unfinished;

    fn snapshot_with(statuses: &[(&str, &str)]) -> PipelineSnapshot {
        let mut files = BTreeMap::new();
        for (path, status) in statuses {
            files.insert(
                (*path).to_string(),
                ItemRecord {
                    status: (*status).to_string(),
                    ..ItemRecord::default()
                },
            );
        }
        PipelineSnapshot {
            files,
            ..PipelineSnapshot::default()
        }
    }

    #[test]
    fn drops_terminal_items_and_keeps_unknown_paths() {
        let snapshot = snapshot_with(&[("/a", "verified"), ("/b", "pending")]);
        let paths = vec!["/a".to_string(), "/b".to_string(), "/future".to_string()];

        let filtered = retain_unfinished(&paths, &snapshot).unwrap();
        assert_eq!(filtered, vec!["/b".to_string(), "/future".to_string()]);
    }

    #[test]
    fn second_sweep_is_a_no_op() {
        let snapshot = snapshot_with(&[("/a", "replaced"), ("/b", "encoding")]);
        let paths = vec!["/a".to_string(), "/b".to_string()];

        let first = retain_unfinished(&paths, &snapshot).unwrap();
        assert_eq!(retain_unfinished(&first, &snapshot), None);
    }

    #[test]
    fn unchanged_list_returns_none() {
        let snapshot = snapshot_with(&[("/a", "pending")]);
        let paths = vec!["/a".to_string()];
        assert_eq!(retain_unfinished(&paths, &snapshot), None);
    }
}
