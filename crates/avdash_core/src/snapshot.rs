use std::collections::BTreeMap;

use serde::Deserialize;

/// Point-in-time read of the remote pipeline state.
///
/// Every field of every record is optional on the wire except the raw status
/// string; a missing field widens a derivation to "unknown", it never fails
/// deserialization.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PipelineSnapshot {
    #[serde(default)]
    pub files: BTreeMap<String, ItemRecord>,
    #[serde(default)]
    pub stats: PipelineStats,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Per-item status record, keyed by source file path in [`PipelineSnapshot::files`].
///
/// Timestamps are kept as the upstream's ISO-8601 strings; lexicographic order
/// on the string form is chronological order for this format.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub res_key: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub encode_time_secs: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub added: Option<String>,
}

/// Aggregate counters maintained upstream.
///
/// `completed` is maintained independently of the per-item statuses and may
/// transiently disagree with the count of done items; consumers must not
/// assume equality.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PipelineStats {
    #[serde(default)]
    pub total_files: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub skipped: u64,
    #[serde(default)]
    pub errors: u64,
    #[serde(default)]
    pub bytes_saved: i64,
    #[serde(default)]
    pub total_encode_time_secs: f64,
    #[serde(default)]
    pub tier_stats: BTreeMap<String, TierStats>,
}

/// Per-tier aggregates used for cost averaging.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TierStats {
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub bytes_saved: i64,
    #[serde(default)]
    pub total_input_bytes: u64,
    #[serde(default)]
    pub total_output_bytes: u64,
    #[serde(default)]
    pub total_encode_time_secs: f64,
}

/// Media library scan report, unrelated in lifecycle to the pipeline snapshot.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LibrarySnapshot {
    #[serde(default)]
    pub generated: Option<String>,
    #[serde(default)]
    pub files: Vec<LibraryFile>,
}

/// One scanned media file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LibraryFile {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub filepath: String,
    #[serde(default)]
    pub file_size_bytes: u64,
    #[serde(default)]
    pub library_type: Option<String>,
    #[serde(default)]
    pub video: Option<VideoInfo>,
}

/// Probed video stream details, when the scanner could read them.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub codec: Option<String>,
    #[serde(default)]
    pub resolution_class: Option<String>,
    #[serde(default)]
    pub hdr: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerates_missing_and_unknown_fields() {
        let raw = r#"{
            "files": {
                "/nas/a.mkv": { "status": "encoding", "stage": "pass1" },
                "/nas/b.mkv": {}
            },
            "stats": { "completed": 3, "future_counter": 9 }
        }"#;
        let snap: PipelineSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snap.files.len(), 2);
        assert_eq!(snap.files["/nas/a.mkv"].status, "encoding");
        assert_eq!(snap.files["/nas/b.mkv"].status, "");
        assert_eq!(snap.stats.completed, 3);
        assert!(snap.last_updated.is_none());
    }

    #[test]
    fn empty_document_is_a_valid_snapshot() {
        let snap: PipelineSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snap.files.is_empty());
        assert_eq!(snap.stats.completed, 0);
    }
}
