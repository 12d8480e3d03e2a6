use std::collections::BTreeMap;
use std::sync::Once;

use avdash_core::{GroupCounts, ItemRecord, StatusGroup};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dash_logging::initialize_for_tests);
}

fn record(status: &str) -> ItemRecord {
    ItemRecord {
        status: status.to_string(),
        ..ItemRecord::default()
    }
}

#[test]
fn every_raw_status_lands_in_exactly_one_group() {
    init_logging();
    let raws = [
        "queued", "pending", "waiting", "fetched", "encoded", "uploaded", "fetching", "encoding",
        "uploading", "verifying", "replacing", "completed", "replaced", "done", "verified",
        "skipped", "error", "failed", "", "garbage", "ENCODING", "Done",
    ];
    for raw in raws {
        // classify is total; reaching here without a panic is the property.
        let _ = StatusGroup::classify(raw);
    }
    assert_eq!(StatusGroup::classify("waiting"), StatusGroup::Queued);
    assert_eq!(StatusGroup::classify("replacing"), StatusGroup::InProgress);
    assert_eq!(StatusGroup::classify("replaced"), StatusGroup::Done);
    assert_eq!(StatusGroup::classify("skipped"), StatusGroup::Skipped);
    assert_eq!(StatusGroup::classify("failed"), StatusGroup::Error);
}

#[test]
fn group_counts_sum_to_file_count() {
    init_logging();
    let mut files: BTreeMap<String, ItemRecord> = BTreeMap::new();
    let statuses = [
        "pending", "encoding", "verified", "skipped", "failed", "nonsense", "UPLOADED", "done",
    ];
    for (idx, status) in statuses.iter().enumerate() {
        files.insert(format!("/nas/file{idx}.mkv"), record(status));
    }

    let counts = GroupCounts::tally(&files);
    assert_eq!(counts.total(), files.len());
    assert_eq!(counts.queued, 3); // pending, nonsense, UPLOADED
    assert_eq!(counts.in_progress, 1);
    assert_eq!(counts.done, 2);
    assert_eq!(counts.skipped, 1);
    assert_eq!(counts.error, 1);
}

#[test]
fn empty_files_map_tallies_to_zero() {
    init_logging();
    let counts = GroupCounts::tally(&BTreeMap::new());
    assert_eq!(counts.total(), 0);
}
