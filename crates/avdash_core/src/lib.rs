//! Dashboard core: pure derivation and estimation logic over pipeline snapshots.
mod chain;
mod eta;
mod health;
mod priority;
mod ranker;
mod snapshot;
mod status;
mod view;

pub use chain::{ActionChain, ChainEffect, ChainEvent, ChainOutcome, ChainState, ChainStep};
pub use eta::{estimate, ActiveItem, EtaReport};
pub use health::{
    analyze, keyword_match_counts, FlaggedFile, FolderGroup, HealthReport, KeywordCount,
};
pub use priority::retain_unfinished;
pub use ranker::{up_next, UpNextEntry, UpNextView, DEFAULT_UP_NEXT_LIMIT, PRIORITY_SENTINEL};
pub use snapshot::{
    ItemRecord, LibraryFile, LibrarySnapshot, PipelineSnapshot, PipelineStats, TierStats,
    VideoInfo,
};
pub use status::{GroupCounts, StatusGroup};
pub use view::{format_duration, overview, Overview};
