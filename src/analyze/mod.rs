//! Single-pass library aggregators.
//!
//! Each report folds the resolved item sequence exactly once; the
//! aggregators share the fact extractor but never each other's state.

pub mod health;
pub mod listing;
pub mod quality;
pub mod stats;

pub use health::{FlaggedItem, HealthReport, LowQualityItem, MetadataGap, OversizedFile};
pub use listing::{build_listing, without_subtitles, ItemKind, LibraryItem};
pub use quality::QualityReport;
pub use stats::StatsReport;
