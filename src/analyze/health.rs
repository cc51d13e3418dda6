//! Library health flags.

use crate::catalog::MediaItem;
use crate::facts;

/// Files above this size are flagged as very large.
pub const VERY_LARGE_FILE_BYTES: u64 = 50 * 1024 * 1024 * 1024;

/// An item flagged in a health category.
#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedItem {
    pub title: String,
    pub rating_key: String,
}

/// A metadata gap, carrying the single reason that matched.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataGap {
    pub title: String,
    pub rating_key: String,
    pub issue: &'static str,
}

/// An SD-only item.
#[derive(Debug, Clone, PartialEq)]
pub struct LowQualityItem {
    pub title: String,
    pub rating_key: String,
    pub resolution: String,
}

/// A file exceeding the very-large threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct OversizedFile {
    pub title: String,
    pub rating_key: String,
    pub size: u64,
}

/// Per-category lists of flagged items for one library scan.
///
/// Categories are evaluated independently; one item may appear in several.
#[derive(Debug, Clone, Default)]
pub struct HealthReport {
    pub total_items: u64,
    pub missing_metadata: Vec<MetadataGap>,
    pub low_quality: Vec<LowQualityItem>,
    pub no_subtitles: Vec<FlaggedItem>,
    pub very_large_files: Vec<OversizedFile>,
    pub never_watched: Vec<FlaggedItem>,
}

impl HealthReport {
    /// Evaluate all five flags for every item in one pass.
    pub fn analyze(items: &[MediaItem]) -> Self {
        let mut report = Self::default();

        for item in items {
            report.total_items += 1;

            let name = facts::display_name(item);
            let key = item.rating_key.clone();

            // Single reason wins: a missing summary masks a missing year.
            let summary_missing = item
                .summary
                .as_deref()
                .map_or(true, |summary| summary.trim().chars().count() < 10);
            if summary_missing {
                report.missing_metadata.push(MetadataGap {
                    title: name.clone(),
                    rating_key: key.clone(),
                    issue: "No summary",
                });
            } else if item.year.is_none() {
                report.missing_metadata.push(MetadataGap {
                    title: name.clone(),
                    rating_key: key.clone(),
                    issue: "No year",
                });
            }

            let quality = facts::media_quality(item);
            if quality.resolution == "SD" {
                report.low_quality.push(LowQualityItem {
                    title: name.clone(),
                    rating_key: key.clone(),
                    resolution: quality.resolution,
                });
            }

            if !facts::subtitle_facts(item).has_subtitles {
                report.no_subtitles.push(FlaggedItem {
                    title: name.clone(),
                    rating_key: key.clone(),
                });
            }

            if let Some(size) = item.file_size() {
                if size > VERY_LARGE_FILE_BYTES {
                    report.very_large_files.push(OversizedFile {
                        title: name.clone(),
                        rating_key: key.clone(),
                        size,
                    });
                }
            }

            if facts::watch_facts(item).view_count == 0 {
                report.never_watched.push(FlaggedItem {
                    title: name,
                    rating_key: key,
                });
            }
        }

        report
    }
}
