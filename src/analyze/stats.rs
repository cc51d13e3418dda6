//! General library statistics.

use std::collections::HashMap;

use crate::catalog::MediaItem;
use crate::facts;

/// Size, watch, and distribution counters for one library scan.
#[derive(Debug, Clone, Default)]
pub struct StatsReport {
    pub total_items: u64,
    /// Sum of primary file-part sizes, items without a size skipped.
    pub total_size: u64,
    pub watched_count: u64,
    pub unwatched_count: u64,
    /// Sum of item runtimes in milliseconds.
    pub total_duration: u64,
    pub by_year: HashMap<String, u64>,
    /// One increment per genre tag; an item with N genres contributes N.
    pub by_genre: HashMap<String, u64>,
    pub by_rating: HashMap<String, u64>,
}

impl StatsReport {
    /// Accumulate statistics over the item sequence in one pass.
    pub fn analyze(items: &[MediaItem]) -> Self {
        let mut report = Self::default();

        for item in items {
            report.total_items += 1;

            if let Some(size) = item.file_size() {
                report.total_size += size;
            }

            if facts::watch_facts(item).watched {
                report.watched_count += 1;
            } else {
                report.unwatched_count += 1;
            }

            if let Some(duration) = item.duration {
                report.total_duration += duration;
            }

            // Explicit year wins; the release date is the fallback.
            if let Some(year) = item.year {
                *report.by_year.entry(year.to_string()).or_insert(0) += 1;
            } else if let Some(year) = item.release_year() {
                *report.by_year.entry(year.to_string()).or_insert(0) += 1;
            }

            for genre in &item.genres {
                if !genre.tag.is_empty() {
                    *report.by_genre.entry(genre.tag.clone()).or_insert(0) += 1;
                }
            }

            if let Some(rating) = item.content_rating.clone().filter(|r| !r.is_empty()) {
                *report.by_rating.entry(rating).or_insert(0) += 1;
            }
        }

        report
    }
}
