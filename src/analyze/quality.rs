//! Resolution and codec distribution.

use std::collections::HashMap;

use crate::catalog::MediaItem;
use crate::facts;

/// Histograms of resolution classes and codec labels for one library scan.
#[derive(Debug, Clone, Default)]
pub struct QualityReport {
    pub resolutions: HashMap<String, u64>,
    pub video_codecs: HashMap<String, u64>,
    pub audio_codecs: HashMap<String, u64>,
    pub total_items: u64,
}

impl QualityReport {
    /// Fold every item's quality facts into the histograms.
    pub fn analyze(items: &[MediaItem]) -> Self {
        let mut report = Self::default();

        for item in items {
            report.total_items += 1;
            let quality = facts::media_quality(item);

            *report.resolutions.entry(quality.resolution).or_insert(0) += 1;
            *report.video_codecs.entry(quality.video_codec).or_insert(0) += 1;
            *report.audio_codecs.entry(quality.audio_codec).or_insert(0) += 1;
        }

        report
    }
}
