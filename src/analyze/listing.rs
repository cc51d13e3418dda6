//! Full item listing with subtitle details.

use crate::catalog::MediaItem;
use crate::facts::{self, SubtitleStreamFacts};
use crate::report;

/// Category of a listed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Movie,
    Episode,
}

/// One detail record combining quality, watch, and subtitle facts.
#[derive(Debug, Clone)]
pub struct LibraryItem {
    pub title: String,
    pub kind: ItemKind,
    /// Deep link into the server's web UI.
    pub url: String,
    pub rating_key: String,
    pub file_path: String,
    /// Human-readable size, `Unknown` when the server reports none.
    pub file_size: String,
    pub resolution: String,
    pub video_codec: String,
    pub audio_codec: String,
    pub watched: bool,
    pub view_count: u64,
    pub last_viewed: Option<String>,
    pub has_subtitles: bool,
    pub languages: Vec<String>,
    pub subtitle_streams: Vec<SubtitleStreamFacts>,
}

/// Build one detail record per item.
///
/// `base_url` and `machine_id` come from the server identity and feed the
/// per-item deep links.
pub fn build_listing(items: &[MediaItem], base_url: &str, machine_id: &str) -> Vec<LibraryItem> {
    items
        .iter()
        .map(|item| {
            let quality = facts::media_quality(item);
            let watch = facts::watch_facts(item);
            let subtitles = facts::subtitle_facts(item);

            LibraryItem {
                title: facts::display_name(item),
                kind: if item.is_episode() {
                    ItemKind::Episode
                } else {
                    ItemKind::Movie
                },
                url: format!(
                    "{}/web/index.html#!/server/{}/details?key=/library/metadata/{}",
                    base_url, machine_id, item.rating_key
                ),
                rating_key: item.rating_key.clone(),
                file_path: item.file_path().unwrap_or("Unknown").to_string(),
                file_size: item
                    .file_size()
                    .map(report::format_bytes)
                    .unwrap_or_else(|| "Unknown".to_string()),
                resolution: quality.resolution,
                video_codec: quality.video_codec,
                audio_codec: quality.audio_codec,
                watched: watch.watched,
                view_count: watch.view_count,
                last_viewed: watch.last_viewed_at,
                has_subtitles: subtitles.has_subtitles,
                languages: subtitles.languages,
                subtitle_streams: subtitles.streams,
            }
        })
        .collect()
}

/// Keep only items whose subtitle facts report no streams.
pub fn without_subtitles(items: Vec<LibraryItem>) -> Vec<LibraryItem> {
    items.into_iter().filter(|item| !item.has_subtitles).collect()
}
