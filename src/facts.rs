//! Per-item fact extraction.
//!
//! All four aggregators consume the same normalized facts, computed here in
//! one place. Extraction never fails: missing or partial metadata falls back
//! to unknown/zero values so one bad item cannot abort a library scan.

use chrono::DateTime;

use crate::catalog::MediaItem;

/// Resolution class, codec labels, and raw dimensions for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityFacts {
    /// `4K`, `1080p`, `720p`, `SD`, an explicit server label, or `Unknown`.
    pub resolution: String,
    pub video_codec: String,
    pub audio_codec: String,
    /// Pixel dimensions, populated only when the class was derived from them.
    pub width: u32,
    pub height: u32,
}

/// Watch state for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchFacts {
    pub watched: bool,
    pub view_count: u64,
    /// `YYYY-MM-DD HH:MM:SS`, absent when the item was never viewed.
    pub last_viewed_at: Option<String>,
}

/// Subtitle coverage for one item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleFacts {
    pub has_subtitles: bool,
    /// Deduplicated normalized codes, first-seen order.
    pub languages: Vec<String>,
    pub count: usize,
    /// One record per stream, duplicates included.
    pub streams: Vec<SubtitleStreamFacts>,
}

/// Detail record for a single subtitle stream.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleStreamFacts {
    pub language: String,
    pub language_code: String,
    pub title: Option<String>,
    pub format: String,
    pub forced: bool,
    pub external: bool,
}

/// Classify a pixel height into a coarse resolution bucket.
pub fn classify_height(height: u32) -> &'static str {
    if height >= 2160 {
        "4K"
    } else if height >= 1080 {
        "1080p"
    } else if height >= 720 {
        "720p"
    } else {
        "SD"
    }
}

/// Derive quality facts from an item's first media element.
///
/// An explicit server resolution label wins over pixel dimensions.
pub fn media_quality(item: &MediaItem) -> QualityFacts {
    let mut facts = QualityFacts {
        resolution: "Unknown".to_string(),
        video_codec: "Unknown".to_string(),
        audio_codec: "Unknown".to_string(),
        width: 0,
        height: 0,
    };

    let Some(media) = item.media.first() else {
        return facts;
    };

    if let Some(label) = media.video_resolution.as_deref().filter(|s| !s.is_empty()) {
        facts.resolution = label.to_string();
    } else if let (Some(width), Some(height)) = (media.width, media.height) {
        facts.width = width;
        facts.height = height;
        facts.resolution = classify_height(height).to_string();
    }

    if let Some(codec) = media.video_codec.as_deref().filter(|s| !s.is_empty()) {
        facts.video_codec = codec.to_uppercase();
    }
    if let Some(codec) = media.audio_codec.as_deref().filter(|s| !s.is_empty()) {
        facts.audio_codec = codec.to_uppercase();
    }

    facts
}

/// Derive watch facts; an item with no view count is unwatched.
pub fn watch_facts(item: &MediaItem) -> WatchFacts {
    let view_count = item.view_count.unwrap_or(0);
    let last_viewed_at = item
        .last_viewed_at
        .and_then(|epoch| DateTime::from_timestamp(epoch, 0))
        .map(|viewed| viewed.format("%Y-%m-%d %H:%M:%S").to_string());

    WatchFacts {
        watched: view_count > 0,
        view_count,
        last_viewed_at,
    }
}

/// Collect subtitle facts from every stream attached to the item.
pub fn subtitle_facts(item: &MediaItem) -> SubtitleFacts {
    let mut facts = SubtitleFacts::default();

    for stream in item.subtitle_streams() {
        facts.has_subtitles = true;
        facts.count += 1;

        let code = normalize_language_code(stream.language_code.as_deref());
        if !facts.languages.contains(&code) {
            facts.languages.push(code.clone());
        }

        facts.streams.push(SubtitleStreamFacts {
            language: stream
                .language
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            language_code: code,
            title: stream.title.clone().filter(|title| !title.is_empty()),
            format: stream
                .codec
                .clone()
                .filter(|codec| !codec.is_empty())
                .unwrap_or_else(|| "srt".to_string()),
            forced: stream.forced.unwrap_or(false),
            external: stream.is_external(),
        });
    }

    facts
}

/// Normalize a raw language code to a 2-letter (or lower-cased) form.
///
/// Known 3-letter codes map through a fixed table; unrecognized 3-letter
/// codes truncate to their first two characters. A missing code becomes the
/// literal `unknown`.
pub fn normalize_language_code(raw: Option<&str>) -> String {
    let Some(code) = raw.filter(|code| !code.is_empty()) else {
        return "unknown".to_string();
    };

    if code.chars().count() == 3 {
        let lower = code.to_lowercase();
        match lower.as_str() {
            "eng" => "en".to_string(),
            "spa" => "es".to_string(),
            "fra" => "fr".to_string(),
            "deu" => "de".to_string(),
            "ita" => "it".to_string(),
            "por" => "pt".to_string(),
            _ => lower.chars().take(2).collect(),
        }
    } else {
        code.to_lowercase()
    }
}

/// Display name for reports: episodes carry their show and SxxEyy position.
pub fn display_name(item: &MediaItem) -> String {
    if item.is_episode() {
        format!(
            "{} - S{:02}E{:02} - {}",
            item.grandparent_title.as_deref().unwrap_or("Unknown Show"),
            item.parent_index.unwrap_or(0),
            item.index.unwrap_or(0),
            item.title
        )
    } else {
        item.title.clone()
    }
}
