//! Fact Extraction Tests
//!
//! Covers resolution classification, codec labels, watch state, subtitle
//! language normalization, and display names.

use plexinfo::catalog::{Media, MediaItem, Part, Stream};
use plexinfo::facts::{display_name, media_quality, subtitle_facts, watch_facts};

fn item_with_media(media: Media) -> MediaItem {
    MediaItem {
        title: "Test".to_string(),
        kind: "movie".to_string(),
        media: vec![media],
        ..Default::default()
    }
}

fn item_with_dimensions(width: u32, height: u32) -> MediaItem {
    item_with_media(Media {
        width: Some(width),
        height: Some(height),
        ..Default::default()
    })
}

fn subtitle(code: Option<&str>) -> Stream {
    Stream {
        stream_type: 3,
        language_code: code.map(|c| c.to_string()),
        ..Default::default()
    }
}

fn item_with_streams(streams: Vec<Stream>) -> MediaItem {
    item_with_media(Media {
        parts: vec![Part {
            streams,
            ..Default::default()
        }],
        ..Default::default()
    })
}

#[test]
fn test_resolution_classification_from_height() {
    for (height, expected) in [
        (4320, "4K"),
        (2160, "4K"),
        (2159, "1080p"),
        (1080, "1080p"),
        (1079, "720p"),
        (720, "720p"),
        (719, "SD"),
        (480, "SD"),
    ] {
        let quality = media_quality(&item_with_dimensions(1920, height));
        assert_eq!(quality.resolution, expected, "height {}", height);
        assert_eq!(quality.height, height);
    }
}

#[test]
fn test_explicit_resolution_label_wins() {
    let item = item_with_media(Media {
        video_resolution: Some("4k".to_string()),
        width: Some(720),
        height: Some(480),
        ..Default::default()
    });
    let quality = media_quality(&item);
    // The server label is used verbatim and dimensions stay unset.
    assert_eq!(quality.resolution, "4k");
    assert_eq!(quality.height, 0);
}

#[test]
fn test_quality_defaults_without_media() {
    let quality = media_quality(&MediaItem::default());
    assert_eq!(quality.resolution, "Unknown");
    assert_eq!(quality.video_codec, "Unknown");
    assert_eq!(quality.audio_codec, "Unknown");
}

#[test]
fn test_codec_labels_uppercased() {
    let item = item_with_media(Media {
        video_codec: Some("h264".to_string()),
        audio_codec: Some("eac3".to_string()),
        ..Default::default()
    });
    let quality = media_quality(&item);
    assert_eq!(quality.video_codec, "H264");
    assert_eq!(quality.audio_codec, "EAC3");
}

#[test]
fn test_watch_facts_defaults() {
    let facts = watch_facts(&MediaItem::default());
    assert!(!facts.watched);
    assert_eq!(facts.view_count, 0);
    assert!(facts.last_viewed_at.is_none());
}

#[test]
fn test_watch_facts_formats_last_viewed() {
    let item = MediaItem {
        view_count: Some(3),
        last_viewed_at: Some(1609459200),
        ..Default::default()
    };
    let facts = watch_facts(&item);
    assert!(facts.watched);
    assert_eq!(facts.view_count, 3);
    assert_eq!(facts.last_viewed_at.as_deref(), Some("2021-01-01 00:00:00"));
}

#[test]
fn test_subtitle_languages_deduplicated_streams_kept() {
    let item = item_with_streams(vec![
        subtitle(Some("eng")),
        subtitle(Some("eng")),
        subtitle(Some("spa")),
    ]);
    let facts = subtitle_facts(&item);
    assert!(facts.has_subtitles);
    assert_eq!(facts.count, 3);
    assert_eq!(facts.languages, ["en", "es"]);
    assert_eq!(facts.streams.len(), 3);
}

#[test]
fn test_subtitle_stream_defaults() {
    let item = item_with_streams(vec![subtitle(None)]);
    let facts = subtitle_facts(&item);
    let stream = &facts.streams[0];
    assert_eq!(stream.language, "Unknown");
    assert_eq!(stream.language_code, "unknown");
    assert_eq!(stream.format, "srt");
    assert!(stream.title.is_none());
    assert!(!stream.forced);
    assert!(!stream.external);
}

#[test]
fn test_non_subtitle_streams_ignored() {
    let video = Stream {
        stream_type: 1,
        language_code: Some("eng".to_string()),
        ..Default::default()
    };
    let facts = subtitle_facts(&item_with_streams(vec![video]));
    assert!(!facts.has_subtitles);
    assert_eq!(facts.count, 0);
}

#[test]
fn test_movie_display_name_is_bare_title() {
    let item = MediaItem {
        title: "Heat".to_string(),
        kind: "movie".to_string(),
        ..Default::default()
    };
    assert_eq!(display_name(&item), "Heat");
}

#[test]
fn test_episode_display_name_composite() {
    let item = MediaItem {
        title: "Ozymandias".to_string(),
        kind: "episode".to_string(),
        grandparent_title: Some("Breaking Bad".to_string()),
        parent_index: Some(5),
        index: Some(14),
        ..Default::default()
    };
    assert_eq!(display_name(&item), "Breaking Bad - S05E14 - Ozymandias");
}
