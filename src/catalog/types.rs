//! Wire types for the Plex catalog API.
//!
//! Shapes match the JSON the server returns with `Accept: application/json`.
//! Every field the reports only sometimes need is optional; deserialization
//! defaults keep a partial payload from failing an entire scan.

use serde::Deserialize;

/// Stream type discriminator for subtitle tracks.
const SUBTITLE_STREAM: i32 = 3;

/// Identity block returned by the server root endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerIdentity {
    pub friendly_name: String,
    pub machine_identifier: String,
    pub version: Option<String>,
    pub platform: Option<String>,
    pub platform_version: Option<String>,
}

/// One library section (a named collection of a single media kind).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Section {
    pub key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Section {
    pub fn is_movie_kind(&self) -> bool {
        self.kind == "movie"
    }

    pub fn is_show_kind(&self) -> bool {
        self.kind == "show"
    }
}

/// A tag attached to an item (genre, collection, label).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub tag: String,
}

/// One media entry: a movie, an episode, or (as a section child) a show.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaItem {
    pub rating_key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Show title, present on episodes.
    pub grandparent_title: Option<String>,
    /// Season number, present on episodes.
    pub parent_index: Option<i64>,
    /// Episode number within the season.
    pub index: Option<i64>,
    pub year: Option<i32>,
    /// Runtime in milliseconds.
    pub duration: Option<u64>,
    pub content_rating: Option<String>,
    pub summary: Option<String>,
    /// Release date as `YYYY-MM-DD`.
    pub originally_available_at: Option<String>,
    pub view_count: Option<u64>,
    /// Unix timestamp of the most recent view.
    pub last_viewed_at: Option<i64>,
    #[serde(rename = "Genre")]
    pub genres: Vec<Tag>,
    #[serde(rename = "Media")]
    pub media: Vec<Media>,
}

impl MediaItem {
    pub fn is_episode(&self) -> bool {
        self.kind == "episode"
    }

    /// First part of the first media element, where file attributes live.
    pub fn primary_part(&self) -> Option<&Part> {
        self.media.first().and_then(|media| media.parts.first())
    }

    pub fn file_size(&self) -> Option<u64> {
        self.primary_part().and_then(|part| part.size)
    }

    pub fn file_path(&self) -> Option<&str> {
        self.primary_part().and_then(|part| part.file.as_deref())
    }

    /// Every subtitle stream across all media parts, including duplicates.
    pub fn subtitle_streams(&self) -> impl Iterator<Item = &Stream> {
        self.media
            .iter()
            .flat_map(|media| media.parts.iter())
            .flat_map(|part| part.streams.iter())
            .filter(|stream| stream.is_subtitle())
    }

    /// Year taken from the originally-available date when the explicit
    /// field is absent.
    pub fn release_year(&self) -> Option<i32> {
        self.originally_available_at
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }
}

/// One encoding of an item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Media {
    /// Explicit resolution label, e.g. `1080` or `4k`.
    pub video_resolution: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    #[serde(rename = "Part")]
    pub parts: Vec<Part>,
}

/// One file backing a media encoding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Part {
    pub file: Option<String>,
    pub size: Option<u64>,
    #[serde(rename = "Stream")]
    pub streams: Vec<Stream>,
}

/// One track inside a part. Subtitles carry `streamType == 3`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stream {
    pub stream_type: i32,
    /// Raw language code, often 3-letter (`eng`).
    pub language_code: Option<String>,
    /// Language display name.
    pub language: Option<String>,
    pub codec: Option<String>,
    pub title: Option<String>,
    pub forced: Option<bool>,
    /// Present on external sidecar streams.
    pub key: Option<String>,
}

impl Stream {
    pub fn is_subtitle(&self) -> bool {
        self.stream_type == SUBTITLE_STREAM
    }

    pub fn is_external(&self) -> bool {
        self.key.is_some()
    }
}
