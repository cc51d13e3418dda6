//! Remote catalog access.
//!
//! The Plex server sits behind the narrow [`MediaCatalog`] interface so the
//! aggregators can be driven by canned fixtures in tests. Implementations
//! return owned item snapshots; nothing in the core mutates them.

pub mod plex;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use plex::PlexCatalog;
pub use types::{Media, MediaItem, Part, Section, ServerIdentity, Stream, Tag};

/// Errors from the remote catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Could not find library '{0}'")]
    SectionNotFound(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned HTTP {status} for {path}")]
    Status { status: u16, path: String },
}

/// Requested media category, overriding a library's native kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Movie,
    Episode,
}

/// Narrow interface over the media server.
#[async_trait]
pub trait MediaCatalog: Send + Sync {
    /// Server identity (name, version, machine identifier).
    async fn identity(&self) -> Result<ServerIdentity, CatalogError>;

    /// All library sections.
    async fn sections(&self) -> Result<Vec<Section>, CatalogError>;

    /// Look up a section by title.
    async fn section(&self, title: &str) -> Result<Section, CatalogError>;

    /// Direct children of a section (movies, or shows for show libraries).
    async fn items(&self, section: &Section) -> Result<Vec<MediaItem>, CatalogError>;

    /// Every episode of a show, in the server's season/episode order.
    async fn episodes(&self, show: &MediaItem) -> Result<Vec<MediaItem>, CatalogError>;
}

/// Flatten a section into the item sequence to analyze.
///
/// An explicit type filter takes precedence over the section's native kind;
/// otherwise movie sections list directly and show sections concatenate the
/// episodes of every show. Other kinds yield no analyzable items.
pub async fn resolve_items(
    catalog: &dyn MediaCatalog,
    section: &Section,
    filter: Option<MediaType>,
) -> Result<Vec<MediaItem>, CatalogError> {
    if filter == Some(MediaType::Movie) || section.is_movie_kind() {
        return catalog.items(section).await;
    }

    if filter == Some(MediaType::Episode) || section.is_show_kind() {
        let mut episodes = Vec::new();
        for show in catalog.items(section).await? {
            episodes.extend(catalog.episodes(&show).await?);
        }
        return Ok(episodes);
    }

    Ok(Vec::new())
}
