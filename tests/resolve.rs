//! Library Resolution Tests
//!
//! Exercises the section-to-item-sequence logic against a canned catalog,
//! including the type-filter override semantics.

use std::collections::HashMap;

use async_trait::async_trait;
use plexinfo::catalog::{
    resolve_items, CatalogError, MediaCatalog, MediaItem, MediaType, Section, ServerIdentity,
};

struct FakeCatalog {
    sections: Vec<Section>,
    /// Section key to direct children.
    items: HashMap<String, Vec<MediaItem>>,
    /// Show rating key to episodes.
    episodes: HashMap<String, Vec<MediaItem>>,
}

#[async_trait]
impl MediaCatalog for FakeCatalog {
    async fn identity(&self) -> Result<ServerIdentity, CatalogError> {
        Ok(ServerIdentity::default())
    }

    async fn sections(&self) -> Result<Vec<Section>, CatalogError> {
        Ok(self.sections.clone())
    }

    async fn section(&self, title: &str) -> Result<Section, CatalogError> {
        self.sections
            .iter()
            .find(|section| section.title == title)
            .cloned()
            .ok_or_else(|| CatalogError::SectionNotFound(title.to_string()))
    }

    async fn items(&self, section: &Section) -> Result<Vec<MediaItem>, CatalogError> {
        Ok(self.items.get(&section.key).cloned().unwrap_or_default())
    }

    async fn episodes(&self, show: &MediaItem) -> Result<Vec<MediaItem>, CatalogError> {
        Ok(self.episodes.get(&show.rating_key).cloned().unwrap_or_default())
    }
}

fn titled(title: &str, kind: &str, rating_key: &str) -> MediaItem {
    MediaItem {
        rating_key: rating_key.to_string(),
        title: title.to_string(),
        kind: kind.to_string(),
        ..Default::default()
    }
}

fn fixture() -> FakeCatalog {
    let sections = vec![
        Section {
            key: "1".to_string(),
            title: "Movies".to_string(),
            kind: "movie".to_string(),
        },
        Section {
            key: "2".to_string(),
            title: "TV Shows".to_string(),
            kind: "show".to_string(),
        },
        Section {
            key: "3".to_string(),
            title: "Music".to_string(),
            kind: "artist".to_string(),
        },
    ];

    let mut items = HashMap::new();
    items.insert(
        "1".to_string(),
        vec![
            titled("Heat", "movie", "10"),
            titled("Ronin", "movie", "11"),
        ],
    );
    items.insert(
        "2".to_string(),
        vec![
            titled("Show One", "show", "20"),
            titled("Show Two", "show", "21"),
        ],
    );
    items.insert("3".to_string(), vec![titled("Band", "artist", "30")]);

    let mut episodes = HashMap::new();
    episodes.insert(
        "20".to_string(),
        vec![
            titled("S1E1", "episode", "200"),
            titled("S1E2", "episode", "201"),
        ],
    );
    episodes.insert("21".to_string(), vec![titled("Pilot", "episode", "210")]);

    FakeCatalog {
        sections,
        items,
        episodes,
    }
}

#[tokio::test]
async fn test_movie_section_lists_directly() {
    let catalog = fixture();
    let section = catalog.section("Movies").await.unwrap();
    let items = resolve_items(&catalog, &section, None).await.unwrap();
    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Heat", "Ronin"]);
}

#[tokio::test]
async fn test_show_section_concatenates_episodes_in_order() {
    let catalog = fixture();
    let section = catalog.section("TV Shows").await.unwrap();
    let items = resolve_items(&catalog, &section, None).await.unwrap();
    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    // Show order first, then episode order within each show.
    assert_eq!(titles, ["S1E1", "S1E2", "Pilot"]);
}

#[tokio::test]
async fn test_movie_filter_overrides_show_kind() {
    let catalog = fixture();
    let section = catalog.section("TV Shows").await.unwrap();
    let items = resolve_items(&catalog, &section, Some(MediaType::Movie))
        .await
        .unwrap();
    // Forcing the movie category lists the section's direct children.
    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Show One", "Show Two"]);
}

#[tokio::test]
async fn test_episode_filter_walks_children() {
    let catalog = fixture();
    let section = catalog.section("Movies").await.unwrap();
    let items = resolve_items(&catalog, &section, Some(MediaType::Episode))
        .await
        .unwrap();
    // Movies have no episode leaves, so the forced walk finds nothing.
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_other_kinds_yield_no_analyzable_items() {
    let catalog = fixture();
    let section = catalog.section("Music").await.unwrap();
    let items = resolve_items(&catalog, &section, None).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_unknown_section_is_reported() {
    let catalog = fixture();
    let err = catalog.section("Anime").await.unwrap_err();
    assert!(matches!(err, CatalogError::SectionNotFound(_)));
    assert_eq!(err.to_string(), "Could not find library 'Anime'");
}
