//! Plex HTTP client implementing the catalog interface.
//!
//! Every call is one GET with the auth token header; responses are the JSON
//! `MediaContainer` envelope.

use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::types::{MediaItem, Section, ServerIdentity};
use super::{CatalogError, MediaCatalog};
use crate::config::ServerConfig;

/// Catalog client backed by a remote Plex server.
pub struct PlexCatalog {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

/// Top-level envelope wrapping every Plex response.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    media_container: T,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SectionContainer {
    #[serde(rename = "Directory")]
    directories: Vec<Section>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ItemContainer {
    #[serde(rename = "Metadata")]
    metadata: Vec<MediaItem>,
}

impl PlexCatalog {
    /// Create a client for the configured server.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Build a full request URL from an API path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_container<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = self.endpoint(path);
        debug!("GET {}", path);

        let response = self
            .client
            .get(&url)
            .header("X-Plex-Token", &self.token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.media_container)
    }
}

#[async_trait]
impl MediaCatalog for PlexCatalog {
    async fn identity(&self) -> Result<ServerIdentity, CatalogError> {
        self.get_container("/").await
    }

    async fn sections(&self) -> Result<Vec<Section>, CatalogError> {
        let container: SectionContainer = self.get_container("/library/sections").await?;
        Ok(container.directories)
    }

    async fn section(&self, title: &str) -> Result<Section, CatalogError> {
        self.sections()
            .await?
            .into_iter()
            .find(|section| section.title == title)
            .ok_or_else(|| CatalogError::SectionNotFound(title.to_string()))
    }

    async fn items(&self, section: &Section) -> Result<Vec<MediaItem>, CatalogError> {
        let path = format!("/library/sections/{}/all", section.key);
        let container: ItemContainer = self.get_container(&path).await?;
        Ok(container.metadata)
    }

    async fn episodes(&self, show: &MediaItem) -> Result<Vec<MediaItem>, CatalogError> {
        let path = format!("/library/metadata/{}/allLeaves", show.rating_key);
        let container: ItemContainer = self.get_container(&path).await?;
        Ok(container.metadata)
    }
}
