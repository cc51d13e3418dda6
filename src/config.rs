//! Connection settings for the Plex server.
//!
//! Resolved once from CLI flags and environment (`PLEX_URL` / `PLEX_TOKEN`)
//! and passed explicitly into the catalog client and report entry points.
//! A missing token fails here, before any network call.

use anyhow::{bail, Result};

/// Resolved connection settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server base URL without a trailing slash.
    pub base_url: String,
    /// Auth token sent as `X-Plex-Token` on every request.
    pub token: String,
    /// Verbose (debug) logging requested.
    pub verbose: bool,
}

impl ServerConfig {
    /// Validate and normalize the raw flag/environment values.
    pub fn new(url: impl Into<String>, token: Option<String>, verbose: bool) -> Result<Self> {
        let Some(token) = token.filter(|token| !token.is_empty()) else {
            bail!("PLEX_TOKEN is required. Set it in the environment or pass --plex-token");
        };

        let url = url.into();
        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            token,
            verbose,
        })
    }
}
