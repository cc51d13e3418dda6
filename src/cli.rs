//! Command-line interface for plexinfo.
//!
//! Report flags are first-match-wins in the order system, quality, stats,
//! health, then the full listing. Without `--library`, prints the
//! available-libraries overview instead.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use crate::analyze::{listing, HealthReport, QualityReport, StatsReport};
use crate::catalog::{
    resolve_items, CatalogError, MediaCatalog, MediaItem, MediaType, PlexCatalog,
};
use crate::config::ServerConfig;
use crate::report::render::{self, LibraryOverview};
use crate::system;

const EXAMPLES: &str = "\
Examples:
  # List all available libraries
  plexinfo

  # List all movies with details
  plexinfo --library \"Movies\"

  # Find items missing subtitles
  plexinfo --library \"Movies\" --list-missing

  # Analyze quality distribution
  plexinfo --library \"Movies\" --quality

  # Get library statistics
  plexinfo --library \"Movies\" --stats

  # Check library health
  plexinfo --library \"Movies\" --health

  # View system information
  plexinfo --system
";

/// plexinfo - Comprehensive Plex library analysis tool
#[derive(Parser, Debug)]
#[command(name = "plexinfo")]
#[command(author, version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// Show only items missing subtitles
    #[arg(long)]
    pub list_missing: bool,

    /// Display detailed system information about the Plex server
    #[arg(long)]
    pub system: bool,

    /// Analyze video quality and codec distribution in the library
    #[arg(long)]
    pub quality: bool,

    /// Show general statistics for the library (watch counts, genres, years)
    #[arg(long)]
    pub stats: bool,

    /// Check library health and identify potential issues
    #[arg(long)]
    pub health: bool,

    /// Plex server URL
    #[arg(long, env = "PLEX_URL", default_value = "http://localhost:32400")]
    pub plex_url: String,

    /// Plex authentication token
    #[arg(long, env = "PLEX_TOKEN", hide_env_values = true)]
    pub plex_token: Option<String>,

    /// Library name to analyze (e.g. "Movies"). Lists all libraries when omitted
    #[arg(long)]
    pub library: Option<String>,

    /// Filter by media type
    #[arg(long = "type", value_enum, value_name = "TYPE")]
    pub media_type: Option<TypeFilter>,

    /// Output file for the listing report
    #[arg(long, default_value = "plex_info.txt")]
    pub output: PathBuf,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,
}

/// Media category filter for CLI (maps to MediaType).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TypeFilter {
    /// Movies only
    Movie,
    /// TV episodes only
    Episode,
}

impl From<TypeFilter> for MediaType {
    fn from(filter: TypeFilter) -> Self {
        match filter {
            TypeFilter::Movie => MediaType::Movie,
            TypeFilter::Episode => MediaType::Episode,
        }
    }
}

impl Cli {
    /// Execute the selected report.
    pub async fn execute(self) -> Result<()> {
        let config = ServerConfig::new(self.plex_url.clone(), self.plex_token.clone(), self.verbose)?;
        let catalog = PlexCatalog::new(&config);

        let identity = catalog
            .identity()
            .await
            .with_context(|| format!("Failed to connect to Plex server at {}", config.base_url))?;
        info!("Connected to Plex server: {}", identity.friendly_name);

        if self.system {
            info!("Gathering system information...");
            let report = system::gather(&catalog).await;
            print!("{}", render::render_system(&report));
            return Ok(());
        }

        if self.quality {
            let library = self.require_library("--quality analysis")?;
            info!("Analyzing quality distribution for library: {}", library);
            let items = self.library_items(&catalog, library).await?;
            info!("Analyzing {} items for quality metrics...", items.len());
            let report = QualityReport::analyze(&items);
            print!("{}", render::render_quality(&report, library));
            return Ok(());
        }

        if self.stats {
            let library = self.require_library("--stats analysis")?;
            info!("Gathering statistics for library: {}", library);
            let items = self.library_items(&catalog, library).await?;
            info!("Analyzing {} items for statistics...", items.len());
            let report = StatsReport::analyze(&items);
            print!("{}", render::render_stats(&report, library));
            return Ok(());
        }

        if self.health {
            let library = self.require_library("--health check")?;
            info!("Checking health for library: {}", library);
            let items = self.library_items(&catalog, library).await?;
            info!("Checking health for {} items...", items.len());
            let report = HealthReport::analyze(&items);
            print!("{}", render::render_health(&report, library));
            return Ok(());
        }

        let Some(library) = self.library.as_deref() else {
            let overview = libraries_overview(&catalog).await?;
            print!("{}", render::render_libraries(&overview));
            return Ok(());
        };

        // Full listing with subtitle details.
        info!("Scanning library: {}", library);
        let items = self.library_items(&catalog, library).await?;
        info!("Scanning {} items...", items.len());

        let mut records =
            listing::build_listing(&items, &config.base_url, &identity.machine_identifier);

        if self.list_missing {
            records = listing::without_subtitles(records);
            if records.is_empty() {
                println!("\n✓ All items in the library have subtitles!\n");
                return Ok(());
            }
        }

        let report = render::render_listing(&records);
        print!("{}", report);

        tokio::fs::write(&self.output, &report)
            .await
            .with_context(|| format!("Failed to write report: {}", self.output.display()))?;
        info!("Report saved to: {}", self.output.display());

        Ok(())
    }

    fn require_library(&self, purpose: &str) -> Result<&str> {
        match self.library.as_deref() {
            Some(library) => Ok(library),
            None => bail!("--library is required for {}", purpose),
        }
    }

    /// Resolve the flat item sequence for a named library.
    ///
    /// A missing library is reported but left to the top level to turn into
    /// an exit code.
    async fn library_items(
        &self,
        catalog: &PlexCatalog,
        library: &str,
    ) -> Result<Vec<MediaItem>> {
        let section = catalog.section(library).await.map_err(|err| {
            if matches!(err, CatalogError::SectionNotFound(_)) {
                error!("{}", err);
            }
            anyhow::Error::from(err)
        })?;

        let filter = self.media_type.map(MediaType::from);
        Ok(resolve_items(catalog, &section, filter).await?)
    }
}

/// Collect the overview rows for every library section.
async fn libraries_overview(catalog: &dyn MediaCatalog) -> Result<Vec<LibraryOverview>> {
    let mut overview = Vec::new();
    for section in catalog.sections().await? {
        let items_count = catalog.items(&section).await?.len();
        overview.push(LibraryOverview {
            title: section.title,
            kind: section.kind,
            items_count,
        });
    }
    Ok(overview)
}
