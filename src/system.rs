//! System information for the `--system` report.
//!
//! Combines remote server identity and per-library totals with a summary of
//! the local machine. Every remote read is best-effort: a failing section is
//! logged at debug and skipped, never fatal.

use sysinfo::System;
use tracing::debug;

use crate::catalog::{CatalogError, MediaCatalog, Section, ServerIdentity};

/// Item count and total size for one remote library.
#[derive(Debug, Clone)]
pub struct LibrarySummary {
    pub name: String,
    pub kind: String,
    pub items_count: u64,
    pub total_size: u64,
}

/// Summary of the machine this tool runs on.
#[derive(Debug, Clone, Default)]
pub struct HostInfo {
    pub hostname: Option<String>,
    pub os: Option<String>,
    pub os_version: Option<String>,
    pub arch: String,
    pub cpu_model: Option<String>,
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
    pub total_memory: u64,
    pub used_memory: u64,
    pub uptime_seconds: u64,
}

/// Everything the system renderer needs.
#[derive(Debug, Clone)]
pub struct SystemReport {
    pub host: HostInfo,
    pub server: Option<ServerIdentity>,
    pub libraries: Vec<LibrarySummary>,
}

/// Gather the full system report.
pub async fn gather(catalog: &dyn MediaCatalog) -> SystemReport {
    let host = host_info();

    let server = match catalog.identity().await {
        Ok(identity) => Some(identity),
        Err(err) => {
            debug!("Could not get Plex server info: {}", err);
            None
        }
    };

    let mut libraries = Vec::new();
    match catalog.sections().await {
        Ok(sections) => {
            for section in sections {
                match library_summary(catalog, &section).await {
                    Ok(summary) => libraries.push(summary),
                    Err(err) => {
                        debug!("Could not summarize library '{}': {}", section.title, err)
                    }
                }
            }
        }
        Err(err) => debug!("Could not get library info: {}", err),
    }

    SystemReport {
        host,
        server,
        libraries,
    }
}

/// Count items and sum file sizes for one library.
///
/// Show libraries count episodes rather than shows; every other kind counts
/// its direct items. A show whose episodes cannot be fetched is skipped.
async fn library_summary(
    catalog: &dyn MediaCatalog,
    section: &Section,
) -> Result<LibrarySummary, CatalogError> {
    let mut items_count = 0u64;
    let mut total_size = 0u64;

    if section.is_show_kind() {
        for show in catalog.items(section).await? {
            match catalog.episodes(&show).await {
                Ok(episodes) => {
                    for episode in &episodes {
                        items_count += 1;
                        if let Some(size) = episode.file_size() {
                            total_size += size;
                        }
                    }
                }
                Err(err) => debug!("Could not list episodes of '{}': {}", show.title, err),
            }
        }
    } else {
        for item in catalog.items(section).await? {
            items_count += 1;
            if let Some(size) = item.file_size() {
                total_size += size;
            }
        }
    }

    Ok(LibrarySummary {
        name: section.title.clone(),
        kind: section.kind.clone(),
        items_count,
        total_size,
    })
}

/// Snapshot the local machine.
pub fn host_info() -> HostInfo {
    let mut sys = System::new_all();
    sys.refresh_all();

    HostInfo {
        hostname: System::host_name(),
        os: System::name(),
        os_version: System::os_version(),
        arch: System::cpu_arch(),
        cpu_model: sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().to_string())
            .filter(|brand| !brand.is_empty()),
        physical_cores: System::physical_core_count(),
        logical_cores: sys.cpus().len(),
        total_memory: sys.total_memory(),
        used_memory: sys.used_memory(),
        uptime_seconds: System::uptime(),
    }
}
