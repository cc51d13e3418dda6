//! Text renderers for the aggregate reports.
//!
//! Renderers return the full report as a string; the CLI prints it and, for
//! the listing report, persists the same bytes to disk.

use super::{format_bytes, format_runtime, format_uptime, grouped, percentage, sorted_counts};
use crate::analyze::{HealthReport, ItemKind, LibraryItem, QualityReport, StatsReport};
use crate::facts::SubtitleStreamFacts;
use crate::system::SystemReport;
use std::collections::BTreeMap;

/// Detail lists stop after this many entries.
const DETAIL_CAP: usize = 10;

fn heavy_rule() -> String {
    "=".repeat(80)
}

fn light_rule() -> String {
    "-".repeat(80)
}

fn push_section_header(out: &mut String, title: &str) {
    out.push_str(&format!("\n{}\n{}\n", light_rule(), title));
    out.push_str(&format!("{}\n", light_rule()));
}

fn push_report_header(out: &mut String, title: &str) {
    out.push_str(&format!("\n{}\n{}\n{}\n", heavy_rule(), title, heavy_rule()));
}

fn push_report_footer(out: &mut String) {
    out.push_str(&format!("\n{}\n\n", heavy_rule()));
}

fn push_histogram(out: &mut String, histogram: &std::collections::HashMap<String, u64>, total: u64) {
    for (label, count) in sorted_counts(histogram) {
        out.push_str(&format!(
            "{:<15}: {:>5} ({:>5.1}%)\n",
            label,
            grouped(count),
            percentage(count, total)
        ));
    }
}

/// Render the quality distribution report.
pub fn render_quality(report: &QualityReport, library: &str) -> String {
    let mut out = String::new();

    push_report_header(&mut out, &format!("VIDEO QUALITY ANALYSIS - {}", library));
    out.push_str(&format!("\nTotal Items: {}\n", grouped(report.total_items)));

    push_section_header(&mut out, "RESOLUTION DISTRIBUTION");
    push_histogram(&mut out, &report.resolutions, report.total_items);

    push_section_header(&mut out, "VIDEO CODEC DISTRIBUTION");
    push_histogram(&mut out, &report.video_codecs, report.total_items);

    push_section_header(&mut out, "AUDIO CODEC DISTRIBUTION");
    push_histogram(&mut out, &report.audio_codecs, report.total_items);

    push_report_footer(&mut out);
    out
}

/// Render the general statistics report.
pub fn render_stats(report: &StatsReport, library: &str) -> String {
    let mut out = String::new();

    push_report_header(&mut out, &format!("LIBRARY STATISTICS - {}", library));

    out.push_str(&format!("\nTotal Items: {}\n", grouped(report.total_items)));
    out.push_str(&format!("Total Size: {}\n", format_bytes(report.total_size)));
    if report.total_duration > 0 {
        out.push_str(&format!(
            "Total Runtime: {}\n",
            format_runtime(report.total_duration)
        ));
    }

    out.push_str(&format!(
        "\nWatched: {} ({:.1}%)\n",
        grouped(report.watched_count),
        percentage(report.watched_count, report.total_items)
    ));
    out.push_str(&format!(
        "Unwatched: {} ({:.1}%)\n",
        grouped(report.unwatched_count),
        percentage(report.unwatched_count, report.total_items)
    ));

    if !report.by_year.is_empty() {
        push_section_header(&mut out, "BY YEAR (Top 10)");
        for (year, count) in sorted_counts(&report.by_year).into_iter().take(10) {
            out.push_str(&format!("{}: {}\n", year, grouped(count)));
        }
    }

    if !report.by_genre.is_empty() {
        push_section_header(&mut out, "BY GENRE (Top 10)");
        for (genre, count) in sorted_counts(&report.by_genre).into_iter().take(10) {
            out.push_str(&format!("{:<25}: {}\n", genre, grouped(count)));
        }
    }

    if !report.by_rating.is_empty() {
        push_section_header(&mut out, "BY CONTENT RATING");
        for (rating, count) in sorted_counts(&report.by_rating) {
            out.push_str(&format!("{:<15}: {}\n", rating, grouped(count)));
        }
    }

    push_report_footer(&mut out);
    out
}

fn push_flagged<T>(
    out: &mut String,
    entries: &[T],
    all_clear: &str,
    mut line: impl FnMut(&T) -> String,
) {
    if entries.is_empty() {
        out.push_str(&format!("{}\n", all_clear));
        return;
    }
    for (idx, entry) in entries.iter().take(DETAIL_CAP).enumerate() {
        out.push_str(&format!("{}. {}\n", idx + 1, line(entry)));
    }
    if entries.len() > DETAIL_CAP {
        out.push_str(&format!("... and {} more\n", entries.len() - DETAIL_CAP));
    }
}

/// Render the health check report.
pub fn render_health(report: &HealthReport, library: &str) -> String {
    let mut out = String::new();

    push_report_header(&mut out, &format!("LIBRARY HEALTH CHECK - {}", library));
    out.push_str(&format!(
        "\nTotal Items Scanned: {}\n",
        grouped(report.total_items)
    ));

    push_section_header(
        &mut out,
        &format!("MISSING METADATA: {} items", report.missing_metadata.len()),
    );
    push_flagged(&mut out, &report.missing_metadata, "✓ No issues found", |g| {
        format!("{} - Issue: {}", g.title, g.issue)
    });

    push_section_header(
        &mut out,
        &format!("LOW QUALITY (SD): {} items", report.low_quality.len()),
    );
    push_flagged(&mut out, &report.low_quality, "✓ No SD content found", |i| {
        format!("{} - {}", i.title, i.resolution)
    });

    push_section_header(
        &mut out,
        &format!("MISSING SUBTITLES: {} items", report.no_subtitles.len()),
    );
    push_flagged(
        &mut out,
        &report.no_subtitles,
        "✓ All items have subtitles",
        |i| i.title.clone(),
    );

    push_section_header(
        &mut out,
        &format!(
            "VERY LARGE FILES (>50GB): {} items",
            report.very_large_files.len()
        ),
    );
    push_flagged(
        &mut out,
        &report.very_large_files,
        "✓ No files larger than 50GB",
        |f| format!("{} - {}", f.title, format_bytes(f.size)),
    );

    push_section_header(
        &mut out,
        &format!("NEVER WATCHED: {} items", report.never_watched.len()),
    );
    push_flagged(
        &mut out,
        &report.never_watched,
        "✓ All items have been watched at least once",
        |i| i.title.clone(),
    );

    push_report_footer(&mut out);
    out
}

fn push_subtitle_block(out: &mut String, item: &LibraryItem, indent: &str) {
    if item.has_subtitles {
        out.push_str(&format!("{}Subtitles: YES\n", indent));
        let languages = if item.languages.is_empty() {
            "Unknown".to_string()
        } else {
            item.languages.join(", ").to_uppercase()
        };
        out.push_str(&format!("{}Languages: {}\n", indent, languages));
        out.push_str(&format!("{}Streams:\n", indent));
        for stream in &item.subtitle_streams {
            out.push_str(&format!("{}  • {}\n", indent, stream_line(stream)));
        }
    } else {
        out.push_str(&format!("{}Subtitles: NO\n", indent));
    }
}

fn stream_line(stream: &SubtitleStreamFacts) -> String {
    let title = stream
        .title
        .as_deref()
        .map(|t| format!(" - {}", t))
        .unwrap_or_default();
    let forced = if stream.forced { " [FORCED]" } else { "" };
    let placement = if stream.external {
        " [EXTERNAL]"
    } else {
        " [EMBEDDED]"
    };
    format!(
        "{} ({}) - {}{}{}{}",
        stream.language,
        stream.language_code.to_uppercase(),
        stream.format,
        title,
        forced,
        placement
    )
}

fn push_item_details(out: &mut String, item: &LibraryItem, indent: &str, with_last_viewed: bool) {
    out.push_str(&format!("{}Rating Key: {}\n", indent, item.rating_key));
    out.push_str(&format!("{}File Path: {}\n", indent, item.file_path));
    out.push_str(&format!("{}URL: {}\n", indent, item.url));
    out.push_str(&format!("{}File Size: {}\n", indent, item.file_size));
    out.push_str(&format!(
        "{}Quality: {} | Video: {} | Audio: {}\n",
        indent, item.resolution, item.video_codec, item.audio_codec
    ));
    out.push_str(&format!(
        "{}Watched: {} (Views: {})\n",
        indent,
        if item.watched { "✓ Yes" } else { "✗ No" },
        item.view_count
    ));
    if with_last_viewed {
        if let Some(last_viewed) = &item.last_viewed {
            out.push_str(&format!("{}Last Viewed: {}\n", indent, last_viewed));
        }
    }
    push_subtitle_block(out, item, indent);
}

/// Render the full item listing.
///
/// This output is printed to the console and persisted verbatim as the
/// saved report file.
pub fn render_listing(items: &[LibraryItem]) -> String {
    let mut out = String::new();

    let with_subs = items.iter().filter(|item| item.has_subtitles).count();

    out.push_str(&format!("\n{}\n", heavy_rule()));
    out.push_str("LIBRARY ITEMS WITH SUBTITLE DETAILS\n");
    out.push_str(&format!("{}\n", heavy_rule()));
    out.push_str(&format!("Total items: {}\n", items.len()));
    out.push_str(&format!("Items with subtitles: {}\n", with_subs));
    out.push_str(&format!("Items without subtitles: {}\n", items.len() - with_subs));
    out.push_str(&format!("{}\n", heavy_rule()));

    let movies: Vec<&LibraryItem> = items
        .iter()
        .filter(|item| item.kind == ItemKind::Movie)
        .collect();
    let episodes: Vec<&LibraryItem> = items
        .iter()
        .filter(|item| item.kind == ItemKind::Episode)
        .collect();

    if !movies.is_empty() {
        out.push_str(&format!("\nMOVIES ({} items)\n", movies.len()));
        out.push_str(&format!("{}\n", light_rule()));
        for (idx, movie) in movies.iter().take(DETAIL_CAP).enumerate() {
            out.push_str(&format!("\n{}. {}\n", idx + 1, movie.title));
            push_item_details(&mut out, movie, "   ", true);
        }
        if movies.len() > DETAIL_CAP {
            out.push_str(&format!("\n... and {} more\n", movies.len() - DETAIL_CAP));
        }
    }

    if !episodes.is_empty() {
        out.push_str(&format!("\n\nTV EPISODES ({} items)\n", episodes.len()));
        out.push_str(&format!("{}\n", light_rule()));

        // Group the capped slice by show, shows alphabetical, episodes by
        // composite title (which sorts SxxEyy in order).
        let mut shows: BTreeMap<&str, Vec<&LibraryItem>> = BTreeMap::new();
        for episode in episodes.iter().copied().take(DETAIL_CAP) {
            let show = episode
                .title
                .split(" - ")
                .next()
                .unwrap_or(episode.title.as_str());
            shows.entry(show).or_default().push(episode);
        }

        for (show, mut eps) in shows {
            eps.sort_by(|a, b| a.title.cmp(&b.title));
            out.push_str(&format!("\n{} ({} episodes)\n", show, eps.len()));
            for episode in eps {
                out.push_str(&format!("\n  {}\n", episode.title));
                push_item_details(&mut out, episode, "    ", false);
            }
        }

        if episodes.len() > DETAIL_CAP {
            out.push_str(&format!(
                "\n... and {} more\n",
                episodes.len() - DETAIL_CAP
            ));
        }
    }

    out.push_str(&format!("\n{}\n\n", heavy_rule()));
    out
}

/// One row of the libraries overview.
#[derive(Debug, Clone)]
pub struct LibraryOverview {
    pub title: String,
    pub kind: String,
    pub items_count: usize,
}

/// Render the available-libraries overview shown when no library is named.
pub fn render_libraries(libraries: &[LibraryOverview]) -> String {
    let mut out = String::new();

    push_report_header(&mut out, "AVAILABLE PLEX LIBRARIES");

    for library in libraries {
        out.push_str(&format!("\n{}\n", library.title));
        out.push_str(&format!("  Type: {}\n", library.kind));
        out.push_str(&format!("  Items: {}\n", library.items_count));
    }

    out.push_str(&format!("\n{}\n", heavy_rule()));
    out.push_str("\nTo analyze a library, run:\n");
    out.push_str("  plexinfo --library \"Library Name\"\n");
    out.push_str("\nExamples:\n");
    out.push_str("  plexinfo --library \"Movies\"\n");
    out.push_str("  plexinfo --library \"TV Shows\" --list-missing\n");
    out.push_str("  plexinfo --system\n\n");
    out
}

fn kind_label(kind: &str) -> &'static str {
    match kind {
        "movie" => "Movies",
        "show" => "Episodes",
        _ => "Items",
    }
}

/// Render the full system information report.
pub fn render_system(report: &SystemReport) -> String {
    let mut out = String::new();

    push_report_header(&mut out, "PLEX SERVER INFORMATION");

    push_section_header(&mut out, "REMOTE PLEX SERVER");
    if let Some(server) = &report.server {
        out.push_str(&format!("Server Name: {}\n", server.friendly_name));
        out.push_str(&format!(
            "Version: {}\n",
            server.version.as_deref().unwrap_or("N/A")
        ));
        out.push_str(&format!(
            "Platform: {} {}\n",
            server.platform.as_deref().unwrap_or("N/A"),
            server.platform_version.as_deref().unwrap_or("")
        ));
        out.push_str(&format!("Machine ID: {}\n", server.machine_identifier));
    }

    if !report.libraries.is_empty() {
        push_section_header(&mut out, "PLEX LIBRARIES (on remote server)");

        let mut total_items = 0u64;
        let mut total_size = 0u64;
        for library in &report.libraries {
            out.push_str(&format!("\n{} ({})\n", library.name, library.kind));
            out.push_str(&format!(
                "  {}: {}\n",
                kind_label(&library.kind),
                grouped(library.items_count)
            ));
            out.push_str(&format!(
                "  Total Size: {}\n",
                format_bytes(library.total_size)
            ));
            total_items += library.items_count;
            total_size += library.total_size;
        }

        out.push_str("\nTotal across all libraries:\n");
        out.push_str(&format!("  Items: {}\n", grouped(total_items)));
        out.push_str(&format!("  Size: {}\n", format_bytes(total_size)));
    }

    push_section_header(&mut out, "LOCAL CLIENT MACHINE (where this tool is running)");
    let host = &report.host;
    out.push_str(&format!(
        "Hostname: {}\n",
        host.hostname.as_deref().unwrap_or("N/A")
    ));
    out.push_str(&format!(
        "OS: {} {}\n",
        host.os.as_deref().unwrap_or("N/A"),
        host.os_version.as_deref().unwrap_or("")
    ));
    out.push_str(&format!("Architecture: {}\n", host.arch));
    if let Some(cpu) = &host.cpu_model {
        out.push_str(&format!("CPU: {}\n", cpu));
    }
    match host.physical_cores {
        Some(physical) => out.push_str(&format!(
            "Cores: {} physical, {} logical\n",
            physical, host.logical_cores
        )),
        None => out.push_str(&format!("Cores: {} logical\n", host.logical_cores)),
    }
    out.push_str(&format!(
        "Memory: {} used of {}\n",
        format_bytes(host.used_memory),
        format_bytes(host.total_memory)
    ));
    out.push_str(&format!("Uptime: {}\n", format_uptime(host.uptime_seconds)));

    out.push_str(&format!("\n{}\n", heavy_rule()));
    out.push_str("NOTE: System stats (CPU, RAM, uptime) shown above are for the LOCAL\n");
    out.push_str("machine running this tool, NOT the remote Plex server.\n");
    out.push_str("The Plex API does not expose remote server hardware information.\n");
    out.push_str(&format!("{}\n\n", heavy_rule()));
    out
}
