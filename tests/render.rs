//! Renderer Tests
//!
//! Formatting helpers, report text shape, detail caps, and persistence of
//! the listing report.

use plexinfo::analyze::{
    build_listing, FlaggedItem, HealthReport, QualityReport, StatsReport,
};
use plexinfo::catalog::{Media, MediaItem, Part};
use plexinfo::report::render::{
    render_health, render_libraries, render_listing, render_quality, render_stats, render_system,
    LibraryOverview,
};
use plexinfo::report::{format_bytes, format_runtime, format_uptime, percentage};
use plexinfo::system::{HostInfo, LibrarySummary, SystemReport};
use plexinfo::web::parse_library_names;

#[test]
fn test_format_bytes() {
    assert_eq!(format_bytes(0), "0.00 B");
    assert_eq!(format_bytes(1536), "1.50 KB");
    assert_eq!(format_bytes(1073741824), "1.00 GB");
    assert_eq!(format_bytes(1099511627776), "1.00 TB");
}

#[test]
fn test_format_runtime() {
    assert_eq!(format_runtime(0), "0h 0m");
    assert_eq!(format_runtime(5_400_000), "1h 30m");
    assert_eq!(format_runtime(59_000), "0h 0m");
}

#[test]
fn test_format_uptime() {
    assert_eq!(format_uptime(90_061), "1d 1h 1m");
    assert_eq!(format_uptime(0), "0d 0h 0m");
}

#[test]
fn test_percentage_guard() {
    assert_eq!(percentage(5, 0), 0.0);
    assert_eq!(percentage(1, 4), 25.0);
}

fn movie(title: &str, rating_key: &str) -> MediaItem {
    MediaItem {
        rating_key: rating_key.to_string(),
        title: title.to_string(),
        kind: "movie".to_string(),
        media: vec![Media {
            width: Some(1920),
            height: Some(1080),
            parts: vec![Part {
                file: Some(format!("/data/{}.mkv", rating_key)),
                size: Some(1536),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
}

#[test]
fn test_render_listing_movie_block() {
    let items = vec![movie("Heat", "10")];
    let records = build_listing(&items, "http://plex.test:32400", "m1");
    let report = render_listing(&records);

    assert!(report.contains("LIBRARY ITEMS WITH SUBTITLE DETAILS"));
    assert!(report.contains("Total items: 1"));
    assert!(report.contains("Items without subtitles: 1"));
    assert!(report.contains("MOVIES (1 items)"));
    assert!(report.contains("\n1. Heat\n"));
    assert!(report.contains("   File Size: 1.50 KB\n"));
    assert!(report.contains("   Quality: 1080p | Video: Unknown | Audio: Unknown\n"));
    assert!(report.contains("   Watched: ✗ No (Views: 0)\n"));
    assert!(report.contains("   Subtitles: NO\n"));
}

#[test]
fn test_render_listing_caps_movies_at_ten() {
    let items: Vec<MediaItem> = (0..13)
        .map(|n| movie(&format!("Movie {}", n), &n.to_string()))
        .collect();
    let records = build_listing(&items, "http://plex.test:32400", "m1");
    let report = render_listing(&records);

    assert!(report.contains("MOVIES (13 items)"));
    assert!(report.contains("\n10. Movie 9\n"));
    assert!(!report.contains("Movie 10"));
    assert!(report.contains("... and 3 more"));
}

#[test]
fn test_render_listing_groups_episodes_by_show() {
    let mut episode = movie("Ozymandias", "200");
    episode.kind = "episode".to_string();
    episode.grandparent_title = Some("Breaking Bad".to_string());
    episode.parent_index = Some(5);
    episode.index = Some(14);

    let records = build_listing(&[episode], "http://plex.test:32400", "m1");
    let report = render_listing(&records);

    assert!(report.contains("TV EPISODES (1 items)"));
    assert!(report.contains("\nBreaking Bad (1 episodes)\n"));
    assert!(report.contains("\n  Breaking Bad - S05E14 - Ozymandias\n"));
}

#[test]
fn test_listing_report_persists_byte_identically() {
    let records = build_listing(&[movie("Heat", "10")], "http://plex.test:32400", "m1");
    let report = render_listing(&records);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plex_info.txt");
    std::fs::write(&path, &report).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), report);
}

#[test]
fn test_render_quality_empty_library() {
    let report = QualityReport::analyze(&[]);
    let text = render_quality(&report, "Movies");
    assert!(text.contains("VIDEO QUALITY ANALYSIS - Movies"));
    assert!(text.contains("Total Items: 0"));
}

#[test]
fn test_render_quality_percentages() {
    let items = vec![movie("A", "1"), movie("B", "2")];
    let report = QualityReport::analyze(&items);
    let text = render_quality(&report, "Movies");
    assert!(text.contains("1080p"));
    assert!(text.contains("(100.0%)"));
}

#[test]
fn test_render_stats_sections() {
    let mut item = movie("A", "1");
    item.year = Some(2020);
    item.duration = Some(5_400_000);
    let text = render_stats(&StatsReport::analyze(&[item]), "Movies");

    assert!(text.contains("LIBRARY STATISTICS - Movies"));
    assert!(text.contains("Total Size: 1.50 KB"));
    assert!(text.contains("Total Runtime: 1h 30m"));
    assert!(text.contains("Watched: 0 (  0.0%)") || text.contains("Watched: 0 (0.0%)"));
    assert!(text.contains("BY YEAR (Top 10)"));
    assert!(text.contains("2020: 1"));
}

#[test]
fn test_render_health_caps_details() {
    let mut report = HealthReport::default();
    report.total_items = 12;
    for n in 0..12 {
        report.never_watched.push(FlaggedItem {
            title: format!("Item {}", n),
            rating_key: n.to_string(),
        });
    }
    let text = render_health(&report, "Movies");

    assert!(text.contains("NEVER WATCHED: 12 items"));
    assert!(text.contains("10. Item 9"));
    assert!(!text.contains("Item 10"));
    assert!(text.contains("... and 2 more"));
    // Untripped categories print their all-clear line.
    assert!(text.contains("✓ No issues found"));
    assert!(text.contains("✓ All items have subtitles"));
}

#[test]
fn test_render_libraries_round_trips_through_shim_parser() {
    let overview = vec![
        LibraryOverview {
            title: "Movies".to_string(),
            kind: "movie".to_string(),
            items_count: 42,
        },
        LibraryOverview {
            title: "TV Shows".to_string(),
            kind: "show".to_string(),
            items_count: 12,
        },
    ];
    let text = render_libraries(&overview);
    assert!(text.contains("AVAILABLE PLEX LIBRARIES"));
    assert!(text.contains("  Type: movie\n"));

    // The web shim extracts exactly the library names from this output.
    assert_eq!(parse_library_names(&text), ["Movies", "TV Shows"]);
}

#[test]
fn test_render_system_sections() {
    let report = SystemReport {
        host: HostInfo {
            hostname: Some("htpc".to_string()),
            logical_cores: 8,
            uptime_seconds: 90_061,
            ..Default::default()
        },
        server: Some(plexinfo::catalog::ServerIdentity {
            friendly_name: "Den".to_string(),
            machine_identifier: "m1".to_string(),
            version: Some("1.40.0".to_string()),
            ..Default::default()
        }),
        libraries: vec![LibrarySummary {
            name: "Movies".to_string(),
            kind: "movie".to_string(),
            items_count: 2,
            total_size: 3 * 1024 * 1024 * 1024,
        }],
    };
    let text = render_system(&report);

    assert!(text.contains("PLEX SERVER INFORMATION"));
    assert!(text.contains("Server Name: Den"));
    assert!(text.contains("Movies (movie)"));
    assert!(text.contains("  Movies: 2\n"));
    assert!(text.contains("  Total Size: 3.00 GB\n"));
    assert!(text.contains("Hostname: htpc"));
    assert!(text.contains("Uptime: 1d 1h 1m"));
    assert!(text.contains("NOTE: System stats"));
}
