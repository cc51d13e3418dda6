//! Report formatting.
//!
//! Pure helpers shared by every renderer, plus the renderers themselves in
//! [`render`]. Nothing here touches the network; renderers take finished
//! aggregate structures and return the text verbatim.

pub mod render;

use std::collections::HashMap;

/// Format a byte count with binary prefixes, two decimal places.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    let mut value = bytes as f64;
    for unit in &UNITS[..UNITS.len() - 1] {
        if value < 1024.0 {
            return format!("{:.2} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.2} PB", value)
}

/// `<hours>h <minutes>m` from a millisecond runtime.
pub fn format_runtime(ms: u64) -> String {
    let seconds = ms / 1000;
    format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}

/// `<days>d <hours>h <minutes>m` from a second duration.
pub fn format_uptime(seconds: u64) -> String {
    format!(
        "{}d {}h {}m",
        seconds / 86400,
        (seconds % 86400) / 3600,
        (seconds % 3600) / 60
    )
}

/// Share of `count` in `total` as a percentage; an empty total yields 0.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Histogram entries sorted by count descending, label ascending on ties.
pub fn sorted_counts(histogram: &HashMap<String, u64>) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = histogram
        .iter()
        .map(|(label, count)| (label.as_str(), *count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

/// Thousands-grouped integer, e.g. `1234567` becomes `1,234,567`.
pub fn grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
