//! Formatting utilities for file sizes, dates, and other display values.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// Format a byte count with 1024-based units (e.g., "0 B", "1.5 KB", "3 MB").
///
/// One decimal place, dropped when it would be `.0`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0} {}", rounded, UNITS[unit])
    } else {
        format!("{:.1} {}", rounded, UNITS[unit])
    }
}

/// Parse the listing's ISO-8601 modification time into Unix seconds.
///
/// Empty or malformed input yields `None`.
pub fn parse_timestamp(iso: &str) -> Option<i64> {
    let iso = iso.trim();
    if iso.is_empty() {
        return None;
    }
    OffsetDateTime::parse(iso, &Rfc3339)
        .ok()
        .map(OffsetDateTime::unix_timestamp)
}

/// Format Unix seconds as `YYYY-MM-DD HH:MM` (UTC).
pub fn format_timestamp(timestamp: Option<i64>) -> String {
    let Some(ts) = timestamp else {
        return "-".to_string();
    };
    OffsetDateTime::from_unix_timestamp(ts)
        .ok()
        .and_then(|dt| {
            dt.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
                .ok()
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Status-bar text for the number of selected entries.
pub fn format_selection_count(count: usize) -> String {
    match count {
        0 => "No items selected".to_string(),
        1 => "1 item selected".to_string(),
        n => format!("{} items selected", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024 / 2), "1.5 GB");
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("1970-01-01T00:01:40Z"), Some(100));
        assert_eq!(parse_timestamp("2024-01-15T10:30:00Z"), Some(1_705_314_600));
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(Some(1_705_314_600)), "2024-01-15 10:30");
        assert_eq!(format_timestamp(None), "-");
    }

    #[test]
    fn test_format_selection_count() {
        assert_eq!(format_selection_count(0), "No items selected");
        assert_eq!(format_selection_count(1), "1 item selected");
        assert_eq!(format_selection_count(4), "4 items selected");
    }
}
