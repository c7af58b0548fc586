//! Display helpers for sizes, durations and long names.

const KIB: f64 = 1024.0;
const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Character limit for the release name shown in a status line.
pub const RELEASE_NAME_LIMIT: usize = 75;
/// Characters kept of a release name longer than [`RELEASE_NAME_LIMIT`].
pub const RELEASE_NAME_KEEP: usize = 75;
/// Character limit for a transferring file name.
pub const FILE_NAME_LIMIT: usize = 60;
/// Characters kept of a file name longer than [`FILE_NAME_LIMIT`].
pub const FILE_NAME_KEEP: usize = 57;

/// Formats a byte count with 1024-based units.
///
/// Counts below one kilobyte are printed as whole bytes without decimals.
///
/// ```
/// use reltag_core::status::human_bytes;
///
/// assert_eq!(human_bytes(512, 2), "512 B");
/// assert_eq!(human_bytes(1536, 2), "1.50 KB");
/// assert_eq!(human_bytes(5 * 1024 * 1024 * 1024, 1), "5.0 GB");
/// ```
#[must_use]
pub fn human_bytes(bytes: u64, precision: usize) -> String {
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    if value < KIB {
        return format!("{bytes} B");
    }

    let mut unit = 0;
    value /= KIB;
    while value >= KIB && unit + 1 < UNITS.len() {
        value /= KIB;
        unit += 1;
    }
    format!("{value:.precision$} {}", UNITS[unit])
}

/// Shortens `text` to its first `keep` characters plus `...` when it is
/// longer than `limit` characters.
#[must_use]
pub fn ellipsize(text: &str, limit: usize, keep: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut short: String = text.chars().take(keep).collect();
    short.push_str("...");
    short
}

/// Formats seconds as zero-padded `HH:MM:SS`. Hours are not wrapped.
#[must_use]
pub fn format_hms(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
