use serde::{Deserialize, Serialize};

use super::units::format_hms;

const KIB: u64 = 1024;
const MIB: f64 = 1024.0 * 1024.0;
const DEFAULT_ELAPSED: &str = "00:00:00";

/// Aggregate transfer counters decoded from the `loading` field.
///
/// The field is pipe-separated: `_|done_kb|total_kb|percent|speed_mb_s|elapsed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferProgress {
    pub done_bytes: u64,
    pub total_bytes: u64,
    /// Percentage as reported by the loader, 0 when absent.
    pub percent: f64,
    /// Transfer rate in MiB per second.
    pub speed_mb_s: f64,
    /// Elapsed time, verbatim.
    pub elapsed: String,
}

impl TransferProgress {
    /// Decodes a `loading` field. Missing or unparsable parts become zero.
    #[must_use]
    pub fn parse(loading: &str) -> Self {
        let parts: Vec<&str> = loading.split('|').collect();
        let part = |index: usize| parts.get(index).map(|p| p.trim()).unwrap_or("");

        let elapsed = match part(5) {
            "" => DEFAULT_ELAPSED.to_string(),
            value => value.to_string(),
        };

        Self {
            done_bytes: kib_to_bytes(part(1)),
            total_bytes: kib_to_bytes(part(2)),
            percent: parse_float(part(3)),
            speed_mb_s: parse_float(part(4)),
            elapsed,
        }
    }

    /// Bytes still to transfer.
    #[must_use]
    pub fn remaining_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.done_bytes)
    }

    /// Seconds until completion at the current rate, 0 when stalled.
    #[must_use]
    pub fn eta_seconds(&self) -> u64 {
        let speed = self.speed_mb_s * MIB;
        if !speed.is_finite() || speed <= 0.0 {
            return 0;
        }
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let eta = (self.remaining_bytes() as f64 / speed).round() as u64;
        eta
    }

    /// [`eta_seconds`](Self::eta_seconds) as `HH:MM:SS`.
    #[must_use]
    pub fn eta(&self) -> String {
        format_hms(self.eta_seconds())
    }
}

/// One file of a running transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileProgress {
    pub name: String,
    pub size: u64,
    pub downloaded: u64,
}

impl FileProgress {
    /// Decodes `loading_file_array`: `name|size|downloaded` entries separated
    /// by `;`. A downloaded value of `NULL` counts as nothing transferred.
    #[must_use]
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(';')
            .filter_map(|entry| {
                let mut fields = entry.split('|');
                let name = fields.next()?.trim();
                if name.is_empty() {
                    return None;
                }
                let size = fields.next().and_then(leading_int).unwrap_or(0);
                let downloaded = match fields.next().map(str::trim) {
                    Some("NULL") | None => 0,
                    Some(value) => leading_int(value).unwrap_or(0),
                };
                Some(Self {
                    name: name.to_string(),
                    size,
                    downloaded,
                })
            })
            .collect()
    }

    /// Whole-number completion percentage, 0 for an unknown size.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.downloaded as f64 / self.size as f64 * 100.0).round() as u32;
        percent
    }
}

fn parse_float(value: &str) -> f64 {
    value.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn kib_to_bytes(value: &str) -> u64 {
    let kib = parse_float(value);
    if kib <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let bytes = (kib * KIB as f64) as u64;
    bytes
}

fn leading_int(value: &str) -> Option<u64> {
    let value = value.trim();
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().ok()
}
