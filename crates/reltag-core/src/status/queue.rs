//! # SFDL Queue Listing
//!
//! Decodes the `files.json` listing of SFDL job files waiting in the upload
//! directory. Entries come back newest first.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::snapshot::MediaBadge;
use crate::catalog::records::{decode_entries, lenient_f64, lenient_string, lenient_u32, lenient_u64};
use crate::error::{ReltagError, Result};

const SFDL_EXTENSION: &str = ".sfdl";

/// One queued SFDL job file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueuedFile {
    /// File name including the `.sfdl` extension.
    pub name: String,
    /// File size in bytes.
    #[serde(default, deserialize_with = "lenient_u64")]
    pub size: u64,
    /// Modification time in Unix seconds.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub modified: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub media_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub year: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub seasons: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub episodes: Option<u32>,
}

impl QueuedFile {
    /// The name without its `.sfdl` extension.
    #[must_use]
    pub fn release_name(&self) -> &str {
        let len = self.name.len();
        if len >= SFDL_EXTENSION.len()
            && self.name.is_char_boundary(len - SFDL_EXTENSION.len())
            && self.name[len - SFDL_EXTENSION.len()..].eq_ignore_ascii_case(SFDL_EXTENSION)
        {
            &self.name[..len - SFDL_EXTENSION.len()]
        } else {
            &self.name
        }
    }

    #[must_use]
    pub fn media(&self) -> MediaBadge {
        MediaBadge::from_parts(
            self.media_type.as_deref(),
            self.year,
            self.seasons,
            self.episodes,
        )
    }
}

/// Queued SFDL files, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SfdlQueue {
    pub files: Vec<QueuedFile>,
}

#[derive(Deserialize)]
struct QueueDocument {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    files: Vec<Value>,
}

fn default_success() -> bool {
    true
}

impl SfdlQueue {
    /// Decodes a queue listing. Malformed entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ReltagError::Json` for malformed JSON and
    /// `ReltagError::QueueUnavailable` when the listing reports a failure.
    pub fn from_json(raw: &str) -> Result<Self> {
        let document: QueueDocument = serde_json::from_str(raw)?;
        if let Some(error) = document.error {
            return Err(ReltagError::QueueUnavailable(error));
        }
        if !document.success {
            return Err(ReltagError::QueueUnavailable("listing failed".into()));
        }

        let mut files: Vec<QueuedFile> = decode_entries(document.files);
        files.sort_by(|a, b| b.modified.total_cmp(&a.modified));
        Ok(Self { files })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
