//! # Loader Status Snapshots
//!
//! Decodes the `status.json` document a download loader publishes while it
//! works, and derives the phase, media badge and transfer counters from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::progress::{FileProgress, TransferProgress};
use crate::catalog::records::{lenient_string, lenient_u32};
use crate::error::{ReltagError, Result};

const EXTRACTING_PREFIX: &str = "Entpacke Archive";

/// What the loader is currently doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "message", rename_all = "snake_case")]
pub enum Phase {
    /// Nothing running.
    Idle,
    /// Files are being transferred.
    Loading,
    /// Downloaded archives are being unpacked.
    Extracting(String),
    /// Any other loader message, verbatim.
    Other(String),
}

impl Phase {
    /// Maps the loader's `action` field to a phase.
    #[must_use]
    pub fn from_action(action: Option<&str>) -> Self {
        match action.map(str::trim) {
            None | Some("" | "NULL" | "done") => Self::Idle,
            Some("loading") => Self::Loading,
            Some(message) if message.starts_with(EXTRACTING_PREFIX) => {
                Self::Extracting(message.to_string())
            }
            Some(message) => Self::Other(message.to_string()),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Loading | Self::Extracting(_))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Extracting(message) | Self::Other(message) => write!(f, "{message}"),
        }
    }
}

/// Media information attached to the current release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaBadge {
    Movie {
        year: Option<u32>,
    },
    Tv {
        seasons: Option<u32>,
        episodes: Option<u32>,
    },
    Unknown,
}

impl MediaBadge {
    /// Builds a badge from a `media_type` of `movie` or `tv` and its counts.
    /// Any other type is unknown.
    #[must_use]
    pub fn from_parts(
        media_type: Option<&str>,
        year: Option<u32>,
        seasons: Option<u32>,
        episodes: Option<u32>,
    ) -> Self {
        match media_type.map(str::trim) {
            Some("movie") => Self::Movie { year },
            Some("tv") => Self::Tv { seasons, episodes },
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for MediaBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Movie { year: Some(year) } => write!(f, "Movie ({year})"),
            Self::Movie { year: None } => write!(f, "Movie"),
            Self::Tv {
                seasons: None,
                episodes: None,
            } => write!(f, "Series"),
            Self::Tv { seasons, episodes } => {
                let count = |n: Option<u32>| n.map_or_else(|| "?".to_string(), |n| n.to_string());
                write!(
                    f,
                    "Series ({} seasons, {} episodes)",
                    count(seasons),
                    count(episodes)
                )
            }
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One entry of the loader's status document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,
    /// Loader state, `done` when idle.
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    /// Time of the last loader activity.
    #[serde(default, deserialize_with = "lenient_string")]
    pub datetime: Option<String>,
    /// Release name of the job being processed.
    #[serde(default, deserialize_with = "lenient_string")]
    pub sfdl: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub media_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub media_year: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub media_seasons: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub media_episodes: Option<u32>,
    /// Files transferred in parallel.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub loading_mt_files: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub loading_total_files: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub loading: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub loading_file_array: Option<String>,
}

#[derive(Deserialize)]
struct StatusDocument {
    #[serde(default)]
    data: Vec<StatusSnapshot>,
}

impl StatusSnapshot {
    /// Decodes a status document and returns its first entry.
    ///
    /// # Errors
    ///
    /// Returns `ReltagError::Json` for malformed JSON and
    /// `ReltagError::EmptySnapshot` when `data` has no entries.
    pub fn from_json(raw: &str) -> Result<Self> {
        let document: StatusDocument = serde_json::from_str(raw)?;
        document
            .data
            .into_iter()
            .next()
            .ok_or(ReltagError::EmptySnapshot)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        Phase::from_action(self.action.as_deref())
    }

    #[must_use]
    pub fn media(&self) -> MediaBadge {
        MediaBadge::from_parts(
            self.media_type.as_deref(),
            self.media_year,
            self.media_seasons,
            self.media_episodes,
        )
    }

    /// Aggregate counters, if the loader reported any.
    #[must_use]
    pub fn transfer(&self) -> Option<TransferProgress> {
        self.loading
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(TransferProgress::parse)
    }

    /// Per-file counters.
    #[must_use]
    pub fn files(&self) -> Vec<FileProgress> {
        self.loading_file_array
            .as_deref()
            .map(FileProgress::parse_list)
            .unwrap_or_default()
    }
}
