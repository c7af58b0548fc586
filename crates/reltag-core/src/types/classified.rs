use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a search result is a TV episode/season or a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Series,
    Movie,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Series => write!(f, "Series"),
            Self::Movie => write!(f, "Movie"),
        }
    }
}

/// Family of non-video content a title was rejected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonVideoKind {
    /// Cracks, keygens, installers.
    Software,
    /// Archive utilities such as WinRAR or 7-Zip.
    ArchiveTool,
    /// EPUB/MOBI/PDF books.
    Ebook,
    /// Music albums and discographies.
    AudioAlbum,
    /// Version or build numbers ("v2.5", "Build 1234").
    VersionMarker,
}

impl fmt::Display for NonVideoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Software => write!(f, "software"),
            Self::ArchiveTool => write!(f, "archive tool"),
            Self::Ebook => write!(f, "ebook"),
            Self::AudioAlbum => write!(f, "audio album"),
            Self::VersionMarker => write!(f, "version marker"),
        }
    }
}

/// Why a title produced no classified result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "reason", content = "kind", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// The title is empty or whitespace-only.
    Empty,
    /// The title matched a non-video keyword family.
    NonVideo(NonVideoKind),
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty title"),
            Self::NonVideo(kind) => write!(f, "non-video content ({kind})"),
        }
    }
}

/// Structured view of a raw search-API title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedResult {
    pub kind: MediaKind,

    /// Series name or cleaned movie title.
    pub display_name: String,

    /// Two-digit season number (series only).
    pub season: Option<String>,

    /// Two-digit episode number (series only, absent for season packs).
    pub episode: Option<String>,

    /// Four-digit year found anywhere in the title.
    pub year: Option<String>,

    /// External reference URL, attached by the caller.
    pub link: Option<String>,

    /// Original unmodified title, kept for tag extraction.
    pub raw_title: String,
}

impl ClassifiedResult {
    /// Attaches an external reference URL.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// `S01E02`-style label, or `S01` for season packs. `None` for movies.
    #[must_use]
    pub fn episode_label(&self) -> Option<String> {
        let season = self.season.as_deref()?;
        Some(match self.episode.as_deref() {
            Some(episode) => format!("S{season}E{episode}"),
            None => format!("S{season}"),
        })
    }
}

/// Outcome of classifying a search title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Classification {
    Classified(ClassifiedResult),
    Excluded { reason: ExclusionReason },
}

impl Classification {
    /// The classified result, if the title was not excluded.
    #[must_use]
    pub fn result(&self) -> Option<&ClassifiedResult> {
        match self {
            Self::Classified(result) => Some(result),
            Self::Excluded { .. } => None,
        }
    }

    /// Consumes the classification, yielding the result if any.
    #[must_use]
    pub fn into_result(self) -> Option<ClassifiedResult> {
        match self {
            Self::Classified(result) => Some(result),
            Self::Excluded { .. } => None,
        }
    }

    #[must_use]
    pub fn is_excluded(&self) -> bool {
        matches!(self, Self::Excluded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> ClassifiedResult {
        ClassifiedResult {
            kind: MediaKind::Series,
            display_name: "Show Name".into(),
            season: Some("01".into()),
            episode: Some("02".into()),
            year: None,
            link: None,
            raw_title: "Show.Name.S01E02".into(),
        }
    }

    #[test]
    fn episode_label_variants() {
        let mut r = series();
        assert_eq!(r.episode_label().as_deref(), Some("S01E02"));

        r.episode = None;
        assert_eq!(r.episode_label().as_deref(), Some("S01"));

        r.season = None;
        assert_eq!(r.episode_label(), None);
    }

    #[test]
    fn with_link_sets_link() {
        let r = series().with_link("https://example.org/t/1");
        assert_eq!(r.link.as_deref(), Some("https://example.org/t/1"));
    }

    #[test]
    fn classification_accessors() {
        let classified = Classification::Classified(series());
        assert!(!classified.is_excluded());
        assert_eq!(classified.result().map(|r| r.kind), Some(MediaKind::Series));

        let excluded = Classification::Excluded {
            reason: ExclusionReason::NonVideo(NonVideoKind::Software),
        };
        assert!(excluded.is_excluded());
        assert!(excluded.into_result().is_none());
    }

    #[test]
    fn excluded_serializes_with_reason() {
        let excluded = Classification::Excluded {
            reason: ExclusionReason::NonVideo(NonVideoKind::Ebook),
        };
        let json = serde_json::to_string(&excluded).unwrap();
        assert_eq!(
            json,
            r#"{"outcome":"excluded","reason":{"reason":"non_video","kind":"ebook"}}"#
        );
        let back: Classification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, excluded);
    }

    #[test]
    fn exclusion_reason_display() {
        assert_eq!(ExclusionReason::Empty.to_string(), "empty title");
        assert_eq!(
            ExclusionReason::NonVideo(NonVideoKind::AudioAlbum).to_string(),
            "non-video content (audio album)"
        );
    }
}
