use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a detected release attribute.
///
/// The declaration order is the order in which the extractor walks the
/// categories, and therefore the order of the emitted tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    /// Vertical resolution ("4K", "1080p").
    Resolution,
    /// High dynamic range format.
    Hdr,
    /// Video codec.
    Codec,
    /// Audio format and channel layout.
    Audio,
    /// Language and subtitle flags.
    Language,
    /// Release source (BluRay, WEB-DL, ...).
    Source,
    /// Streaming provider the release was captured from.
    Provider,
    /// Scene flags such as REPACK or PROPER.
    Misc,
}

impl TagCategory {
    /// All categories in traversal order.
    pub const ALL: [TagCategory; 8] = [
        Self::Resolution,
        Self::Hdr,
        Self::Codec,
        Self::Audio,
        Self::Language,
        Self::Source,
        Self::Provider,
        Self::Misc,
    ];

    /// Stable presentation class used by renderers to color a tag badge.
    #[must_use]
    pub fn style_class(self) -> &'static str {
        match self {
            Self::Resolution => "bg-yellow-500/20 text-yellow-400 border-yellow-500/30",
            Self::Hdr => "bg-pink-500/20 text-pink-400 border-pink-500/30",
            Self::Codec => "bg-blue-500/20 text-blue-400 border-blue-500/30",
            Self::Audio => "bg-violet-500/20 text-violet-400 border-violet-500/30",
            Self::Language => "bg-lime-500/20 text-lime-400 border-lime-500/30",
            Self::Source => "bg-cyan-500/20 text-cyan-400 border-cyan-500/30",
            Self::Provider => "bg-red-600/20 text-red-400 border-red-600/30",
            Self::Misc => "bg-gray-500/20 text-gray-400 border-gray-500/30",
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution => write!(f, "resolution"),
            Self::Hdr => write!(f, "hdr"),
            Self::Codec => write!(f, "codec"),
            Self::Audio => write!(f, "audio"),
            Self::Language => write!(f, "language"),
            Self::Source => write!(f, "source"),
            Self::Provider => write!(f, "provider"),
            Self::Misc => write!(f, "misc"),
        }
    }
}

/// One detected release attribute with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Attribute category.
    pub category: TagCategory,
    /// Display label, e.g. "4K", "H265", "Atmos".
    pub text: String,
}

impl Tag {
    /// Creates a tag.
    #[must_use]
    pub fn new(category: TagCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }

    /// Presentation class for this tag's category.
    #[must_use]
    pub fn style_class(&self) -> &'static str {
        self.category.style_class()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.text)
    }
}
