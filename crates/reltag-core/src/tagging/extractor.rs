use tracing::trace;

use crate::rules::{first_match, normalize};
use crate::tagging::table::{CategoryTable, TAG_TABLE};
use crate::types::Tag;

/// Derives categorized tags from a release filename or title.
///
/// Matching is case-insensitive substring containment against fixed rule
/// tables. Within a priority group only the first matching rule emits, so a
/// title carrying both "1080p" and "720p" is tagged "1080p" only. Tags come
/// out in category order (resolution, hdr, codec, audio, language, source,
/// provider, misc), then table order within a category.
#[derive(Debug, Clone, Copy)]
pub struct ReleaseTagExtractor {
    table: &'static [CategoryTable],
}

impl Default for ReleaseTagExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseTagExtractor {
    /// Creates an extractor over the built-in tag table.
    #[must_use]
    pub const fn new() -> Self {
        Self { table: &TAG_TABLE }
    }

    /// Extracts tags from `input`. Empty input yields no tags.
    ///
    /// # Examples
    ///
    /// ```
    /// use reltag_core::tagging::ReleaseTagExtractor;
    ///
    /// let tags = ReleaseTagExtractor::new().extract("Show.Name.S01E02.2160p.BluRay.x265.Atmos-GROUP");
    /// let labels: Vec<&str> = tags.iter().map(|t| t.text.as_str()).collect();
    /// assert_eq!(labels, ["4K", "H265", "Atmos", "BluRay"]);
    /// ```
    #[must_use]
    pub fn extract(&self, input: &str) -> Vec<Tag> {
        if input.is_empty() {
            return Vec::new();
        }

        let upper = normalize(input);
        let mut tags = Vec::new();

        for table in self.table {
            for group in table.groups {
                if let Some(rule) = first_match(group, &upper) {
                    tags.push(Tag::new(table.category, rule.outcome));
                }
            }
        }

        trace!(input, count = tags.len(), "extracted release tags");
        tags
    }
}

/// Extracts tags with the built-in table.
#[must_use]
pub fn extract_tags(input: &str) -> Vec<Tag> {
    ReleaseTagExtractor::new().extract(input)
}
