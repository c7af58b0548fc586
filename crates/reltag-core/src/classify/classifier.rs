use regex::Regex;
use tracing::debug;

use crate::classify::exclusion::NonVideoFilter;
use crate::error::Result;
use crate::types::{Classification, ClassifiedResult, ExclusionReason, MediaKind};

/// Decides whether a raw search title is a TV episode or a movie.
///
/// Non-video titles (software, archive tools, ebooks, albums, versioned
/// builds) are excluded before any field extraction happens.
#[derive(Debug, Clone)]
pub struct SearchResultClassifier {
    filter: NonVideoFilter,
    re_season: Regex,
    re_year_separated: Regex,
    re_year: Regex,
}

impl SearchResultClassifier {
    /// Constructs a classifier with pre-compiled regex patterns.
    ///
    /// # Errors
    ///
    /// Returns `ReltagError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            filter: NonVideoFilter::new()?,
            re_season: Regex::new(
                r"(?i)(?:^|[^a-z0-9])(?P<marker>s(?P<season>\d{1,2})(?:e(?P<episode>\d{1,2}))?)",
            )?,
            re_year_separated: Regex::new(r"\.(?:19|20)\d{2}\.")?,
            re_year: Regex::new(r"\b((?:19|20)\d{2})\b")?,
        })
    }

    /// Classifies a search title.
    ///
    /// # Examples
    ///
    /// ```
    /// use reltag_core::classify::SearchResultClassifier;
    /// use reltag_core::types::MediaKind;
    ///
    /// let classifier = SearchResultClassifier::new().unwrap();
    /// let result = classifier
    ///     .classify("Show.Name.S01E02.2160p.BluRay.x265.Atmos-GROUP")
    ///     .into_result()
    ///     .unwrap();
    ///
    /// assert_eq!(result.kind, MediaKind::Series);
    /// assert_eq!(result.display_name, "Show Name");
    /// assert_eq!(result.season.as_deref(), Some("01"));
    /// assert_eq!(result.episode.as_deref(), Some("02"));
    /// ```
    #[must_use]
    pub fn classify(&self, title: &str) -> Classification {
        if title.trim().is_empty() {
            return Classification::Excluded {
                reason: ExclusionReason::Empty,
            };
        }

        if let Some(kind) = self.filter.check(title) {
            debug!(title, %kind, "excluding non-video search result");
            return Classification::Excluded {
                reason: ExclusionReason::NonVideo(kind),
            };
        }

        let year = self.extract_year(title);

        let result = match self.re_season.captures(title) {
            Some(caps) => {
                let marker_start = caps.name("marker").map_or(0, |m| m.start());
                ClassifiedResult {
                    kind: MediaKind::Series,
                    display_name: dots_to_spaces(&title[..marker_start]),
                    season: caps.name("season").map(|m| zero_pad(m.as_str())),
                    episode: caps.name("episode").map(|m| zero_pad(m.as_str())),
                    year,
                    link: None,
                    raw_title: title.to_string(),
                }
            }
            None => {
                let name_end = self
                    .re_year_separated
                    .find(title)
                    .map_or(title.len(), |m| m.start());
                ClassifiedResult {
                    kind: MediaKind::Movie,
                    display_name: dots_to_spaces(&title[..name_end]),
                    season: None,
                    episode: None,
                    year,
                    link: None,
                    raw_title: title.to_string(),
                }
            }
        };

        Classification::Classified(result)
    }

    fn extract_year(&self, title: &str) -> Option<String> {
        self.re_year.captures(title).map(|c| c[1].to_string())
    }
}

fn dots_to_spaces(text: &str) -> String {
    text.replace('.', " ").trim().to_string()
}

fn zero_pad(digits: &str) -> String {
    format!("{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NonVideoKind;

    fn classifier() -> SearchResultClassifier {
        SearchResultClassifier::new().unwrap()
    }

    fn classify(title: &str) -> ClassifiedResult {
        classifier()
            .classify(title)
            .into_result()
            .unwrap_or_else(|| panic!("{title} was excluded"))
    }

    #[test]
    fn empty_title_excluded() {
        let c = classifier();
        assert_eq!(
            c.classify(""),
            Classification::Excluded {
                reason: ExclusionReason::Empty
            }
        );
        assert!(c.classify("   ").is_excluded());
    }

    #[test]
    fn software_title_excluded() {
        assert_eq!(
            classifier().classify("Some.App.v2.5.Crack.Keygen"),
            Classification::Excluded {
                reason: ExclusionReason::NonVideo(NonVideoKind::Software)
            }
        );
    }

    #[test]
    fn series_episode() {
        let r = classify("Show.Name.S01E02.2160p.BluRay.x265.Atmos-GROUP");
        assert_eq!(r.kind, MediaKind::Series);
        assert_eq!(r.display_name, "Show Name");
        assert_eq!(r.season.as_deref(), Some("01"));
        assert_eq!(r.episode.as_deref(), Some("02"));
        assert_eq!(r.year, None);
        assert_eq!(r.raw_title, "Show.Name.S01E02.2160p.BluRay.x265.Atmos-GROUP");
    }

    #[test]
    fn season_pack_pads_and_has_no_episode() {
        let r = classify("Show.S1.COMPLETE.German.720p");
        assert_eq!(r.kind, MediaKind::Series);
        assert_eq!(r.display_name, "Show");
        assert_eq!(r.season.as_deref(), Some("01"));
        assert_eq!(r.episode, None);
    }

    #[test]
    fn season_marker_is_case_insensitive() {
        let r = classify("show.name.s02e7.720p");
        assert_eq!(r.season.as_deref(), Some("02"));
        assert_eq!(r.episode.as_deref(), Some("07"));
        assert_eq!(r.display_name, "show name");
    }

    #[test]
    fn series_keeps_year() {
        let r = classify("Show.2021.S02E10.1080p.WEB");
        assert_eq!(r.kind, MediaKind::Series);
        assert_eq!(r.display_name, "Show 2021");
        assert_eq!(r.year.as_deref(), Some("2021"));
    }

    #[test]
    fn codec_letters_are_not_season_markers() {
        let r = classify("Movie.Title.2019.1080p.BluRay.DTS5.1.x264");
        assert_eq!(r.kind, MediaKind::Movie);
    }

    #[test]
    fn movie_with_year() {
        let r = classify("Movie.Title.2019.1080p.WEB-DL.DD5.1.H264-GROUP");
        assert_eq!(r.kind, MediaKind::Movie);
        assert_eq!(r.display_name, "Movie Title");
        assert_eq!(r.year.as_deref(), Some("2019"));
        assert_eq!(r.season, None);
        assert_eq!(r.episode, None);
    }

    #[test]
    fn movie_without_year_keeps_whole_title() {
        let r = classify("Some.Documentary.1080p");
        assert_eq!(r.kind, MediaKind::Movie);
        assert_eq!(r.display_name, "Some Documentary 1080p");
        assert_eq!(r.year, None);
    }

    #[test]
    fn space_separated_movie_year_still_extracted() {
        let r = classify("Movie Title (1999)");
        assert_eq!(r.display_name, "Movie Title (1999)");
        assert_eq!(r.year.as_deref(), Some("1999"));
    }

    #[test]
    fn non_ascii_titles_do_not_panic() {
        let r = classify("Die.Brücke.am.Fluß.1995.German.1080p");
        assert_eq!(r.display_name, "Die Brücke am Fluß");
        assert_eq!(r.year.as_deref(), Some("1995"));
    }

    #[test]
    fn classification_is_deterministic() {
        let c = classifier();
        let title = "Show.Name.S05E11.720p.HDTV.x264-GRP";
        assert_eq!(c.classify(title), c.classify(title));
    }
}
