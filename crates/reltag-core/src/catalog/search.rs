use std::cmp::Ordering;
use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::records::{Catalog, MovieRecord, SeriesRecord};
use crate::error::{ReltagError, Result};
use crate::types::MediaKind;

/// Shortest accepted search term, in characters.
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Forum thread link for movie uploads; `{tid}` is replaced by the thread id.
pub const DEFAULT_THREAD_URL: &str = "http://mlcboard.com/forum/showthread.php?t={tid}";

/// Configuration for catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum trimmed query length in characters.
    pub min_query_len: usize,
    /// Link template for movie uploads.
    pub thread_url_template: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            thread_url_template: DEFAULT_THREAD_URL.to_string(),
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum query length.
    pub fn with_min_query_len(mut self, len: usize) -> Self {
        self.min_query_len = len;
        self
    }

    /// Set the movie upload link template.
    pub fn with_thread_url_template(mut self, template: impl Into<String>) -> Self {
        self.thread_url_template = template.into();
        self
    }

    fn thread_url(&self, tid: &str) -> String {
        self.thread_url_template.replace("{tid}", tid)
    }
}

/// A validated, normalized search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Trimmed, lowercased input; matched against movie names.
    pub term: String,
    /// `term` with " s1" rewritten to ".s1"; matched against series.
    pub normalized: String,
    /// Two-digit season the series results are restricted to.
    pub season_filter: Option<String>,
}

/// One search result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub kind: MediaKind,
    pub name: Option<String>,
    pub link: Option<String>,
    pub series: Option<String>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub year: Option<u32>,
    /// Joined quality list of a movie, "N/A" when the list is empty.
    pub quality: Option<String>,
    /// Release name of a movie upload; carries the full release info.
    pub upload_title: Option<String>,
}

impl SearchHit {
    /// The string tags and scores should be derived from.
    #[must_use]
    pub fn tag_source(&self) -> &str {
        self.upload_title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    /// Series name for series hits, movie name otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let name = match self.kind {
            MediaKind::Series => self.series.as_deref(),
            MediaKind::Movie => self.name.as_deref(),
        };
        name.unwrap_or_default()
    }

    /// `S01E02` label for series hits with both numbers.
    #[must_use]
    pub fn episode_label(&self) -> Option<String> {
        match (self.kind, self.season, self.episode) {
            (MediaKind::Series, Some(season), Some(episode)) => {
                Some(format!("S{season:02}E{episode:02}"))
            }
            _ => None,
        }
    }
}

/// Substring search over the series and movie feeds.
#[derive(Debug, Clone)]
pub struct CatalogSearch {
    config: SearchConfig,
    re_season_spacing: Regex,
    re_season_filter: Regex,
}

impl CatalogSearch {
    /// Constructs a search with pre-compiled patterns.
    ///
    /// # Errors
    ///
    /// Returns `ReltagError::RegexError` if any pattern fails to compile.
    pub fn new(config: SearchConfig) -> Result<Self> {
        Ok(Self {
            config,
            re_season_spacing: Regex::new(r"\s+s(\d)")?,
            re_season_filter: Regex::new(r"(?i)s(\d{1,2})")?,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Validates and normalizes a raw search term.
    ///
    /// # Errors
    ///
    /// Returns `ReltagError::QueryTooShort` if the trimmed term is shorter
    /// than the configured minimum.
    pub fn query(&self, input: &str) -> Result<SearchQuery> {
        let term = input.trim().to_lowercase();
        let len = term.chars().count();
        if len < self.config.min_query_len {
            return Err(ReltagError::QueryTooShort {
                min: self.config.min_query_len,
                len,
            });
        }

        let normalized = self
            .re_season_spacing
            .replace_all(&term, ".s$1")
            .into_owned();
        let season_filter = self
            .re_season_filter
            .captures(&normalized)
            .map(|c| format!("{:0>2}", &c[1]));

        Ok(SearchQuery {
            term,
            normalized,
            season_filter,
        })
    }

    /// Searches both feeds and returns hits in display order: series first
    /// by season and episode, then movies newest first.
    ///
    /// # Errors
    ///
    /// Returns `ReltagError::QueryTooShort` for too-short terms.
    pub fn search(&self, catalog: &Catalog, input: &str) -> Result<Vec<SearchHit>> {
        let query = self.query(input)?;

        let mut hits = self.series_hits(&catalog.series, &query);
        hits.extend(catalog.movies.iter().flat_map(|m| self.movie_hits(m, &query)));
        sort_hits(&mut hits);

        debug!(term = %query.term, hits = hits.len(), "catalog search finished");
        Ok(hits)
    }

    fn series_hits(&self, records: &[SeriesRecord], query: &SearchQuery) -> Vec<SearchHit> {
        let mut seen = HashSet::new();
        let mut hits = Vec::new();

        for record in records {
            let matches = |field: &Option<String>| {
                field
                    .as_deref()
                    .is_some_and(|v| v.to_lowercase().contains(&query.normalized))
            };
            if !matches(&record.name) && !matches(&record.series) {
                continue;
            }

            if let (Some(filter), Some(season)) = (&query.season_filter, record.season) {
                if format!("{season:02}") != *filter {
                    continue;
                }
            }

            let key = (record.series.clone(), record.season, record.episode);
            if !seen.insert(key) {
                continue;
            }

            hits.push(SearchHit {
                kind: MediaKind::Series,
                name: record.name.clone(),
                link: record.link.clone(),
                series: record.series.clone(),
                season: record.season,
                episode: record.episode,
                year: None,
                quality: None,
                upload_title: None,
            });
        }

        hits
    }

    fn movie_hits(&self, record: &MovieRecord, query: &SearchQuery) -> Vec<SearchHit> {
        let matches = record
            .name
            .as_deref()
            .is_some_and(|n| n.to_lowercase().contains(&query.term));
        if !matches {
            return Vec::new();
        }

        let quality = if record.quality.is_empty() {
            "N/A".to_string()
        } else {
            record.quality.join(", ")
        };

        let hit = |link: Option<String>, upload_title: Option<String>| SearchHit {
            kind: MediaKind::Movie,
            name: record.name.clone(),
            link,
            series: None,
            season: None,
            episode: None,
            year: record.year,
            quality: Some(quality.clone()),
            upload_title,
        };

        if record.uploads.is_empty() {
            return vec![hit(None, None)];
        }

        record
            .uploads
            .iter()
            .map(|upload| {
                let link = upload.tid.as_deref().map(|tid| self.config.thread_url(tid));
                hit(link, upload.title.clone())
            })
            .collect()
    }
}

/// Orders hits for display. The sort is stable.
pub fn sort_hits(hits: &mut [SearchHit]) {
    hits.sort_by(|a, b| match (a.kind, b.kind) {
        (MediaKind::Series, MediaKind::Series) => a
            .season
            .unwrap_or(0)
            .cmp(&b.season.unwrap_or(0))
            .then_with(|| a.episode.unwrap_or(0).cmp(&b.episode.unwrap_or(0))),
        (MediaKind::Movie, MediaKind::Movie) => b.year.unwrap_or(0).cmp(&a.year.unwrap_or(0)),
        (MediaKind::Series, MediaKind::Movie) => Ordering::Less,
        (MediaKind::Movie, MediaKind::Series) => Ordering::Greater,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERIES: &str = r#"{"data": [
        {"name": "Dark.S02E03.German.1080p.WEB.x264-GRP", "series": "Dark", "season": 2, "episode": 3, "link": "https://example.org/s/3"},
        {"name": "Dark.S01E02.German.1080p.WEB.x264-GRP", "series": "Dark", "season": 1, "episode": 2, "link": "https://example.org/s/2"},
        {"name": "Dark.S01E02.German.720p.WEB.x264-OTHER", "series": "Dark", "season": 1, "episode": 2},
        {"name": "Dark.S01E01.German.1080p.WEB.x264-GRP", "series": "Dark", "season": "1", "episode": "1"},
        {"name": "Lost.S01E01.720p", "series": "Lost", "season": 1, "episode": 1}
    ]}"#;

    const MOVIES: &str = r#"{"data": [
        {"name": "Dark Waters", "year": 2019, "quality": ["1080p", "2160p"], "uploads": [
            {"title": "Dark.Waters.2019.1080p.BluRay.x264-GRP", "tid": 100},
            {"title": "Dark.Waters.2019.2160p.UHD.BluRay.x265-GRP", "tid": "101"}
        ]},
        {"name": "The Dark Knight", "year": 2008, "quality": []},
        {"name": "Dark City", "year": 1998, "quality": ["720p"], "uploads": [
            {"title": "Dark.City.1998.720p.BluRay.x264-OLD", "tid": 7}
        ]}
    ]}"#;

    fn catalog() -> Catalog {
        Catalog::from_json(SERIES, MOVIES).unwrap()
    }

    fn search(term: &str) -> Vec<SearchHit> {
        CatalogSearch::new(SearchConfig::default())
            .unwrap()
            .search(&catalog(), term)
            .unwrap()
    }

    #[test]
    fn too_short_query_rejected() {
        let search = CatalogSearch::new(SearchConfig::default()).unwrap();
        assert!(matches!(
            search.query(" d "),
            Err(ReltagError::QueryTooShort { min: 2, len: 1 })
        ));
    }

    #[test]
    fn query_normalizes_season_spacing() {
        let search = CatalogSearch::new(SearchConfig::default()).unwrap();
        let q = search.query("  Dark S2 ").unwrap();
        assert_eq!(q.term, "dark s2");
        assert_eq!(q.normalized, "dark.s2");
        assert_eq!(q.season_filter.as_deref(), Some("02"));

        let q = search.query("lost").unwrap();
        assert_eq!(q.season_filter, None);
    }

    #[test]
    fn series_first_then_movies_newest_first() {
        let hits = search("dark");
        let kinds: Vec<MediaKind> = hits.iter().map(|h| h.kind).collect();
        assert_eq!(
            kinds,
            [
                MediaKind::Series,
                MediaKind::Series,
                MediaKind::Series,
                MediaKind::Movie,
                MediaKind::Movie,
                MediaKind::Movie,
                MediaKind::Movie,
            ]
        );

        let labels: Vec<Option<String>> = hits[..3].iter().map(SearchHit::episode_label).collect();
        assert_eq!(
            labels,
            [
                Some("S01E01".to_string()),
                Some("S01E02".to_string()),
                Some("S02E03".to_string())
            ]
        );

        let years: Vec<Option<u32>> = hits[3..].iter().map(|h| h.year).collect();
        assert_eq!(years, [Some(2019), Some(2019), Some(2008), Some(1998)]);
    }

    #[test]
    fn duplicate_episodes_collapsed() {
        let hits = search("dark");
        let s01e02 = hits
            .iter()
            .filter(|h| h.season == Some(1) && h.episode == Some(2))
            .count();
        assert_eq!(s01e02, 1);
    }

    #[test]
    fn season_filter_restricts_series() {
        let hits = search("dark s02");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].episode_label().as_deref(), Some("S02E03"));
    }

    #[test]
    fn movie_uploads_become_separate_hits() {
        let hits = search("waters");
        assert_eq!(hits.len(), 2);
        assert_eq!(
            hits[0].link.as_deref(),
            Some("http://mlcboard.com/forum/showthread.php?t=100")
        );
        assert_eq!(hits[0].quality.as_deref(), Some("1080p, 2160p"));
        assert_eq!(hits[1].tag_source(), "Dark.Waters.2019.2160p.UHD.BluRay.x265-GRP");
    }

    #[test]
    fn movie_without_uploads_has_no_link() {
        let hits = search("knight");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].link, None);
        assert_eq!(hits[0].quality.as_deref(), Some("N/A"));
        assert_eq!(hits[0].tag_source(), "The Dark Knight");
        assert_eq!(hits[0].display_name(), "The Dark Knight");
    }

    #[test]
    fn custom_thread_template() {
        let config = SearchConfig::new().with_thread_url_template("https://forum.local/t/{tid}");
        let hits = CatalogSearch::new(config)
            .unwrap()
            .search(&catalog(), "city")
            .unwrap();
        assert_eq!(hits[0].link.as_deref(), Some("https://forum.local/t/7"));
    }

    #[test]
    fn no_matches_is_empty() {
        assert!(search("nothing here").is_empty());
    }
}
