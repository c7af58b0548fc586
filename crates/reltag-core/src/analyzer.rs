//! # Release Analyzer
//!
//! Bundles tag extraction, quality scoring and classification behind one
//! entry point, and turns catalog hits and loader snapshots into display
//! cards that carry tags and scores.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, CatalogSearch, SearchConfig, SearchHit};
use crate::classify::{LookupCleaner, LookupQuery, SearchResultClassifier};
use crate::error::Result;
use crate::scoring::{QualityScorer, ScoringProfile};
use crate::status::{
    FILE_NAME_KEEP, FILE_NAME_LIMIT, MediaBadge, Phase, RELEASE_NAME_KEEP, RELEASE_NAME_LIMIT,
    SfdlQueue, StatusSnapshot, ellipsize, human_bytes,
};
use crate::tagging::ReleaseTagExtractor;
use crate::types::{Classification, ClassifiedResult, QualityScore, Tag};

const SIZE_PRECISION: usize = 2;

/// Configuration for the analyzer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Score adjustments.
    pub scoring: ScoringProfile,
    /// Catalog search settings.
    pub search: SearchConfig,
}

impl AnalyzerConfig {
    /// Create a new analyzer configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scoring profile.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringProfile) -> Self {
        self.scoring = scoring;
        self
    }

    /// Set the catalog search settings.
    #[must_use]
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }
}

/// Everything known about one release title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseCard {
    pub title: String,
    pub tags: Vec<Tag>,
    pub score: QualityScore,
    pub classification: Classification,
}

/// A catalog hit ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCard {
    #[serde(flatten)]
    pub hit: SearchHit,
    pub display_name: String,
    /// `S01E02` for series hits with season and episode.
    pub episode_label: Option<String>,
    pub tags: Vec<Tag>,
    pub score: QualityScore,
    /// Classification of the release name, linked to the hit's thread.
    pub classified: ClassifiedResult,
}

/// Human-readable aggregate transfer counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferReport {
    pub done: String,
    pub total: String,
    pub percent: f64,
    pub speed_mb_s: f64,
    pub elapsed: String,
    pub eta: String,
}

/// One transferring file with the tags of its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub name: String,
    pub downloaded: String,
    pub size: String,
    pub percent: u32,
    pub tags: Vec<Tag>,
    pub score: QualityScore,
}

/// Display view of a loader snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub version: Option<String>,
    pub status: Option<String>,
    pub datetime: Option<String>,
    pub phase: Phase,
    pub media: MediaBadge,
    /// Release name, shortened for display.
    pub release: Option<String>,
    pub tags: Vec<Tag>,
    pub score: QualityScore,
    pub parallel_files: Option<u32>,
    pub total_files: Option<u32>,
    /// Present only while loading.
    pub transfer: Option<TransferReport>,
    /// Empty unless loading.
    pub files: Vec<FileReport>,
}

/// One queued SFDL file ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedReport {
    /// Release name without the `.sfdl` extension.
    pub name: String,
    pub size: String,
    /// Modification time in Unix seconds.
    pub modified: f64,
    pub media: MediaBadge,
    pub tags: Vec<Tag>,
    pub score: QualityScore,
}

/// Display view of the SFDL queue, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueReport {
    pub count: usize,
    pub files: Vec<QueuedReport>,
}

/// Tags, scores and classifies release titles.
#[derive(Debug, Clone)]
pub struct ReleaseAnalyzer {
    extractor: ReleaseTagExtractor,
    scorer: QualityScorer,
    classifier: SearchResultClassifier,
    search: CatalogSearch,
    cleaner: LookupCleaner,
}

impl ReleaseAnalyzer {
    /// Create an analyzer with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ReltagError::InvalidProfile` for a profile with non-finite
    /// adjustments, or `ReltagError::RegexError` if a pattern fails to compile.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        Ok(Self {
            extractor: ReleaseTagExtractor::new(),
            scorer: QualityScorer::with_profile(&config.scoring)?,
            classifier: SearchResultClassifier::new()?,
            search: CatalogSearch::new(config.search)?,
            cleaner: LookupCleaner::new()?,
        })
    }

    /// Tags, scores and classifies one title.
    ///
    /// # Examples
    ///
    /// ```
    /// use reltag_core::{AnalyzerConfig, ReleaseAnalyzer};
    ///
    /// let analyzer = ReleaseAnalyzer::new(AnalyzerConfig::default()).unwrap();
    /// let card = analyzer.analyze("Show.Name.S01E02.German.DL.1080p.WEB.x264-GRP");
    ///
    /// assert_eq!(card.score.value(), 7.5);
    /// assert!(card.tags.iter().any(|t| t.text == "1080p"));
    /// assert!(!card.classification.is_excluded());
    /// ```
    #[must_use]
    pub fn analyze(&self, title: &str) -> ReleaseCard {
        ReleaseCard {
            title: title.to_string(),
            tags: self.tags(title),
            score: self.score(title),
            classification: self.classify(title),
        }
    }

    #[must_use]
    pub fn tags(&self, title: &str) -> Vec<Tag> {
        self.extractor.extract(title)
    }

    #[must_use]
    pub fn score(&self, title: &str) -> QualityScore {
        self.scorer.score(title)
    }

    #[must_use]
    pub fn classify(&self, title: &str) -> Classification {
        self.classifier.classify(title)
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> LookupQuery {
        self.cleaner.clean(name)
    }

    /// Searches the catalog and decorates every hit with tags and a score.
    /// Hits whose release name is not a video release are dropped.
    ///
    /// # Errors
    ///
    /// Returns `ReltagError::QueryTooShort` for too-short terms.
    pub fn search(&self, catalog: &Catalog, term: &str) -> Result<Vec<SearchCard>> {
        let hits = self.search.search(catalog, term)?;
        Ok(hits
            .into_iter()
            .filter_map(|hit| self.search_card(hit))
            .collect())
    }

    /// Classifies, tags and scores one hit. `None` if the classifier
    /// excludes its release name.
    #[must_use]
    pub fn search_card(&self, hit: SearchHit) -> Option<SearchCard> {
        let source = hit.tag_source();
        let mut classified = match self.classify(source) {
            Classification::Classified(result) => result,
            Classification::Excluded { reason } => {
                debug!(title = source, %reason, "dropping excluded catalog hit");
                return None;
            }
        };
        if let Some(link) = &hit.link {
            classified = classified.with_link(link.clone());
        }

        Some(SearchCard {
            display_name: hit.display_name().to_string(),
            episode_label: hit.episode_label(),
            tags: self.tags(source),
            score: self.score(source),
            classified,
            hit,
        })
    }

    /// Builds the display view of a loader snapshot.
    #[must_use]
    pub fn status_report(&self, snapshot: &StatusSnapshot) -> StatusReport {
        let phase = snapshot.phase();
        let release = snapshot.sfdl.as_deref().unwrap_or_default();

        let (transfer, files) = if phase == Phase::Loading {
            let transfer = snapshot.transfer().map(|t| TransferReport {
                done: human_bytes(t.done_bytes, SIZE_PRECISION),
                total: human_bytes(t.total_bytes, SIZE_PRECISION),
                percent: t.percent,
                speed_mb_s: t.speed_mb_s,
                eta: t.eta(),
                elapsed: t.elapsed,
            });
            let files = snapshot
                .files()
                .into_iter()
                .map(|f| FileReport {
                    name: ellipsize(&f.name, FILE_NAME_LIMIT, FILE_NAME_KEEP),
                    downloaded: human_bytes(f.downloaded, SIZE_PRECISION),
                    size: human_bytes(f.size, SIZE_PRECISION),
                    percent: f.percent(),
                    tags: self.tags(&f.name),
                    score: self.score(&f.name),
                })
                .collect();
            (transfer, files)
        } else {
            (None, Vec::new())
        };

        StatusReport {
            version: snapshot.version.clone(),
            status: snapshot.status.clone(),
            datetime: snapshot.datetime.clone(),
            media: snapshot.media(),
            release: snapshot
                .sfdl
                .as_deref()
                .map(|name| ellipsize(name, RELEASE_NAME_LIMIT, RELEASE_NAME_KEEP)),
            tags: self.tags(release),
            score: self.score(release),
            parallel_files: snapshot.loading_mt_files,
            total_files: snapshot.loading_total_files,
            phase,
            transfer,
            files,
        }
    }

    /// Builds the display view of the SFDL queue.
    #[must_use]
    pub fn queue_report(&self, queue: &SfdlQueue) -> QueueReport {
        let files = queue
            .files
            .iter()
            .map(|file| {
                let name = file.release_name();
                QueuedReport {
                    name: name.to_string(),
                    size: human_bytes(file.size, SIZE_PRECISION),
                    modified: file.modified,
                    media: file.media(),
                    tags: self.tags(name),
                    score: self.score(name),
                }
            })
            .collect();
        QueueReport {
            count: queue.len(),
            files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MediaKind, TagCategory};

    fn analyzer() -> ReleaseAnalyzer {
        ReleaseAnalyzer::new(AnalyzerConfig::default()).unwrap()
    }

    #[test]
    fn analyze_combines_all_three() {
        let card = analyzer().analyze("Movie.Title.2019.German.DL.2160p.UHD.BluRay.HDR.x265-GRP");
        assert_eq!(card.title, "Movie.Title.2019.German.DL.2160p.UHD.BluRay.HDR.x265-GRP");
        assert!(card.tags.contains(&Tag::new(TagCategory::Resolution, "4K")));
        assert!(card.tags.contains(&Tag::new(TagCategory::Hdr, "HDR")));
        assert!(card.score.value() > 8.0);

        let result = card.classification.result().unwrap();
        assert_eq!(result.kind, MediaKind::Movie);
        assert_eq!(result.year.as_deref(), Some("2019"));
    }

    #[test]
    fn empty_title_card() {
        let card = analyzer().analyze("");
        assert!(card.tags.is_empty());
        assert!(card.score.is_none());
        assert!(card.classification.is_excluded());
    }

    #[test]
    fn custom_web_rip_bonus_flows_through() {
        let config = AnalyzerConfig::new()
            .with_scoring(ScoringProfile::new().with_web_rip_bonus(1.0));
        let analyzer = ReleaseAnalyzer::new(config).unwrap();
        let default = self::analyzer();
        let title = "Show.S01E01.720p.WEBRip.x264-GRP";
        assert!(analyzer.score(title).value() > default.score(title).value());
    }

    #[test]
    fn invalid_profile_rejected() {
        let config =
            AnalyzerConfig::new().with_scoring(ScoringProfile::new().with_web_rip_bonus(f64::NAN));
        assert!(ReleaseAnalyzer::new(config).is_err());
    }

    #[test]
    fn search_cards_tag_upload_titles() {
        let catalog = Catalog::from_json(
            r#"[{"name": "Dark.S01E02.German.1080p.WEB.x264-GRP", "series": "Dark", "season": 1, "episode": 2}]"#,
            r#"[{"name": "Dark Waters", "year": 2019, "uploads": [{"title": "Dark.Waters.2019.German.DL.2160p.UHD.BluRay.x265-GRP", "tid": "42"}]}]"#,
        )
        .unwrap();

        let cards = analyzer().search(&catalog, "dark").unwrap();
        assert_eq!(cards.len(), 2);

        assert_eq!(cards[0].display_name, "Dark");
        assert_eq!(cards[0].episode_label.as_deref(), Some("S01E02"));
        assert!(cards[0].tags.iter().any(|t| t.text == "1080p"));

        assert_eq!(cards[1].display_name, "Dark Waters");
        assert!(cards[1].tags.iter().any(|t| t.text == "4K"));
        assert!(cards[1].hit.link.as_deref().unwrap().ends_with("t=42"));
        assert_eq!(cards[1].classified.kind, MediaKind::Movie);
        assert_eq!(cards[1].classified.link, cards[1].hit.link);
        assert_eq!(cards[0].classified.season.as_deref(), Some("01"));
    }

    #[test]
    fn search_drops_non_video_uploads() {
        let catalog = Catalog::from_json(
            "[]",
            r#"[{"name": "Some App", "uploads": [
                {"title": "Some.App.v2.5.Crack.Keygen", "tid": "9"},
                {"title": "Some.App.2020.German.1080p.WEB.x264-GRP", "tid": "10"}
            ]}]"#,
        )
        .unwrap();

        let cards = analyzer().search(&catalog, "some app").unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(
            cards[0].hit.upload_title.as_deref(),
            Some("Some.App.2020.German.1080p.WEB.x264-GRP")
        );
        assert!(cards[0].classified.link.as_deref().unwrap().ends_with("t=10"));
    }

    #[test]
    fn loading_status_report() {
        let snapshot = StatusSnapshot::from_json(
            r#"{"data": [{
                "version": "3.1",
                "sfdl": "Movie.Title.2019.German.DL.1080p.BluRay.x264-GRP",
                "action": "loading",
                "media_type": "movie",
                "media_year": 2019,
                "loading_mt_files": 2,
                "loading_total_files": 4,
                "loading": "x|1024|2048|50|1|00:00:10",
                "loading_file_array": "Some.Very.Long.Movie.Title.2019.German.DL.1080p.BluRay.x264-GROUP.part01.rar|2048|1024"
            }]}"#,
        )
        .unwrap();

        let report = analyzer().status_report(&snapshot);
        assert_eq!(report.phase, Phase::Loading);
        assert_eq!(report.media, MediaBadge::Movie { year: Some(2019) });
        assert!(report.tags.iter().any(|t| t.text == "BluRay"));

        let transfer = report.transfer.unwrap();
        assert_eq!(transfer.done, "1.00 MB");
        assert_eq!(transfer.total, "2.00 MB");
        assert_eq!(transfer.eta, "00:00:01");

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].percent, 50);
        assert_eq!(report.files[0].size, "2.00 KB");
        assert!(report.files[0].name.ends_with("..."));
        assert!(report.files[0].tags.iter().any(|t| t.text == "1080p"));
    }

    #[test]
    fn extracting_status_has_no_transfer() {
        let snapshot = StatusSnapshot::from_json(
            r#"{"data": [{"sfdl": "Show.S01.720p", "action": "Entpacke Archive 1/3", "loading": "x|1|2|50|1|"}]}"#,
        )
        .unwrap();
        let report = analyzer().status_report(&snapshot);
        assert!(matches!(report.phase, Phase::Extracting(_)));
        assert!(report.transfer.is_none());
        assert!(report.files.is_empty());
        assert_eq!(report.release.as_deref(), Some("Show.S01.720p"));
    }

    #[test]
    fn queue_report_tags_each_file() {
        let queue = SfdlQueue::from_json(
            r#"{"success": true, "files": [
                {"name": "Show.S02.German.1080p.WEB.x264-GRP.sfdl", "size": 3072, "modified": 1710000000, "media_type": "tv", "seasons": 2},
                {"name": "Movie.Title.2019.German.DL.2160p.UHD.BluRay.x265-GRP.sfdl", "size": 1536, "modified": 1720000000, "media_type": "movie", "year": 2019}
            ]}"#,
        )
        .unwrap();

        let report = analyzer().queue_report(&queue);
        assert_eq!(report.count, 2);
        assert_eq!(report.files[0].name, "Movie.Title.2019.German.DL.2160p.UHD.BluRay.x265-GRP");
        assert_eq!(report.files[0].size, "1.50 KB");
        assert_eq!(report.files[0].media, MediaBadge::Movie { year: Some(2019) });
        assert!(report.files[0].tags.iter().any(|t| t.text == "4K"));
        assert!(report.files[0].score.value() > report.files[1].score.value());

        assert_eq!(report.files[1].size, "3.00 KB");
        assert!(report.files[1].tags.iter().any(|t| t.text == "1080p"));
        assert_eq!(
            report.files[1].media,
            MediaBadge::Tv {
                seasons: Some(2),
                episodes: None
            }
        );
    }

    #[test]
    fn empty_queue_report() {
        let report = analyzer().queue_report(&SfdlQueue::default());
        assert_eq!(report.count, 0);
        assert!(report.files.is_empty());
    }
}
