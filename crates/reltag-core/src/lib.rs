//! # Reltag Core
//!
//! Release-name analysis for media download dashboards: keyword tag
//! extraction, a 1–10 quality score, search-result classification, catalog
//! search and loader status decoding.
//!
//! ## Quick Start
//!
//! ```rust
//! use reltag_core::{TagCategory, extract_tags, score};
//!
//! let title = "Movie.Title.2019.German.DL.2160p.UHD.BluRay.HDR.x265-GRP";
//! let tags = extract_tags(title);
//!
//! assert_eq!(tags[0].category, TagCategory::Resolution);
//! assert_eq!(tags[0].text, "4K");
//! assert_eq!(score(title).value(), 9.3);
//! ```
pub mod analyzer;
pub mod catalog;
pub mod classify;
pub mod error;
pub mod rules;
pub mod scoring;
pub mod status;
pub mod tagging;
pub mod types;

// Re-export primary API
pub use analyzer::{
    AnalyzerConfig, FileReport, QueueReport, QueuedReport, ReleaseAnalyzer, ReleaseCard,
    SearchCard, StatusReport, TransferReport,
};
pub use catalog::{Catalog, CatalogSearch, SearchConfig, SearchHit};
pub use classify::{LookupCleaner, LookupQuery, SearchResultClassifier, lookup_query};
pub use error::{ReltagError, Result};
pub use scoring::{QualityScorer, ScoringProfile, score};
pub use status::{MediaBadge, Phase, QueuedFile, SfdlQueue, StatusSnapshot};
pub use tagging::{ReleaseTagExtractor, extract_tags};
pub use types::{
    Classification, ClassifiedResult, ExclusionReason, MediaKind, NonVideoKind, QualityScore, Tag,
    TagCategory,
};
