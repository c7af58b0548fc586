//! # Reltag
//!
//! Tags, scores and classifies scene release names.
//!
//! ```rust
//! let analyzer = reltag::ReleaseAnalyzer::new(reltag::AnalyzerConfig::default()).unwrap();
//! let card = analyzer.analyze("Show.S01E02.720p.HDTV.x264-GRP");
//!
//! assert_eq!(card.classification.result().unwrap().display_name, "Show");
//! ```
pub use reltag_core::*;
