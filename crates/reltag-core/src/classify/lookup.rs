//! # Lookup Query Cleaning
//!
//! Reduces a release name to the bare title a metadata service can search
//! for, remembering the year and whether the release looked like a series.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A cleaned, search-ready title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupQuery {
    /// Title with release noise removed.
    pub name: String,
    /// Release year, if the name carried one.
    pub year: Option<u16>,
    /// `true` if the name had a season/episode marker.
    pub is_series: bool,
}

/// Strips scene-release noise from names before a metadata lookup.
#[derive(Debug, Clone)]
pub struct LookupCleaner {
    re_year: Regex,
    re_season: Regex,
    re_language: Regex,
    re_quality: Regex,
    re_group: Regex,
    re_scene: Regex,
}

impl LookupCleaner {
    /// Constructs a cleaner with pre-compiled regex patterns.
    ///
    /// # Errors
    ///
    /// Returns `ReltagError::RegexError` if any pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_year: Regex::new(r"\b((?:19|20)\d{2})\b")?,
            re_season: Regex::new(r"(?i)\bS\d{1,2}(?:E\d{1,2})?\b")?,
            re_language: Regex::new(
                r"(?i)\b(?:german|english|deutsch|multi|dl|ml)\b",
            )?,
            re_quality: Regex::new(
                r"(?i)\b(?:1080p|720p|2160p|4K|UHD|BluRay|BDRip|WEB-DL|WEBRip|WEB|HDTV|DVDRip|x264|x265|h264|h265|HEVC|AVC|AAC|DTS|AC3|Atmos|ATVP|NF|AMZN|DSNP|HMAX|HULU|PCOK|PMTP|STAN|iP|DSCP|CR|DDP?\d\s\d|DD|TrueHD|DTS-HD|FLAC|Opus|HDR|HDR10|HDR10\+|DV|SDR|REMUX|HYBRID|Retail|SUBBED|DUBBED|DiRFiX|COMPLETE|READ\.NFO|FS|WS)\b",
            )?,
            re_group: Regex::new(r"-[A-Za-z0-9]+\s*$")?,
            re_scene: Regex::new(
                r"(?i)\b(?:REPACK|PROPER|iNTERNAL|LIMITED|UNRATED|DC|EXTENDED|REMASTERED)\b",
            )?,
        })
    }

    /// Cleans `name` into a lookup query.
    ///
    /// # Examples
    ///
    /// ```
    /// use reltag_core::classify::LookupCleaner;
    ///
    /// let cleaner = LookupCleaner::new().unwrap();
    /// let query = cleaner.clean("Movie.Title.2019.1080p.BluRay.x264-GRP");
    /// assert_eq!(query.name, "Movie Title");
    /// assert_eq!(query.year, Some(2019));
    /// assert!(!query.is_series);
    /// ```
    #[must_use]
    pub fn clean(&self, name: &str) -> LookupQuery {
        let mut work = name.replace(['.', '_'], " ");

        let year = self
            .re_year
            .captures(&work)
            .and_then(|c| c[1].parse().ok());
        let is_series = self.re_season.is_match(&work);

        for pattern in [&self.re_year, &self.re_season, &self.re_quality, &self.re_language] {
            work = pattern.replace_all(&work, "").into_owned();
        }
        work = self.re_group.replace(&work, "").into_owned();
        work = self.re_scene.replace_all(&work, "").into_owned();

        LookupQuery {
            name: work.split_whitespace().collect::<Vec<_>>().join(" "),
            year,
            is_series,
        }
    }
}

static DEFAULT_CLEANER: LazyLock<Option<LookupCleaner>> =
    LazyLock::new(|| LookupCleaner::new().ok());

/// Cleans a single name with a shared [`LookupCleaner`].
///
/// # Errors
///
/// Returns `ReltagError::RegexError` if the cleaner cannot be built.
pub fn lookup_query(name: &str) -> Result<LookupQuery> {
    match DEFAULT_CLEANER.as_ref() {
        Some(cleaner) => Ok(cleaner.clean(name)),
        None => Ok(LookupCleaner::new()?.clean(name)),
    }
}
