use regex::Regex;

use crate::error::Result;
use crate::types::NonVideoKind;

/// Keyword filter rejecting titles that are clearly not video releases.
///
/// A title carrying a season marker, a resolution or a video codec is always
/// treated as video, so words like "Setup" or "Album" in a movie name do not
/// exclude it. Otherwise families are checked in declaration order and the
/// first hit names the exclusion reason.
#[derive(Debug, Clone)]
pub struct NonVideoFilter {
    video_marker: Regex,
    patterns: Vec<(NonVideoKind, Regex)>,
}

impl NonVideoFilter {
    /// Compiles the keyword families.
    ///
    /// # Errors
    ///
    /// Returns `ReltagError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            video_marker: Regex::new(
                r"(?i)(?:^|[^a-z0-9])s\d{1,2}(?:e\d{1,2})?(?:[^a-z0-9]|$)|\b(?:2160p|1440p|1080p|720p|576p|480p|4k|uhd)\b|\b(?:[xh]\.?26[45]|hevc|avc|av1|xvid|divx)\b",
            )?,
            patterns: vec![
                (
                    NonVideoKind::Software,
                    Regex::new(
                        r"(?i)\b(?:crack(?:ed)?|keygen|serial|activator|portable|setup|installer|x86|x64)\b",
                    )?,
                ),
                (
                    NonVideoKind::ArchiveTool,
                    Regex::new(r"(?i)\b(?:winrar|7-?zip|winzip|peazip)\b")?,
                ),
                (
                    NonVideoKind::Ebook,
                    Regex::new(r"(?i)\b(?:e-?books?|epub|mobi|azw3?|pdf)\b")?,
                ),
                (
                    NonVideoKind::AudioAlbum,
                    Regex::new(r"(?i)\b(?:mp3|discography|album|\d{3}\s?kbps)\b")?,
                ),
                (
                    NonVideoKind::VersionMarker,
                    Regex::new(r"(?i)\bv\d+(?:\.\d+)+\b|\bbuild[\s._-]?\d+\b")?,
                ),
            ],
        })
    }

    /// Returns the family `title` belongs to, or `None` for video-like titles.
    #[must_use]
    pub fn check(&self, title: &str) -> Option<NonVideoKind> {
        if self.video_marker.is_match(title) {
            return None;
        }
        self.patterns
            .iter()
            .find(|(_, re)| re.is_match(title))
            .map(|(kind, _)| *kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> NonVideoFilter {
        NonVideoFilter::new().unwrap()
    }

    #[test]
    fn software_titles_rejected() {
        let f = filter();
        assert_eq!(f.check("Some.App.v2.5.Crack.Keygen"), Some(NonVideoKind::Software));
        assert_eq!(f.check("Tool Portable x64"), Some(NonVideoKind::Software));
    }

    #[test]
    fn archive_tools_rejected() {
        assert_eq!(filter().check("WinRAR 6.02 German"), Some(NonVideoKind::ArchiveTool));
        assert_eq!(filter().check("7-Zip.23.01"), Some(NonVideoKind::ArchiveTool));
    }

    #[test]
    fn ebooks_rejected() {
        assert_eq!(filter().check("Author - Book Title (EPUB)"), Some(NonVideoKind::Ebook));
        assert_eq!(filter().check("Magazine.2024.PDF"), Some(NonVideoKind::Ebook));
    }

    #[test]
    fn audio_albums_rejected() {
        assert_eq!(
            filter().check("Artist - Greatest Hits (2020) MP3 320kbps"),
            Some(NonVideoKind::AudioAlbum)
        );
        assert_eq!(filter().check("Band.Discography.FLAC"), Some(NonVideoKind::AudioAlbum));
    }

    #[test]
    fn version_markers_rejected() {
        assert_eq!(filter().check("Editor.v10.4.1"), Some(NonVideoKind::VersionMarker));
        assert_eq!(filter().check("Game Build 1234"), Some(NonVideoKind::VersionMarker));
    }

    #[test]
    fn video_releases_pass() {
        let f = filter();
        for title in [
            "Show.Name.S01E02.2160p.BluRay.x265.Atmos-GROUP",
            "Movie.Title.2019.1080p.WEB-DL.DD5.1.H264-GROUP",
            "Show.S03E04.v2.1080p.WEB.h264",
            "Movie.2021.German.DL.FLAC.1080p",
        ] {
            assert_eq!(f.check(title), None, "{title} was rejected");
        }
    }

    #[test]
    fn video_markers_override_ambiguous_words() {
        let f = filter();
        for title in [
            "The.Portable.Door.2023.German.DL.1080p.WEB.x264-GRP",
            "Serial.Experiments.Lain.S01E01.German.1080p.BluRay.x264-GRP",
            "The.Setup.2011.German.720p.BluRay.x264-GRP",
            "The.White.Album.2018.1080p.WEB.h264-GRP",
            "Ebook.Story.S02.German.HDTV.XviD",
        ] {
            assert_eq!(f.check(title), None, "{title} was rejected");
        }
    }

    #[test]
    fn ambiguous_words_without_video_markers_still_rejected() {
        let f = filter();
        assert_eq!(f.check("Office Setup Installer"), Some(NonVideoKind::Software));
        assert_eq!(f.check("Artist - Album (2020)"), Some(NonVideoKind::AudioAlbum));
    }
}
