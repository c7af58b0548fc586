use std::sync::LazyLock;

use tracing::trace;

use crate::error::Result;
use crate::rules::{first_match, normalize};
use crate::scoring::profile::{ScoreRule, ScoringProfile};
use crate::types::QualityScore;

/// Computes a 1–10 quality score for a release title.
///
/// Starts from the profile's base score and adds the first matching delta
/// of each block (resolution, source, HDR, codec, audio, line-dub). The sum
/// is clamped to `[1, 10]` and rounded half-up to one decimal.
#[derive(Debug, Clone)]
pub struct QualityScorer {
    base: f64,
    blocks: Vec<Vec<ScoreRule>>,
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::from_valid_profile(&ScoringProfile::default())
    }
}

impl QualityScorer {
    /// Creates a scorer with the default profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scorer from a custom profile.
    ///
    /// # Errors
    ///
    /// Returns `ReltagError::InvalidProfile` if any adjustment is not finite.
    pub fn with_profile(profile: &ScoringProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self::from_valid_profile(profile))
    }

    fn from_valid_profile(profile: &ScoringProfile) -> Self {
        Self {
            base: profile.base,
            blocks: profile.blocks(),
        }
    }

    /// Scores `input`. Empty input yields [`QualityScore::NONE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use reltag_core::scoring::QualityScorer;
    ///
    /// let scorer = QualityScorer::new();
    /// let score = scorer.score("Show.Name.S01E02.2160p.BluRay.x265.Atmos-GROUP");
    /// assert_eq!(score.value(), 9.3);
    /// assert!(scorer.score("").is_none());
    /// ```
    #[must_use]
    pub fn score(&self, input: &str) -> QualityScore {
        if input.is_empty() {
            return QualityScore::NONE;
        }

        let raw = self.raw_score(input);
        let score = QualityScore::from_raw(raw);
        trace!(input, raw, score = score.value(), "scored release");
        score
    }

    /// The unclamped, unrounded heuristic sum.
    #[must_use]
    pub fn raw_score(&self, input: &str) -> f64 {
        let upper = normalize(input);
        self.blocks
            .iter()
            .filter_map(|block| first_match(block, &upper))
            .fold(self.base, |acc, rule| acc + rule.outcome)
    }
}

static DEFAULT_SCORER: LazyLock<QualityScorer> = LazyLock::new(QualityScorer::new);

/// Scores `input` with the default profile.
#[must_use]
pub fn score(input: &str) -> QualityScore {
    DEFAULT_SCORER.score(input)
}
