use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound of a computed score.
pub const MIN_SCORE: f64 = 1.0;

/// Upper bound of a computed score.
pub const MAX_SCORE: f64 = 10.0;

/// Normalized release quality in `[1.0, 10.0]`, one decimal place.
///
/// `QualityScore::NONE` (zero) is the sentinel for "no score computed" and
/// is what empty input produces.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualityScore(f64);

impl QualityScore {
    /// Sentinel for inputs that could not be scored.
    pub const NONE: Self = Self(0.0);

    /// Clamps a raw heuristic sum to `[1, 10]` and rounds half-up to tenths.
    #[must_use]
    pub fn from_raw(raw: f64) -> Self {
        if !raw.is_finite() {
            return Self(MIN_SCORE);
        }
        let clamped = raw.clamp(MIN_SCORE, MAX_SCORE);
        Self((clamped * 10.0 + 0.5).floor() / 10.0)
    }

    /// The numeric score.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns `true` for the "no score computed" sentinel.
    #[must_use]
    pub fn is_none(self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for QualityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up_on_tenths() {
        assert_eq!(QualityScore::from_raw(9.25).value(), 9.3);
        assert_eq!(QualityScore::from_raw(7.75).value(), 7.8);
        assert_eq!(QualityScore::from_raw(6.5).value(), 6.5);
        assert_eq!(QualityScore::from_raw(5.0).value(), 5.0);
    }

    #[test]
    fn clamps_to_range() {
        assert_eq!(QualityScore::from_raw(11.5).value(), MAX_SCORE);
        assert_eq!(QualityScore::from_raw(-1.0).value(), MIN_SCORE);
        assert_eq!(QualityScore::from_raw(f64::NAN).value(), MIN_SCORE);
    }

    #[test]
    fn sentinel_is_zero() {
        assert!(QualityScore::NONE.is_none());
        assert!(QualityScore::default().is_none());
        assert!(!QualityScore::from_raw(2.0).is_none());
    }

    #[test]
    fn display_has_one_decimal() {
        assert_eq!(QualityScore::from_raw(2.0).to_string(), "2.0");
        assert_eq!(QualityScore::NONE.to_string(), "0.0");
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&QualityScore::from_raw(9.25)).unwrap();
        assert_eq!(json, "9.3");
    }
}
