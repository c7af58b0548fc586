use serde::{Deserialize, Serialize};

use crate::error::{ReltagError, Result};
use crate::rules::KeywordRule;

/// Score every release starts from before adjustments.
pub const BASE_SCORE: f64 = 5.0;

/// Bonus for WEBRip / `.WEB.` sources.
///
/// Two values circulate for this rule. 0.5 is the default, see
/// [`EXTENDED_WEB_RIP_BONUS`] for the other.
pub const DEFAULT_WEB_RIP_BONUS: f64 = 0.5;

/// The alternative WEBRip bonus used by the extended scoring variant.
pub const EXTENDED_WEB_RIP_BONUS: f64 = 0.75;

/// A score rule: keys to look for and the delta to add.
pub type ScoreRule = KeywordRule<f64>;

/// Additive adjustments of the quality heuristic.
///
/// Each block of the heuristic contributes at most one of its deltas; the
/// blocks themselves add up independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringProfile {
    pub base: f64,

    pub uhd_2160: f64,
    pub qhd_1440: f64,
    pub fhd_1080: f64,
    pub hd_720: f64,
    pub sd: f64,

    pub remux: f64,
    pub bluray: f64,
    pub web_dl: f64,
    pub web_rip: f64,
    pub hdtv: f64,
    pub dvd_rip: f64,
    pub cam: f64,
    pub mic_dubbed: f64,

    pub dolby_vision: f64,
    pub hdr10_plus: f64,
    pub hdr: f64,

    pub av1: f64,
    pub hevc: f64,
    pub xvid: f64,

    /// Atmos or DTS:X.
    pub object_audio: f64,
    /// TrueHD or DTS-HD.
    pub lossless_audio: f64,
    /// Line-dubbed audio (`.LD.`), applied on its own.
    pub line_dubbed: f64,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self {
            base: BASE_SCORE,

            uhd_2160: 2.0,
            qhd_1440: 1.75,
            fhd_1080: 2.0,
            hd_720: 0.5,
            sd: -1.0,

            remux: 2.0,
            bluray: 1.5,
            web_dl: 1.5,
            web_rip: DEFAULT_WEB_RIP_BONUS,
            hdtv: 0.0,
            dvd_rip: -1.0,
            cam: -3.0,
            mic_dubbed: -2.0,

            dolby_vision: 1.5,
            hdr10_plus: 0.75,
            hdr: 0.5,

            av1: 0.5,
            hevc: 0.25,
            xvid: -0.5,

            object_audio: 0.5,
            lossless_audio: 0.25,
            line_dubbed: -1.5,
        }
    }
}

impl ScoringProfile {
    /// Creates the default profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The profile with the extended WEBRip bonus.
    #[must_use]
    pub fn extended() -> Self {
        Self::default().with_web_rip_bonus(EXTENDED_WEB_RIP_BONUS)
    }

    /// Sets the WEBRip / `.WEB.` bonus.
    #[must_use]
    pub fn with_web_rip_bonus(mut self, bonus: f64) -> Self {
        self.web_rip = bonus;
        self
    }

    /// Loads a profile from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ReltagError::Json` for malformed JSON and
    /// `ReltagError::InvalidProfile` if any adjustment is not finite.
    pub fn from_json(raw: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(raw)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Checks that every adjustment is a finite number.
    ///
    /// # Errors
    ///
    /// Returns `ReltagError::InvalidProfile` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("base", self.base),
            ("uhd_2160", self.uhd_2160),
            ("qhd_1440", self.qhd_1440),
            ("fhd_1080", self.fhd_1080),
            ("hd_720", self.hd_720),
            ("sd", self.sd),
            ("remux", self.remux),
            ("bluray", self.bluray),
            ("web_dl", self.web_dl),
            ("web_rip", self.web_rip),
            ("hdtv", self.hdtv),
            ("dvd_rip", self.dvd_rip),
            ("cam", self.cam),
            ("mic_dubbed", self.mic_dubbed),
            ("dolby_vision", self.dolby_vision),
            ("hdr10_plus", self.hdr10_plus),
            ("hdr", self.hdr),
            ("av1", self.av1),
            ("hevc", self.hevc),
            ("xvid", self.xvid),
            ("object_audio", self.object_audio),
            ("lossless_audio", self.lossless_audio),
            ("line_dubbed", self.line_dubbed),
        ];

        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(ReltagError::InvalidProfile(format!(
                "{name} must be finite, got {value}"
            ))),
            None => Ok(()),
        }
    }

    /// Expands the profile into ordered score blocks.
    ///
    /// Block order does not affect the result (blocks are additive), but
    /// rule order inside a block is the priority order.
    #[must_use]
    pub fn blocks(&self) -> Vec<Vec<ScoreRule>> {
        vec![
            vec![
                ScoreRule::new(&["2160P"], self.uhd_2160),
                ScoreRule::new(&["1440P"], self.qhd_1440),
                ScoreRule::new(&["1080P"], self.fhd_1080),
                ScoreRule::new(&["720P"], self.hd_720),
                ScoreRule::new(&["576P", "480P"], self.sd),
            ],
            vec![
                ScoreRule::new(&["REMUX"], self.remux),
                ScoreRule::new(&["BLURAY", "BDRIP"], self.bluray),
                ScoreRule::new(&["WEB-DL", "WEBDL"], self.web_dl),
                ScoreRule::new(&["WEBRIP", ".WEB."], self.web_rip),
                ScoreRule::new(&["HDTV"], self.hdtv),
                ScoreRule::new(&["DVDRIP"], self.dvd_rip),
                ScoreRule::new(&[".CAM."], self.cam),
                ScoreRule::new(&[".MD."], self.mic_dubbed),
            ],
            vec![
                ScoreRule::new(&["DOLBYVISION", "DV."], self.dolby_vision),
                ScoreRule::new(&["HDR10+"], self.hdr10_plus),
                ScoreRule::new(&["HDR"], self.hdr),
            ],
            vec![
                ScoreRule::new(&["AV1"], self.av1),
                ScoreRule::new(&["H265", "X265", "HEVC"], self.hevc),
                ScoreRule::new(&["XVID"], self.xvid),
            ],
            vec![
                ScoreRule::new(&["ATMOS", "DTS-X"], self.object_audio),
                ScoreRule::new(&["TRUEHD", "DTS-HD"], self.lossless_audio),
            ],
            vec![ScoreRule::new(&[".LD."], self.line_dubbed)],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_valid() {
        assert!(ScoringProfile::default().validate().is_ok());
        assert_eq!(ScoringProfile::default().web_rip, DEFAULT_WEB_RIP_BONUS);
    }

    #[test]
    fn extended_profile_only_changes_web_rip() {
        let extended = ScoringProfile::extended();
        assert_eq!(extended.web_rip, EXTENDED_WEB_RIP_BONUS);
        assert_eq!(
            extended.with_web_rip_bonus(DEFAULT_WEB_RIP_BONUS),
            ScoringProfile::default()
        );
    }

    #[test]
    fn non_finite_adjustment_rejected() {
        let profile = ScoringProfile::default().with_web_rip_bonus(f64::INFINITY);
        let err = profile.validate().unwrap_err();
        assert!(matches!(err, ReltagError::InvalidProfile(ref msg) if msg.contains("web_rip")));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let profile = ScoringProfile::from_json(r#"{"web_rip": 0.75, "cam": -4.0}"#).unwrap();
        assert_eq!(profile.web_rip, 0.75);
        assert_eq!(profile.cam, -4.0);
        assert_eq!(profile.remux, 2.0);
        assert_eq!(profile.base, BASE_SCORE);
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            ScoringProfile::from_json("{\"web_rip\": \"high\"}"),
            Err(ReltagError::Json(_))
        ));
    }

    #[test]
    fn blocks_preserve_priority_order() {
        let blocks = ScoringProfile::default().blocks();
        assert_eq!(blocks.len(), 6);
        assert_eq!(blocks[0][0].keys, &["2160P"]);
        assert_eq!(blocks[1][0].keys, &["REMUX"]);
        assert_eq!(blocks[5][0].keys, &[".LD."]);
    }
}
