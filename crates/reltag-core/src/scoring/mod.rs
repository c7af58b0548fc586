pub mod profile;
pub mod scorer;

pub use profile::{
    BASE_SCORE, DEFAULT_WEB_RIP_BONUS, EXTENDED_WEB_RIP_BONUS, ScoreRule, ScoringProfile,
};
pub use scorer::{QualityScorer, score};
