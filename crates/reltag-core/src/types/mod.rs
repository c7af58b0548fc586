pub mod classified;
pub mod score;
pub mod tag;

pub use classified::{Classification, ClassifiedResult, ExclusionReason, MediaKind, NonVideoKind};
pub use score::{MAX_SCORE, MIN_SCORE, QualityScore};
pub use tag::{Tag, TagCategory};
