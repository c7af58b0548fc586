pub mod classifier;
pub mod exclusion;
pub mod lookup;

pub use classifier::SearchResultClassifier;
pub use exclusion::NonVideoFilter;
pub use lookup::{LookupCleaner, LookupQuery, lookup_query};
