pub mod extractor;
pub mod table;

pub use extractor::{ReleaseTagExtractor, extract_tags};
pub use table::{CategoryTable, TAG_TABLE, TagRule};
