pub mod records;
pub mod search;

pub use records::{Catalog, MovieRecord, SeriesRecord, Upload, decode_records};
pub use search::{
    CatalogSearch, DEFAULT_MIN_QUERY_LEN, DEFAULT_THREAD_URL, SearchConfig, SearchHit,
    SearchQuery, sort_hits,
};
