pub mod progress;
pub mod queue;
pub mod snapshot;
pub mod units;

pub use progress::{FileProgress, TransferProgress};
pub use queue::{QueuedFile, SfdlQueue};
pub use snapshot::{MediaBadge, Phase, StatusSnapshot};
pub use units::{
    FILE_NAME_KEEP, FILE_NAME_LIMIT, RELEASE_NAME_KEEP, RELEASE_NAME_LIMIT, ellipsize,
    format_hms, human_bytes,
};
