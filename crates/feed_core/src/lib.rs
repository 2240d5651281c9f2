//! Feed core: pure domain types, page scanning and reconciliation planning.
mod author;
mod history;
mod listing;
mod queue;
mod reconcile;
mod summary;
mod work;

pub use author::{find_author_id, AuthorId, AuthorName};
pub use history::DownloadHistory;
pub use listing::{scan_work_ids, DETAIL_MARKER, PAGE_STRIDE};
pub use queue::{parse_authors, AuthorQueue, DEFAULT_AUTHORS};
pub use reconcile::{shares_base, stale_entries};
pub use summary::{AuthorSummary, RunReport};
pub use work::WorkId;
