//! Feed engine: catalog access, archive installation and the run driver.
mod archive;
mod catalog;
mod decode;
mod driver;
mod fetch;
mod history;
mod library;
mod paginate;
mod persist;
mod types;

pub use archive::{extract_archive, install_payload, ArchiveFetcher, ScratchCache};
pub use catalog::{Catalog, WebCatalog};
pub use decode::{decode_page, decode_page_lossy, DecodeError, DecodedPage, LOSSY_LABEL};
pub use driver::{FeedDriver, LibraryRefresh};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use history::HistoryStore;
pub use library::Library;
pub use paginate::CatalogPaginator;
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use types::{
    FailureKind, FeedError, FetchMetadata, FetchOutput, InstallOutcome, SkipReason,
};
