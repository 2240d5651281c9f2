use std::sync::Arc;
use std::time::Instant;

use feed_core::{AuthorId, AuthorName, AuthorQueue, AuthorSummary, DownloadHistory, RunReport};
use feed_logging::{feed_error, feed_info, feed_warn};
use futures_util::StreamExt;

use crate::{ArchiveFetcher, Catalog, CatalogPaginator, HistoryStore, Library, ScratchCache};

/// Downstream collaborator told to rescan the library once a run finishes.
pub trait LibraryRefresh: Send + Sync {
    fn refresh(&self);
}

/// Runs the whole feed: one author at a time, one work at a time.
pub struct FeedDriver {
    catalog: Arc<dyn Catalog>,
    store: HistoryStore,
    history: DownloadHistory,
    // False when an existing history file could not be read; it is then left alone.
    history_loaded: bool,
    library: Library,
    fetcher: ArchiveFetcher,
    refresh: Box<dyn LibraryRefresh>,
    page_stride: Option<u32>,
}

impl FeedDriver {
    /// Build a driver; the download history is loaded from `store` here.
    ///
    /// If the file exists but cannot be read the run starts from an empty
    /// history and [`FeedDriver::run`] will not write over the file.
    pub fn new(
        catalog: Arc<dyn Catalog>,
        store: HistoryStore,
        library: Library,
        scratch: ScratchCache,
        refresh: Box<dyn LibraryRefresh>,
    ) -> Self {
        let (history, history_loaded) = match store.load() {
            Ok(history) => (history, true),
            Err(err) => {
                feed_error!(
                    "Failed to read download history from {:?}: {}",
                    store.path(),
                    err
                );
                (DownloadHistory::new(), false)
            }
        };
        Self {
            catalog,
            store,
            history,
            history_loaded,
            library,
            fetcher: ArchiveFetcher::new(scratch),
            refresh,
            page_stride: None,
        }
    }

    pub fn with_page_stride(mut self, stride: u32) -> Self {
        self.page_stride = Some(stride);
        self
    }

    pub fn history(&self) -> &DownloadHistory {
        &self.history
    }

    /// Drain the queue, persist history and notify the library.
    pub async fn run(&mut self, mut queue: AuthorQueue) -> RunReport {
        let mut report = RunReport::default();
        if let Err(err) = self.library.ensure_root() {
            feed_error!("Library root {:?} is unusable: {}", self.library.root(), err);
        }

        while let Some(author) = queue.pop() {
            feed_info!("Mapper: {}", author);
            match self.catalog.resolve_author(&author).await {
                Ok(Some(author_id)) => {
                    let summary = self.process_author(author, &author_id).await;
                    feed_info!("{}", summary);
                    report.authors.push(summary);
                }
                Ok(None) => {
                    feed_warn!("Could not find a catalog id for {}; skipping", author);
                    report.unresolved.push(author);
                }
                Err(err) => {
                    feed_warn!("Search for {} failed: {}", author, err);
                    report.unresolved.push(author);
                }
            }
        }

        report.history_saved = if !self.history_loaded {
            feed_error!(
                "Not writing download history to {:?} because it could not be read at startup",
                self.store.path()
            );
            false
        } else {
            match self.store.save(&self.history) {
                Ok(()) => true,
                Err(err) => {
                    feed_error!(
                        "Failed to write download history to {:?}: {}; works may be downloaded again next run",
                        self.store.path(),
                        err
                    );
                    false
                }
            }
        };

        self.refresh.refresh();
        feed_info!("Finished updating songs from all mappers!");
        report
    }

    async fn process_author(&mut self, author: AuthorName, author_id: &AuthorId) -> AuthorSummary {
        let started = Instant::now();
        let mut summary = AuthorSummary::new(author);

        let catalog = Arc::clone(&self.catalog);
        let mut paginator = CatalogPaginator::new(catalog.as_ref(), author_id.clone());
        if let Some(stride) = self.page_stride {
            paginator = paginator.with_stride(stride);
        }
        let mut works = std::pin::pin!(paginator.into_stream());

        while let Some(work) = works.next().await {
            let outcome = self
                .fetcher
                .install(catalog.as_ref(), &self.history, &self.library, &work)
                .await;
            if outcome.is_installed() {
                summary.downloaded += 1;
            }
            // Recorded whatever the outcome, so a work is attempted at most once.
            self.history.record(work.clone());
            self.library.reconcile(&work);
            summary.total += 1;
        }

        if let Err(err) = self.fetcher.scratch().remove() {
            feed_warn!("Failed to remove scratch directory: {}", err);
        }

        summary.elapsed = started.elapsed();
        summary
    }
}
