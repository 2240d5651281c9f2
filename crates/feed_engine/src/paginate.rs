use std::collections::HashSet;

use feed_core::{AuthorId, WorkId, PAGE_STRIDE};
use feed_logging::{feed_debug, feed_warn};
use futures_util::stream::{self, Stream, StreamExt};

use crate::Catalog;

/// Walks an author's listing 20 works at a time.
///
/// Stops at the first page that contributes no identifier which has not
/// already been yielded. A page that fails to load counts as empty.
///
/// An identifier is yielded once per author even if later pages list it
/// again, so repeats are not counted in the author's summary total and are
/// not reconciled a second time.
pub struct CatalogPaginator<'a> {
    catalog: &'a dyn Catalog,
    author: AuthorId,
    offset: u32,
    stride: u32,
    seen: HashSet<WorkId>,
    finished: bool,
}

impl<'a> CatalogPaginator<'a> {
    pub fn new(catalog: &'a dyn Catalog, author: AuthorId) -> Self {
        Self {
            catalog,
            author,
            offset: 0,
            stride: PAGE_STRIDE,
            seen: HashSet::new(),
            finished: false,
        }
    }

    pub fn with_stride(mut self, stride: u32) -> Self {
        self.stride = stride.max(1);
        self
    }

    /// Offset of the next page to fetch.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Fetch the next page; `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Option<Vec<WorkId>> {
        if self.finished {
            return None;
        }

        let page = match self.catalog.list_page(&self.author, self.offset).await {
            Ok(page) => page,
            Err(err) => {
                feed_warn!(
                    "Listing page for author {} at offset {} failed: {}",
                    self.author,
                    self.offset,
                    err
                );
                Vec::new()
            }
        };

        let fresh: Vec<WorkId> = page
            .into_iter()
            .filter(|work| self.seen.insert(work.clone()))
            .collect();
        if fresh.is_empty() {
            feed_debug!(
                "Listing for author {} ended at offset {}",
                self.author,
                self.offset
            );
            self.finished = true;
            return None;
        }

        self.offset = self.offset.saturating_add(self.stride);
        Some(fresh)
    }

    /// Lazy stream of every identifier; a page is fetched only when the
    /// previous one has been consumed.
    pub fn into_stream(self) -> impl Stream<Item = WorkId> + 'a {
        stream::unfold(self, |mut pager| async move {
            let page = pager.next_page().await?;
            Some((stream::iter(page), pager))
        })
        .flatten()
    }
}
